//! Pramaan Governance - Proposal vote state machine
//!
//! A vote session moves through three phases:
//! 1. Idle - proposal selected, nothing cast
//! 2. InProgress - ballot cast, resolution scheduled
//! 3. Resolved - outcome written back through the store
//!
//! Resolution runs on the tokio runtime after a fixed delay and can be
//! cancelled by tearing the session down.

pub mod config;
pub mod session;
pub mod engine;

pub use config::*;
pub use session::*;
pub use engine::*;
