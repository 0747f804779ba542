//! Pramaan Runtime - Portal orchestration
//!
//! The portal is what a presentation layer talks to:
//! - Read access to assets, proposals and annotations
//! - Page navigation (dashboard, asset, proposal)
//! - Starting votes and observing their phase
//! - Logging initialisation

pub mod portal;
pub mod telemetry;

pub use portal::*;
pub use telemetry::*;
