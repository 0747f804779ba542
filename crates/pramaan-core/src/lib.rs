//! Pramaan Core - Fundamental types for rights management
//!
//! This crate defines the data model shared by every other Pramaan crate:
//! - Identifiers (AssetId, ProposalId)
//! - Identities, assets and fractional ownership
//! - Licensing proposals and their status lifecycle
//! - Advisory annotations attached to proposals
//! - The error taxonomy and the reference seed set

pub mod id;
pub mod model;
pub mod annotation;
pub mod error;
pub mod seed;

pub use id::*;
pub use model::*;
pub use annotation::*;
pub use error::*;
