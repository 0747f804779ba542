//! Pramaan Store - Entity store and read projections
//!
//! This crate holds the canonical records and the views derived from them:
//! - Entity store (assets, proposals, annotations)
//! - Vote outcome application, the single mutation path
//! - Read projections for dashboard, asset and proposal pages

pub mod store;
pub mod query;

pub use store::*;
pub use query::*;
