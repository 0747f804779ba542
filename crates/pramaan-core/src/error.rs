//! Error types for Pramaan

use thiserror::Error;

use crate::{AssetId, ProposalId};

/// Core Pramaan errors
///
/// Every variant is local to the operation that produced it; none of them
/// leave the store in a partially mutated state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PramaanError {
    // Lookup errors
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    // Integrity errors
    #[error("Integrity error: proposal {proposal} references missing asset {asset}")]
    IntegrityError { proposal: ProposalId, asset: AssetId },

    #[error("Duplicate asset id: {0}")]
    DuplicateAsset(AssetId),

    #[error("Duplicate proposal id: {0}")]
    DuplicateProposal(ProposalId),

    #[error("Ownership of asset {asset} totals {total}%, expected 100%")]
    InvalidOwnership { asset: AssetId, total: u32 },

    #[error("Ownership share {share}% on asset {asset} is outside 0..=100")]
    ShareOutOfRange { asset: AssetId, share: u8 },

    // Governance errors
    #[error("Invalid transition for proposal {proposal}: {reason}")]
    InvalidTransition { proposal: ProposalId, reason: String },

    #[error("No active vote session")]
    NoActiveSession,

    #[error("Session mismatch: active session is for proposal {active}, got {requested}")]
    SessionMismatch {
        active: ProposalId,
        requested: ProposalId,
    },

    #[error("Scheduler unavailable: {0}")]
    SchedulerUnavailable(String),
}

impl PramaanError {
    pub fn invalid_transition(proposal: ProposalId, reason: impl Into<String>) -> Self {
        PramaanError::InvalidTransition {
            proposal,
            reason: reason.into(),
        }
    }

    /// Lookup of a nonexistent id
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PramaanError::AssetNotFound(_) | PramaanError::ProposalNotFound(_)
        )
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, PramaanError::InvalidTransition { .. })
    }

    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            PramaanError::IntegrityError { .. }
                | PramaanError::DuplicateAsset(_)
                | PramaanError::DuplicateProposal(_)
                | PramaanError::InvalidOwnership { .. }
                | PramaanError::ShareOutOfRange { .. }
        )
    }
}

/// Result type for Pramaan operations
pub type PramaanResult<T> = Result<T, PramaanError>;
