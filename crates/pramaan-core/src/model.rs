//! Rights-management records
//!
//! Assets carry fractional ownership and a current license; proposals are
//! licensing offers raised against an asset. Both are value types: the
//! store replaces them wholesale, so fields are read through accessors and
//! the only "mutators" return a new value.

use std::fmt;

use serde::Serialize;

use crate::{AssetId, PramaanError, PramaanResult, ProposalId};

/// Total of all ownership shares on a single asset
pub const FULL_OWNERSHIP: u32 = 100;

/// A participant: creator, owner or proposer
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    name: String,
    wallet_address: Option<String>,
    verified: Option<bool>,
}

impl Identity {
    /// Identity known only by display name
    pub fn named(name: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            wallet_address: None,
            verified: None,
        }
    }

    pub fn with_wallet(mut self, wallet_address: impl Into<String>) -> Self {
        self.wallet_address = Some(wallet_address.into());
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    /// Unset verification counts as unverified
    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

/// One holder's share of an asset, in whole percent
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OwnershipRecord {
    holder: Identity,
    share: u8,
}

impl OwnershipRecord {
    pub fn new(holder: Identity, share: u8) -> Self {
        OwnershipRecord { holder, share }
    }

    pub fn holder(&self) -> &Identity {
        &self.holder
    }

    pub fn share(&self) -> u8 {
        self.share
    }
}

/// Check that every share is within 0..=100 and that they total exactly 100
pub fn validate_ownership(asset: AssetId, ownership: &[OwnershipRecord]) -> PramaanResult<()> {
    if let Some(record) = ownership.iter().find(|r| u32::from(r.share) > FULL_OWNERSHIP) {
        return Err(PramaanError::ShareOutOfRange {
            asset,
            share: record.share,
        });
    }

    let total: u32 = ownership.iter().map(|r| u32::from(r.share)).sum();
    if total != FULL_OWNERSHIP {
        return Err(PramaanError::InvalidOwnership { asset, total });
    }

    Ok(())
}

/// A rights-bearing digital work
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Asset {
    id: AssetId,
    title: String,
    #[serde(rename = "type")]
    asset_type: String,
    creator: Identity,
    ownership: Vec<OwnershipRecord>,
    current_license: String,
}

impl Asset {
    /// Build an asset, rejecting ownership that does not total 100%
    pub fn new(
        id: AssetId,
        title: impl Into<String>,
        asset_type: impl Into<String>,
        creator: Identity,
        ownership: Vec<OwnershipRecord>,
        current_license: impl Into<String>,
    ) -> PramaanResult<Self> {
        validate_ownership(id, &ownership)?;

        Ok(Asset {
            id,
            title: title.into(),
            asset_type: asset_type.into(),
            creator,
            ownership,
            current_license: current_license.into(),
        })
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn asset_type(&self) -> &str {
        &self.asset_type
    }

    pub fn creator(&self) -> &Identity {
        &self.creator
    }

    /// Ownership records in declaration order
    pub fn ownership(&self) -> &[OwnershipRecord] {
        &self.ownership
    }

    pub fn current_license(&self) -> &str {
        &self.current_license
    }

    /// Share held by the named identity, if any
    pub fn share_of(&self, name: &str) -> Option<u8> {
        self.ownership
            .iter()
            .find(|r| r.holder.name == name)
            .map(|r| r.share)
    }

    /// Same asset under a different license
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.current_license = license.into();
        self
    }
}

/// Proposal lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ProposalStatus {
    #[default]
    Pending,
    Passed,
    Failed,
}

impl ProposalStatus {
    pub fn is_pending(self) -> bool {
        self == ProposalStatus::Pending
    }

    /// Passed and Failed are final
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProposalStatus::Pending => "Pending",
            ProposalStatus::Passed => "Passed",
            ProposalStatus::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// Exclusivity of an offered license
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LicenseKind {
    /// Replaces every other royalty structure on the asset
    Exclusive,
    /// Granted alongside the asset's current license
    NonExclusive,
}

impl LicenseKind {
    pub fn label(self) -> &'static str {
        match self {
            LicenseKind::Exclusive => "Exclusive",
            LicenseKind::NonExclusive => "Non-Exclusive",
        }
    }
}

/// License a proposal would grant if it passes
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LicenseTerms {
    pub kind: LicenseKind,
    /// Display label of the party receiving the license
    pub licensee: String,
}

impl LicenseTerms {
    pub fn exclusive(licensee: impl Into<String>) -> Self {
        LicenseTerms {
            kind: LicenseKind::Exclusive,
            licensee: licensee.into(),
        }
    }

    pub fn non_exclusive(licensee: impl Into<String>) -> Self {
        LicenseTerms {
            kind: LicenseKind::NonExclusive,
            licensee: licensee.into(),
        }
    }

    /// e.g. `Exclusive License: 'GameStudio X'`
    pub fn license_label(&self) -> String {
        format!("{} License: '{}'", self.kind.label(), self.licensee)
    }

    /// Only exclusive grants overwrite the asset's current license
    pub fn changes_license(&self) -> bool {
        self.kind == LicenseKind::Exclusive
    }
}

/// A licensing offer submitted against an asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Proposal {
    id: ProposalId,
    asset_id: AssetId,
    title: String,
    proposer: String,
    offer: String,
    description: String,
    terms: LicenseTerms,
    status: ProposalStatus,
}

impl Proposal {
    /// New proposals always start `Pending`
    pub fn new(
        id: ProposalId,
        asset_id: AssetId,
        title: impl Into<String>,
        proposer: impl Into<String>,
        offer: impl Into<String>,
        description: impl Into<String>,
        terms: LicenseTerms,
    ) -> Self {
        Proposal {
            id,
            asset_id,
            title: title.into(),
            proposer: proposer.into(),
            offer: offer.into(),
            description: description.into(),
            terms,
            status: ProposalStatus::Pending,
        }
    }

    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Wallet-like identifier of the submitter
    pub fn proposer(&self) -> &str {
        &self.proposer
    }

    /// Human-readable offer, e.g. `$25,000 (Flat Buyout)`
    pub fn offer(&self) -> &str {
        &self.offer
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn terms(&self) -> &LicenseTerms {
        &self.terms
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    /// License string written to the asset if this proposal passes
    pub fn license_update(&self) -> Option<String> {
        self.terms
            .changes_license()
            .then(|| self.terms.license_label())
    }

    /// Move a pending proposal to a terminal status
    pub fn resolve(mut self, status: ProposalStatus) -> PramaanResult<Self> {
        if !self.status.is_pending() {
            return Err(PramaanError::invalid_transition(
                self.id,
                format!("proposal is already {}", self.status),
            ));
        }
        if !status.is_terminal() {
            return Err(PramaanError::invalid_transition(
                self.id,
                "a proposal can only resolve to Passed or Failed",
            ));
        }

        self.status = status;
        Ok(self)
    }
}
