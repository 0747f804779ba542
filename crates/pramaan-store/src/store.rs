//! Entity store - canonical assets, proposals and annotations

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use pramaan_core::seed;
use pramaan_core::{
    AdvisoryAnnotation, Asset, AssetId, PramaanError, PramaanResult, Proposal, ProposalId,
    ProposalStatus,
};

/// Store shared between a portal session and its scheduled resolution
pub type SharedStore = Arc<RwLock<Store>>;

/// Canonical record collections
///
/// Lookups hand out owned snapshots. A snapshot taken before
/// [`Store::apply_vote_outcome`] is stale afterwards and must be refetched.
#[derive(Clone, Debug, Default)]
pub struct Store {
    /// Assets in insertion order
    assets: Vec<Asset>,
    /// Proposals in insertion order
    proposals: Vec<Proposal>,
    /// Advisory annotations keyed by proposal
    annotations: HashMap<ProposalId, AdvisoryAnnotation>,
}

impl Store {
    /// Build a store from initial collections
    ///
    /// Duplicate asset or proposal ids are rejected. Proposals pointing at a
    /// missing asset are kept but logged; they fail with
    /// [`PramaanError::IntegrityError`] when an outcome is applied to them.
    pub fn new(
        assets: Vec<Asset>,
        proposals: Vec<Proposal>,
        annotations: Vec<AdvisoryAnnotation>,
    ) -> PramaanResult<Self> {
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].iter().any(|a| a.id() == asset.id()) {
                return Err(PramaanError::DuplicateAsset(asset.id()));
            }
        }
        for (i, proposal) in proposals.iter().enumerate() {
            if proposals[..i].iter().any(|p| p.id() == proposal.id()) {
                return Err(PramaanError::DuplicateProposal(proposal.id()));
            }
        }

        let mut by_proposal = HashMap::with_capacity(annotations.len());
        for annotation in annotations {
            if !proposals.iter().any(|p| p.id() == annotation.proposal_id) {
                warn!(proposal = %annotation.proposal_id, "annotation for unknown proposal");
            }
            if by_proposal.contains_key(&annotation.proposal_id) {
                warn!(proposal = %annotation.proposal_id, "duplicate annotation ignored");
                continue;
            }
            by_proposal.insert(annotation.proposal_id, annotation);
        }

        let store = Store {
            assets,
            proposals,
            annotations: by_proposal,
        };

        for proposal in store.dangling_proposals() {
            warn!(proposal = %proposal, "proposal references a missing asset");
        }

        info!(
            assets = store.assets.len(),
            proposals = store.proposals.len(),
            annotations = store.annotations.len(),
            "store initialised"
        );

        Ok(store)
    }

    /// Store loaded with the reference seed set
    pub fn reference() -> PramaanResult<Self> {
        Store::new(
            seed::reference_assets()?,
            seed::reference_proposals(),
            seed::reference_annotations(),
        )
    }

    /// Wrap for sharing with scheduled tasks
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// All assets in insertion order
    pub fn list_assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn get_asset(&self, id: AssetId) -> PramaanResult<Asset> {
        self.asset(id).cloned().ok_or(PramaanError::AssetNotFound(id))
    }

    pub fn get_proposal(&self, id: ProposalId) -> PramaanResult<Proposal> {
        self.proposal(id)
            .cloned()
            .ok_or(PramaanError::ProposalNotFound(id))
    }

    /// Proposals raised against an asset, in creation order
    pub fn list_proposals_for_asset(&self, asset_id: AssetId) -> Vec<Proposal> {
        self.proposals
            .iter()
            .filter(|p| p.asset_id() == asset_id)
            .cloned()
            .collect()
    }

    /// Annotation attached to a proposal, if one was seeded
    pub fn annotation(&self, proposal_id: ProposalId) -> Option<&AdvisoryAnnotation> {
        self.annotations.get(&proposal_id)
    }

    pub fn contains_asset(&self, id: AssetId) -> bool {
        self.asset(id).is_some()
    }

    pub fn contains_proposal(&self, id: ProposalId) -> bool {
        self.proposal(id).is_some()
    }

    /// Proposals whose asset id does not resolve
    pub fn dangling_proposals(&self) -> Vec<ProposalId> {
        self.proposals
            .iter()
            .filter(|p| !self.contains_asset(p.asset_id()))
            .map(|p| p.id())
            .collect()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Apply a vote result: set the proposal status and, when given,
    /// overwrite the owning asset's license.
    ///
    /// Both records are validated before either is written, so the store
    /// sees both changes or neither. Returns the replaced records.
    pub fn apply_vote_outcome(
        &mut self,
        proposal_id: ProposalId,
        new_status: ProposalStatus,
        license_update: Option<String>,
    ) -> PramaanResult<(Proposal, Asset)> {
        let p_idx = self
            .proposals
            .iter()
            .position(|p| p.id() == proposal_id)
            .ok_or(PramaanError::ProposalNotFound(proposal_id))?;

        let asset_id = self.proposals[p_idx].asset_id();
        let Some(a_idx) = self.assets.iter().position(|a| a.id() == asset_id) else {
            warn!(proposal = %proposal_id, asset = %asset_id, "outcome rejected: dangling asset reference");
            return Err(PramaanError::IntegrityError {
                proposal: proposal_id,
                asset: asset_id,
            });
        };

        let proposal = self.proposals[p_idx].clone().resolve(new_status)?;
        let asset = match license_update {
            Some(license) => self.assets[a_idx].clone().with_license(license),
            None => self.assets[a_idx].clone(),
        };

        // Commit
        self.proposals[p_idx] = proposal.clone();
        self.assets[a_idx] = asset.clone();

        debug!(
            proposal = %proposal_id,
            status = %proposal.status(),
            license = asset.current_license(),
            "vote outcome applied"
        );

        Ok((proposal, asset))
    }

    fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id() == id)
    }

    fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id() == id)
    }
}
