//! Read projections over the entity store
//!
//! Pure functions; nothing here mutates or caches.

use serde::Serialize;

use pramaan_core::{AdvisoryAnnotation, Asset, AssetId, PramaanError, PramaanResult, Proposal, ProposalId};

use crate::Store;

/// Dashboard card for one asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    pub id: AssetId,
    pub title: String,
    pub asset_type: String,
    pub creator: String,
    pub creator_verified: bool,
    pub current_license: String,
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        AssetSummary {
            id: asset.id(),
            title: asset.title().to_string(),
            asset_type: asset.asset_type().to_string(),
            creator: asset.creator().name().to_string(),
            creator_verified: asset.creator().is_verified(),
            current_license: asset.current_license().to_string(),
        }
    }
}

/// An asset together with the proposals raised against it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetView {
    pub asset: Asset,
    pub proposals: Vec<Proposal>,
}

impl AssetView {
    /// (holder name, share %) rows in declaration order
    pub fn ownership_rows(&self) -> Vec<(&str, u8)> {
        self.asset
            .ownership()
            .iter()
            .map(|r| (r.holder().name(), r.share()))
            .collect()
    }
}

/// A proposal with the context needed to vote on it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProposalView {
    pub proposal: Proposal,
    pub asset_title: String,
    pub current_license: String,
    /// `None` when no advisory annotation was seeded for this proposal
    pub annotation: Option<AdvisoryAnnotation>,
}

/// One summary per asset, in insertion order
pub fn dashboard(store: &Store) -> Vec<AssetSummary> {
    store.list_assets().iter().map(AssetSummary::from).collect()
}

/// Proposals for an existing asset
pub fn proposals_for_asset(store: &Store, asset_id: AssetId) -> PramaanResult<Vec<Proposal>> {
    if !store.contains_asset(asset_id) {
        return Err(PramaanError::AssetNotFound(asset_id));
    }
    Ok(store.list_proposals_for_asset(asset_id))
}

pub fn annotation_for_proposal(store: &Store, proposal_id: ProposalId) -> Option<AdvisoryAnnotation> {
    store.annotation(proposal_id).cloned()
}

pub fn asset_view(store: &Store, asset_id: AssetId) -> PramaanResult<AssetView> {
    let asset = store.get_asset(asset_id)?;
    let proposals = store.list_proposals_for_asset(asset_id);
    Ok(AssetView { asset, proposals })
}

/// Proposal page projection; a dangling asset reference is an integrity error
pub fn proposal_view(store: &Store, proposal_id: ProposalId) -> PramaanResult<ProposalView> {
    let proposal = store.get_proposal(proposal_id)?;
    let asset = store
        .get_asset(proposal.asset_id())
        .map_err(|_| PramaanError::IntegrityError {
            proposal: proposal_id,
            asset: proposal.asset_id(),
        })?;

    Ok(ProposalView {
        annotation: annotation_for_proposal(store, proposal_id),
        asset_title: asset.title().to_string(),
        current_license: asset.current_license().to_string(),
        proposal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pramaan_core::seed::{CELESTIAL_ECHO, GAME_STUDIO_OFFER, INDIE_FILM_OFFER, QUANTUM_LULLABY};
    use pramaan_core::Severity;

    #[test]
    fn test_dashboard_lists_all_assets() {
        let store = Store::reference().unwrap();
        let cards = dashboard(&store);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Celestial Echo");
        assert!(cards[0].creator_verified);
        assert_eq!(cards[1].id, QUANTUM_LULLABY);
    }

    #[test]
    fn test_asset_view_ownership_and_proposals() {
        let store = Store::reference().unwrap();
        let view = asset_view(&store, CELESTIAL_ECHO).unwrap();
        assert_eq!(
            view.ownership_rows(),
            vec![("Shri Sharma", 40), ("Uthkarsh M.", 20), ("Public DAO", 40)]
        );
        let ids: Vec<_> = view.proposals.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![GAME_STUDIO_OFFER, INDIE_FILM_OFFER]);

        let empty = asset_view(&store, QUANTUM_LULLABY).unwrap();
        assert!(empty.proposals.is_empty());
    }

    #[test]
    fn test_proposals_for_unknown_asset() {
        let store = Store::reference().unwrap();
        assert_eq!(
            proposals_for_asset(&store, AssetId::new(999)),
            Err(PramaanError::AssetNotFound(AssetId::new(999)))
        );
    }

    #[test]
    fn test_proposal_view_with_and_without_annotation() {
        let store = Store::reference().unwrap();

        let annotated = proposal_view(&store, GAME_STUDIO_OFFER).unwrap();
        assert_eq!(annotated.asset_title, "Celestial Echo");
        let annotation = annotated.annotation.unwrap();
        assert_eq!(annotation.strategy.status_label, "RECOMMEND ACCEPT");
        assert_eq!(annotation.worst_severity(), Severity::HighRisk);

        let plain = proposal_view(&store, INDIE_FILM_OFFER).unwrap();
        assert!(plain.annotation.is_none());
        assert_eq!(annotation_for_proposal(&store, INDIE_FILM_OFFER), None);
    }
}
