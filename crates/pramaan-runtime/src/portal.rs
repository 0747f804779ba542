//! Portal - the surface a presentation layer drives
//!
//! The portal owns the governance engine, which in turn owns the store.
//! Callers only ever get read access; records change through votes alone.
//! Page navigation decides the lifetime of vote sessions: a session exists
//! only while its proposal page is open.

use parking_lot::RwLockReadGuard;
use serde::Serialize;
use tracing::debug;

use pramaan_core::{
    AdvisoryAnnotation, Asset, AssetId, PramaanError, PramaanResult, Proposal, ProposalId,
    ProposalStatus,
};
use pramaan_governance::{
    Ballot, GovernanceConfig, GovernanceEngine, Resolution, VotePhase, VoteSnapshot, VoteWatch,
};
use pramaan_store::{query, AssetSummary, AssetView, ProposalView, Store};

use crate::{init_logging, LogFormat};

/// Portal configuration
#[derive(Clone, Debug, Default)]
pub struct PortalConfig {
    pub governance: GovernanceConfig,
    /// Subscriber format installed by [`Portal::launch`]
    pub log_format: LogFormat,
}

/// Page currently shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Asset(AssetId),
    Proposal(ProposalId),
}

/// Result banner shown once a vote resolves
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoteOutcomeView {
    pub proposal_id: ProposalId,
    pub status: ProposalStatus,
    /// e.g. `VOTE PASSED (82% YES)`
    pub headline: String,
    /// License on the asset after the outcome was applied
    pub license: String,
}

/// Portal runtime
pub struct Portal {
    governance: GovernanceEngine,
    page: Page,
}

impl Portal {
    pub fn new(store: Store, config: PortalConfig) -> Self {
        Portal {
            governance: GovernanceEngine::with_config(store, config.governance),
            page: Page::Dashboard,
        }
    }

    /// Install the global log subscriber, then open a portal over `store`
    pub fn launch(store: Store, config: PortalConfig) -> Self {
        if !init_logging(config.log_format) {
            debug!(format = ?config.log_format, "log subscriber already installed");
        }
        Self::new(store, config)
    }

    /// Portal over the reference seed set
    pub fn reference(config: PortalConfig) -> PramaanResult<Self> {
        Ok(Self::new(Store::reference()?, config))
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Read access to the store
    pub fn store(&self) -> RwLockReadGuard<'_, Store> {
        self.governance.store()
    }

    // Reads

    pub fn list_assets(&self) -> Vec<Asset> {
        self.governance.store().list_assets().to_vec()
    }

    pub fn dashboard(&self) -> Vec<AssetSummary> {
        query::dashboard(&self.governance.store())
    }

    pub fn get_asset(&self, id: AssetId) -> PramaanResult<Asset> {
        self.governance.store().get_asset(id)
    }

    pub fn get_proposal(&self, id: ProposalId) -> PramaanResult<Proposal> {
        self.governance.store().get_proposal(id)
    }

    pub fn list_proposals_for_asset(&self, asset_id: AssetId) -> Vec<Proposal> {
        self.governance.store().list_proposals_for_asset(asset_id)
    }

    pub fn annotation_for_proposal(&self, proposal_id: ProposalId) -> Option<AdvisoryAnnotation> {
        query::annotation_for_proposal(&self.governance.store(), proposal_id)
    }

    // Navigation

    /// Open an asset page; leaving a proposal page tears its vote down
    pub fn select_asset(&mut self, asset_id: AssetId) -> PramaanResult<AssetView> {
        let view = query::asset_view(&self.governance.store(), asset_id)?;
        self.leave_proposal();
        self.page = Page::Asset(asset_id);
        debug!(asset = %asset_id, "asset selected");
        Ok(view)
    }

    /// Open a proposal page with a fresh Idle vote session
    pub fn select_proposal(&mut self, proposal_id: ProposalId) -> PramaanResult<ProposalView> {
        let view = query::proposal_view(&self.governance.store(), proposal_id)?;
        self.governance.open_session(proposal_id)?;
        self.page = Page::Proposal(proposal_id);
        debug!(proposal = %proposal_id, "proposal selected");
        Ok(view)
    }

    /// Step back one page: proposal to its asset, asset to dashboard
    pub fn back(&mut self) -> Page {
        let current = self.page;
        self.page = match current {
            Page::Proposal(id) => {
                self.leave_proposal();
                match self.governance.store().get_proposal(id) {
                    Ok(p) => Page::Asset(p.asset_id()),
                    Err(_) => Page::Dashboard,
                }
            }
            Page::Asset(_) | Page::Dashboard => Page::Dashboard,
        };
        self.page
    }

    pub fn back_to_dashboard(&mut self) {
        self.leave_proposal();
        self.page = Page::Dashboard;
    }

    // Governance

    /// Cast a YES ballot on `proposal_id`
    pub fn start_vote(&mut self, proposal_id: ProposalId) -> PramaanResult<()> {
        self.governance.start_vote(proposal_id)
    }

    /// Cast a ballot on the proposal currently open
    pub fn cast_ballot(&mut self, ballot: Ballot) -> PramaanResult<()> {
        let Page::Proposal(proposal_id) = self.page else {
            return Err(PramaanError::NoActiveSession);
        };
        self.governance.start_vote_with(proposal_id, ballot)
    }

    pub fn vote_phase(&self) -> Option<VotePhase> {
        self.governance.phase()
    }

    pub fn subscribe_vote(&self) -> Option<VoteWatch> {
        self.governance.session().map(|s| s.subscribe())
    }

    /// Wait until the open vote resolves.
    ///
    /// `None` when there is no session, nothing was cast, or the pending
    /// resolution was cancelled.
    pub async fn wait_for_resolution(&self) -> Option<VoteSnapshot> {
        let mut watch = self.subscribe_vote()?;
        loop {
            {
                let snapshot = watch.borrow_and_update();
                match snapshot.phase {
                    VotePhase::Resolved => return Some(snapshot.clone()),
                    VotePhase::Idle => return None,
                    VotePhase::InProgress => {}
                }
            }
            watch.changed().await.ok()?;
        }
    }

    /// Banner for the resolved vote, if the outcome was applied
    pub fn vote_outcome(&self) -> Option<VoteOutcomeView> {
        let snapshot = self.governance.session()?.snapshot();
        let Some(Resolution::Applied(outcome)) = snapshot.resolution else {
            return None;
        };

        let pct = self.governance.config().displayed_approval_pct;
        let headline = match outcome.proposal.status() {
            ProposalStatus::Passed => format!("VOTE PASSED ({pct}% YES)"),
            _ => format!("VOTE FAILED ({}% NO)", 100u8.saturating_sub(pct)),
        };

        Some(VoteOutcomeView {
            proposal_id: outcome.proposal.id(),
            status: outcome.proposal.status(),
            headline,
            license: outcome.asset.current_license().to_string(),
        })
    }

    /// End the session, e.g. when the hosting view goes away
    pub fn teardown(&mut self) {
        self.governance.teardown();
        self.page = Page::Dashboard;
    }

    fn leave_proposal(&mut self) {
        if matches!(self.page, Page::Proposal(_)) {
            self.governance.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pramaan_core::seed::{CELESTIAL_ECHO, GAME_STUDIO_OFFER, INDIE_FILM_OFFER};

    fn portal() -> Portal {
        Portal::reference(PortalConfig {
            governance: GovernanceConfig::instant(),
            ..PortalConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_navigation_pages() {
        let mut portal = portal();
        assert_eq!(portal.page(), Page::Dashboard);

        let view = portal.select_asset(CELESTIAL_ECHO).unwrap();
        assert_eq!(view.proposals.len(), 2);
        assert_eq!(portal.page(), Page::Asset(CELESTIAL_ECHO));

        portal.select_proposal(INDIE_FILM_OFFER).unwrap();
        assert_eq!(portal.page(), Page::Proposal(INDIE_FILM_OFFER));
        assert_eq!(portal.vote_phase(), Some(VotePhase::Idle));

        assert_eq!(portal.back(), Page::Asset(CELESTIAL_ECHO));
        assert_eq!(portal.vote_phase(), None);
        assert_eq!(portal.back(), Page::Dashboard);
    }

    #[test]
    fn test_failed_selection_keeps_page() {
        let mut portal = portal();
        portal.select_asset(CELESTIAL_ECHO).unwrap();
        assert!(portal.select_asset(AssetId::new(999)).unwrap_err().is_not_found());
        assert!(portal.select_proposal(ProposalId::new(999)).is_err());
        assert_eq!(portal.page(), Page::Asset(CELESTIAL_ECHO));
    }

    #[test]
    fn test_cast_ballot_requires_proposal_page() {
        let mut portal = portal();
        assert_eq!(
            portal.cast_ballot(Ballot::Accept),
            Err(PramaanError::NoActiveSession)
        );
    }

    #[test]
    fn test_store_access_is_read_only() {
        let portal = portal();
        let first = portal.store();
        let second = portal.store();
        assert_eq!(first.asset_count(), second.asset_count());
        assert_eq!(
            first.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
            ProposalStatus::Pending
        );
    }

    #[test]
    fn test_launch_installs_configured_logging() {
        let portal = Portal::launch(
            Store::reference().unwrap(),
            PortalConfig {
                log_format: LogFormat::Json,
                ..PortalConfig::default()
            },
        );
        assert_eq!(portal.page(), Page::Dashboard);
        assert!(!init_logging(LogFormat::Pretty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcome_banner() {
        let mut portal = portal();
        portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
        assert_eq!(portal.vote_outcome(), None);

        portal.cast_ballot(Ballot::Accept).unwrap();
        let snapshot = portal.wait_for_resolution().await.unwrap();
        assert_eq!(snapshot.phase, VotePhase::Resolved);

        let banner = portal.vote_outcome().unwrap();
        assert_eq!(banner.headline, "VOTE PASSED (82% YES)");
        assert_eq!(banner.license, "Exclusive License: 'GameStudio X'");
        assert_eq!(banner.status, ProposalStatus::Passed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_without_ballot_returns_none() {
        let mut portal = portal();
        assert!(portal.wait_for_resolution().await.is_none());
        portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
        assert!(portal.wait_for_resolution().await.is_none());
    }
}
