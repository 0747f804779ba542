//! End-to-end vote scenarios through the portal surface

use std::time::Duration;

use pramaan_core::seed::{CELESTIAL_ECHO, GAME_STUDIO_OFFER, INDIE_FILM_OFFER};
use pramaan_core::{AssetId, PramaanError, ProposalStatus};
use pramaan_governance::{Ballot, GovernanceConfig, TeardownPolicy, VotePhase};
use pramaan_runtime::{Page, Portal, PortalConfig};

const DELAY: Duration = Duration::from_millis(2500);

fn portal_with(governance: GovernanceConfig) -> Portal {
    Portal::reference(PortalConfig {
        governance,
        ..PortalConfig::default()
    })
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn game_studio_offer_passes_and_relicenses_asset() {
    let mut portal = portal_with(GovernanceConfig::default());
    assert_eq!(
        portal.get_asset(CELESTIAL_ECHO).unwrap().current_license(),
        "Default 5% Public Royalty"
    );

    portal.select_asset(CELESTIAL_ECHO).unwrap();
    let view = portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    assert_eq!(view.proposal.status(), ProposalStatus::Pending);
    assert!(view.annotation.is_some());

    portal.start_vote(GAME_STUDIO_OFFER).unwrap();
    assert_eq!(portal.vote_phase(), Some(VotePhase::InProgress));

    tokio::time::sleep(DELAY / 2).await;
    assert_eq!(portal.vote_phase(), Some(VotePhase::InProgress));

    let snapshot = portal.wait_for_resolution().await.unwrap();
    assert_eq!(snapshot.phase, VotePhase::Resolved);
    assert_eq!(portal.vote_phase(), Some(VotePhase::Resolved));
    assert_eq!(
        portal.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Passed
    );
    assert_eq!(
        portal.get_asset(CELESTIAL_ECHO).unwrap().current_license(),
        "Exclusive License: 'GameStudio X'"
    );
}

#[tokio::test(start_paused = true)]
async fn second_start_is_rejected_and_not_rescheduled() {
    let mut portal = portal_with(GovernanceConfig::default());
    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    portal.start_vote(GAME_STUDIO_OFFER).unwrap();

    assert!(portal
        .start_vote(GAME_STUDIO_OFFER)
        .unwrap_err()
        .is_invalid_transition());

    portal.wait_for_resolution().await.unwrap();
    assert!(portal
        .start_vote(GAME_STUDIO_OFFER)
        .unwrap_err()
        .is_invalid_transition());

    tokio::time::sleep(DELAY * 3).await;
    assert_eq!(portal.vote_phase(), Some(VotePhase::Resolved));
    assert_eq!(
        portal.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Passed
    );
}

#[tokio::test(start_paused = true)]
async fn rejection_marks_proposal_failed() {
    let mut portal = portal_with(GovernanceConfig::default());
    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    portal.cast_ballot(Ballot::Reject).unwrap();
    portal.wait_for_resolution().await.unwrap();

    assert_eq!(
        portal.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Failed
    );
    assert_eq!(
        portal.get_asset(CELESTIAL_ECHO).unwrap().current_license(),
        "Default 5% Public Royalty"
    );
    assert_eq!(portal.vote_outcome().unwrap().headline, "VOTE FAILED (18% NO)");
}

#[tokio::test(start_paused = true)]
async fn navigating_away_cancels_pending_vote() {
    let mut portal = portal_with(GovernanceConfig::default());
    portal.select_asset(CELESTIAL_ECHO).unwrap();
    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    portal.start_vote(GAME_STUDIO_OFFER).unwrap();

    assert_eq!(portal.back(), Page::Asset(CELESTIAL_ECHO));
    tokio::time::sleep(DELAY * 2).await;

    assert_eq!(
        portal.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Pending
    );

    // A fresh selection can vote again
    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    assert_eq!(portal.vote_phase(), Some(VotePhase::Idle));
    portal.start_vote(GAME_STUDIO_OFFER).unwrap();
    portal.wait_for_resolution().await.unwrap();
    assert_eq!(
        portal.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Passed
    );
}

#[tokio::test(start_paused = true)]
async fn let_fire_policy_mutates_after_navigation() {
    let mut portal =
        portal_with(GovernanceConfig::default().with_teardown(TeardownPolicy::LetFire));
    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    portal.start_vote(GAME_STUDIO_OFFER).unwrap();
    portal.back_to_dashboard();

    tokio::time::sleep(DELAY * 2).await;
    assert_eq!(
        portal.get_asset(CELESTIAL_ECHO).unwrap().current_license(),
        "Exclusive License: 'GameStudio X'"
    );
}

#[tokio::test(start_paused = true)]
async fn let_fire_policy_keeps_one_vote_in_flight() {
    let mut portal =
        portal_with(GovernanceConfig::default().with_teardown(TeardownPolicy::LetFire));
    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    portal.start_vote(GAME_STUDIO_OFFER).unwrap();

    portal.select_proposal(INDIE_FILM_OFFER).unwrap();
    let err = portal.start_vote(INDIE_FILM_OFFER).unwrap_err();
    assert!(err.is_invalid_transition());
    assert_eq!(portal.vote_phase(), Some(VotePhase::Idle));

    tokio::time::sleep(DELAY * 2).await;
    assert_eq!(
        portal.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Passed
    );
    assert_eq!(
        portal.get_proposal(INDIE_FILM_OFFER).unwrap().status(),
        ProposalStatus::Pending
    );

    portal.start_vote(INDIE_FILM_OFFER).unwrap();
    let snapshot = portal.wait_for_resolution().await.unwrap();
    assert_eq!(snapshot.proposal_id, INDIE_FILM_OFFER);
}

#[tokio::test(start_paused = true)]
async fn records_change_only_through_votes() {
    let mut portal = portal_with(GovernanceConfig::default());
    {
        let store = portal.store();
        assert_eq!(
            store.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
            ProposalStatus::Pending
        );
    }

    portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    portal.start_vote(GAME_STUDIO_OFFER).unwrap();
    portal.wait_for_resolution().await.unwrap();

    let store = portal.store();
    assert_eq!(
        store.get_proposal(GAME_STUDIO_OFFER).unwrap().status(),
        ProposalStatus::Passed
    );
    assert_eq!(
        store.get_asset(CELESTIAL_ECHO).unwrap().current_license(),
        "Exclusive License: 'GameStudio X'"
    );
}

#[test]
fn lookups_and_annotations() {
    let portal = portal_with(GovernanceConfig::default());

    assert_eq!(
        portal.get_asset(AssetId::new(999)),
        Err(PramaanError::AssetNotFound(AssetId::new(999)))
    );
    assert!(portal.annotation_for_proposal(GAME_STUDIO_OFFER).is_some());
    assert!(portal.annotation_for_proposal(INDIE_FILM_OFFER).is_none());

    let ids: Vec<_> = portal
        .list_proposals_for_asset(CELESTIAL_ECHO)
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(ids, vec![GAME_STUDIO_OFFER, INDIE_FILM_OFFER]);
    assert_eq!(portal.list_assets().len(), 2);
}

#[test]
fn views_serialize_for_presentation() {
    let mut portal = portal_with(GovernanceConfig::default());
    let view = portal.select_proposal(GAME_STUDIO_OFFER).unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["asset_title"], "Celestial Echo");
    assert_eq!(json["proposal"]["status"], "Pending");
    assert_eq!(json["annotation"]["risk"]["severity"], "HighRisk");

    let cards = serde_json::to_value(portal.dashboard()).unwrap();
    assert_eq!(cards[1]["title"], "Quantum Lullaby");
}
