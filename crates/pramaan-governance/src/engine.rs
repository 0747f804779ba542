//! Governance engine - drives vote sessions and applies their outcomes

use std::sync::atomic::Ordering;
use std::time::Duration;

use parking_lot::RwLockReadGuard;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use pramaan_core::{PramaanError, PramaanResult, ProposalId};
use pramaan_store::{SharedStore, Store};

use crate::{
    Ballot, CancelFlag, GovernanceConfig, Resolution, TeardownPolicy, VoteOutcome, VotePhase,
    VoteSession, VoteSnapshot, VoteState, VoteWatch,
};

/// Governance state machine
///
/// Holds at most one vote session; opening a new one tears the previous
/// one down according to [`crate::TeardownPolicy`]. The engine owns the only
/// writable handle to the store; vote resolutions are the sole writers.
pub struct GovernanceEngine {
    store: SharedStore,
    config: GovernanceConfig,
    session: Option<VoteSession>,
    /// Resolution of a torn-down session still running under `LetFire`
    orphaned: Option<JoinHandle<()>>,
}

impl GovernanceEngine {
    pub fn new(store: Store) -> Self {
        Self::with_config(store, GovernanceConfig::default())
    }

    pub fn with_config(store: Store, config: GovernanceConfig) -> Self {
        GovernanceEngine {
            store: store.into_shared(),
            config,
            session: None,
            orphaned: None,
        }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Read access to the store; blocks while a resolution is writing
    pub fn store(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read()
    }

    pub fn session(&self) -> Option<&VoteSession> {
        self.session.as_ref()
    }

    /// Phase of the active session, if any
    pub fn phase(&self) -> Option<VotePhase> {
        self.session.as_ref().map(VoteSession::phase)
    }

    /// Open an Idle session for a proposal, replacing any previous session
    pub fn open_session(&mut self, proposal_id: ProposalId) -> PramaanResult<VoteWatch> {
        if !self.store.read().contains_proposal(proposal_id) {
            return Err(PramaanError::ProposalNotFound(proposal_id));
        }

        self.teardown();
        let session = VoteSession::new(proposal_id, self.config.teardown);
        let watch = session.subscribe();
        self.session = Some(session);

        debug!(proposal = %proposal_id, "vote session opened");
        Ok(watch)
    }

    /// Cast a YES ballot
    pub fn start_vote(&mut self, proposal_id: ProposalId) -> PramaanResult<()> {
        self.start_vote_with(proposal_id, Ballot::Accept)
    }

    /// Cast a ballot and schedule its resolution
    ///
    /// Requires an Idle session for `proposal_id` and a Pending proposal.
    /// Must be called from within a tokio runtime.
    pub fn start_vote_with(&mut self, proposal_id: ProposalId, ballot: Ballot) -> PramaanResult<()> {
        let session = self.session.as_mut().ok_or(PramaanError::NoActiveSession)?;
        if session.proposal_id() != proposal_id {
            return Err(PramaanError::SessionMismatch {
                active: session.proposal_id(),
                requested: proposal_id,
            });
        }

        match session.phase() {
            VotePhase::Idle => {}
            VotePhase::InProgress => {
                return Err(PramaanError::invalid_transition(
                    proposal_id,
                    "vote already in progress",
                ))
            }
            VotePhase::Resolved => {
                return Err(PramaanError::invalid_transition(
                    proposal_id,
                    "vote already resolved; reselect the proposal to vote again",
                ))
            }
        }

        if self.orphaned.as_ref().is_some_and(|t| !t.is_finished()) {
            return Err(PramaanError::invalid_transition(
                proposal_id,
                "an earlier vote is still resolving",
            ));
        }
        self.orphaned = None;

        let status = self.store.read().get_proposal(proposal_id)?.status();
        if !status.is_pending() {
            return Err(PramaanError::invalid_transition(
                proposal_id,
                format!("proposal is already {status}"),
            ));
        }

        let runtime =
            Handle::try_current().map_err(|e| PramaanError::SchedulerUnavailable(e.to_string()))?;

        let state = session.begin(ballot);
        let task = runtime.spawn(resolve_after(
            self.config.resolution_delay,
            self.store.clone(),
            state,
            session.cancel_flag(),
            proposal_id,
            ballot,
        ));
        session.attach(task);

        info!(
            proposal = %proposal_id,
            ?ballot,
            delay_ms = self.config.resolution_delay.as_millis() as u64,
            "vote started"
        );
        Ok(())
    }

    /// Whether a resolution from a torn-down session is still pending
    pub fn has_orphaned_resolution(&self) -> bool {
        self.orphaned.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Drop the active session, returning its last snapshot
    pub fn teardown(&mut self) -> Option<VoteSnapshot> {
        let mut session = self.session.take()?;
        let snapshot = session.snapshot();

        if session.is_awaiting_resolution() {
            match self.config.teardown {
                TeardownPolicy::Cancel => {
                    // A resolution holding the lock finishes first; one that
                    // has not taken it yet sees the flag.
                    let _store = self.store.write();
                    session.cancel();
                }
                TeardownPolicy::LetFire => {
                    self.orphaned = session.detach();
                    debug!(proposal = %session.proposal_id(), "session torn down; resolution left to fire");
                }
            }
        }

        debug!(proposal = %session.proposal_id(), phase = %snapshot.phase, "vote session closed");
        Some(snapshot)
    }
}

/// Scheduled resolution: wait out the delay, then write the outcome
async fn resolve_after(
    delay: Duration,
    store: SharedStore,
    state: VoteState,
    cancelled: CancelFlag,
    proposal_id: ProposalId,
    ballot: Ballot,
) {
    tokio::time::sleep(delay).await;

    // No await below: an abort either lands before this point or not at all.
    let mut store = store.write();
    if cancelled.load(Ordering::Acquire) {
        debug!(proposal = %proposal_id, "resolution skipped; session was cancelled");
        return;
    }

    let resolution = match apply_ballot(&mut store, proposal_id, ballot) {
        Ok(outcome) => {
            info!(
                proposal = %proposal_id,
                status = %outcome.proposal.status(),
                license = outcome.asset.current_license(),
                "vote resolved"
            );
            Resolution::Applied(outcome)
        }
        Err(err) => {
            warn!(proposal = %proposal_id, error = %err, "vote resolution rejected");
            Resolution::Rejected(err)
        }
    };
    drop(store);

    state.send_modify(|s| {
        s.phase = VotePhase::Resolved;
        s.resolution = Some(resolution);
    });
}

fn apply_ballot(store: &mut Store, proposal_id: ProposalId, ballot: Ballot) -> PramaanResult<VoteOutcome> {
    let proposal = store.get_proposal(proposal_id)?;
    let license_update = match ballot {
        Ballot::Accept => proposal.license_update(),
        Ballot::Reject => None,
    };

    let (proposal, asset) =
        store.apply_vote_outcome(proposal_id, ballot.target_status(), license_update)?;

    Ok(VoteOutcome {
        ballot,
        proposal,
        asset,
    })
}
