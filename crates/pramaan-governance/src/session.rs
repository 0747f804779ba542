//! Vote sessions
//!
//! A session exists for one proposal selection. It owns the handle of its
//! scheduled resolution, so dropping the session is the teardown path.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use pramaan_core::{Asset, PramaanError, Proposal, ProposalId, ProposalStatus};

use crate::TeardownPolicy;

/// Vote session phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum VotePhase {
    #[default]
    Idle,
    InProgress,
    Resolved,
}

impl fmt::Display for VotePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VotePhase::Idle => "idle",
            VotePhase::InProgress => "in progress",
            VotePhase::Resolved => "resolved",
        };
        f.write_str(label)
    }
}

/// Ballot cast on a proposal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Ballot {
    /// Vote YES, accept the offer
    Accept,
    /// Vote NO, reject the offer
    Reject,
}

impl Ballot {
    /// Status the proposal resolves to under this ballot
    pub fn target_status(self) -> ProposalStatus {
        match self {
            Ballot::Accept => ProposalStatus::Passed,
            Ballot::Reject => ProposalStatus::Failed,
        }
    }
}

/// Records as they stood right after an outcome was applied
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub ballot: Ballot,
    pub proposal: Proposal,
    pub asset: Asset,
}

/// Result of a fired resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied(VoteOutcome),
    /// The store refused the outcome; nothing was written
    Rejected(PramaanError),
}

impl Resolution {
    pub fn outcome(&self) -> Option<&VoteOutcome> {
        match self {
            Resolution::Applied(outcome) => Some(outcome),
            Resolution::Rejected(_) => None,
        }
    }
}

/// Observable state of a vote session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteSnapshot {
    pub proposal_id: ProposalId,
    pub phase: VotePhase,
    pub ballot: Option<Ballot>,
    /// Set once the phase reaches `Resolved`
    pub resolution: Option<Resolution>,
}

impl VoteSnapshot {
    fn idle(proposal_id: ProposalId) -> Self {
        VoteSnapshot {
            proposal_id,
            phase: VotePhase::Idle,
            ballot: None,
            resolution: None,
        }
    }
}

/// Receiver side of a session's state channel
pub type VoteWatch = watch::Receiver<VoteSnapshot>;

/// Sender side, shared with the scheduled resolution
pub(crate) type VoteState = Arc<watch::Sender<VoteSnapshot>>;

/// Set once a session is cancelled; the resolution checks it under the
/// store write lock before applying anything
pub(crate) type CancelFlag = Arc<AtomicBool>;

/// Ephemeral per-selection vote state
pub struct VoteSession {
    proposal_id: ProposalId,
    state: VoteState,
    /// Scheduled resolution, if a ballot was cast
    task: Option<JoinHandle<()>>,
    cancelled: CancelFlag,
    teardown: TeardownPolicy,
}

impl VoteSession {
    pub(crate) fn new(proposal_id: ProposalId, teardown: TeardownPolicy) -> Self {
        let (tx, _rx) = watch::channel(VoteSnapshot::idle(proposal_id));
        VoteSession {
            proposal_id,
            state: Arc::new(tx),
            task: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            teardown,
        }
    }

    pub fn proposal_id(&self) -> ProposalId {
        self.proposal_id
    }

    pub fn phase(&self) -> VotePhase {
        self.state.borrow().phase
    }

    pub fn snapshot(&self) -> VoteSnapshot {
        self.state.borrow().clone()
    }

    /// Watch phase changes
    pub fn subscribe(&self) -> VoteWatch {
        self.state.subscribe()
    }

    /// A resolution is scheduled and has not fired yet
    pub fn is_awaiting_resolution(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Mark the ballot cast; returns the sender for the resolution task
    pub(crate) fn begin(&mut self, ballot: Ballot) -> VoteState {
        self.state.send_modify(|s| {
            s.phase = VotePhase::InProgress;
            s.ballot = Some(ballot);
        });
        Arc::clone(&self.state)
    }

    pub(crate) fn attach(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }

    pub(crate) fn cancel_flag(&self) -> CancelFlag {
        Arc::clone(&self.cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Stop the scheduled resolution.
    ///
    /// The flag covers a resolution that already left its sleep on another
    /// worker and is waiting for the store lock; `abort` covers the rest.
    pub(crate) fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        let Some(task) = self.task.take() else {
            return;
        };
        if !task.is_finished() {
            task.abort();
            info!(proposal = %self.proposal_id, "pending resolution cancelled on teardown");
        }
    }

    /// Hand over a still-running resolution so it can outlive the session
    pub(crate) fn detach(&mut self) -> Option<JoinHandle<()>> {
        self.task.take().filter(|t| !t.is_finished())
    }
}

impl fmt::Debug for VoteSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoteSession")
            .field("proposal_id", &self.proposal_id)
            .field("phase", &self.phase())
            .field("teardown", &self.teardown)
            .finish()
    }
}

impl Drop for VoteSession {
    fn drop(&mut self) {
        match self.teardown {
            TeardownPolicy::Cancel => self.cancel(),
            TeardownPolicy::LetFire => {
                if self.detach().is_some() {
                    debug!(proposal = %self.proposal_id, "session dropped; resolution left to fire");
                }
            }
        }
    }
}
