//! Sync orchestration: Add, then Delete, then Move.
//!
//! ```text
//! fetch groups ─► Add gate ─► invite ─► Delete gate ─► delete ─► Move gate
//!                                                               │
//!                         move ◄─ resolve ◄─ (create missing + refetch)
//! ```
//!
//! Each phase is gated on its own and can be skipped. An Abort at any gate,
//! or any failed call, ends the run without rolling back applied phases;
//! the next run recomputes everything from fresh remote state.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use roster_core::types::{Email, ExternalUser, GroupId, GroupName, RemoteUser};

use crate::api::DirectoryApi;
use crate::batch::{chunk, DELETE_BATCH_SIZE, INVITE_BATCH_SIZE, MOVE_BATCH_SIZE};
use crate::diff::{
    compute_adds, compute_deletes, compute_moves, AddFormat, DeleteFormat, MoveFormat,
};
use crate::error::SyncError;
use crate::gate::{Console, ConfirmationGate, Decision};
use crate::mirror::Mirror;
use crate::provision::{find_missing_groups, provision};
use crate::resolve::resolve_group_id;

pub const ADD_PROMPT: &str = "Users to invite:";
pub const DELETE_PROMPT: &str = "Users to delete:";
pub const MOVE_PROMPT: &str = "Users to move:";

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The three reconciliation phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Add,
    Delete,
    Move,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Add => write!(f, "add"),
            Phase::Delete => write!(f, "delete"),
            Phase::Move => write!(f, "move"),
        }
    }
}

/// What happened in one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// The action set was empty.
    NothingToDo,
    /// Changes were planned but not applied (skip answer or dry run).
    Skipped { planned: usize },
    /// All planned changes were applied.
    Applied { count: usize },
}

impl PhaseOutcome {
    pub fn planned(&self) -> usize {
        match *self {
            PhaseOutcome::NothingToDo => 0,
            PhaseOutcome::Skipped { planned } => planned,
            PhaseOutcome::Applied { count } => count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub outcome: PhaseOutcome,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub phases: Vec<PhaseReport>,
    /// Groups created by the move phase.
    pub created_groups: Vec<GroupName>,
}

impl SyncReport {
    pub fn outcome(&self, phase: Phase) -> Option<PhaseOutcome> {
        self.phases
            .iter()
            .find(|p| p.phase == phase)
            .map(|p| p.outcome)
    }

    /// `true` when every phase found nothing to do.
    pub fn is_in_sync(&self) -> bool {
        self.phases
            .iter()
            .all(|p| p.outcome == PhaseOutcome::NothingToDo)
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Reconcile the remote service with `external`.
///
/// Fetches remote groups once, then runs the three phases against one
/// mirror. Returns the final mirror alongside the report.
pub fn run<A, C>(
    api: &mut A,
    gate: &mut ConfirmationGate<C>,
    external: &[ExternalUser],
) -> Result<(SyncReport, Mirror), SyncError>
where
    A: DirectoryApi,
    C: Console,
{
    let started_at = Utc::now();
    let mut mirror = Mirror::from_groups(api.fetch_groups()?);
    info!(
        groups = mirror.groups().len(),
        users = mirror.users().len(),
        registry = external.len(),
        mode = ?gate.mode(),
        "fetched remote state"
    );

    let add = add_phase(api, gate, external, &mut mirror)?;
    let delete = delete_phase(api, gate, external, &mut mirror)?;
    let (moves, created_groups) = move_phase(api, gate, external, &mut mirror)?;

    let report = SyncReport {
        started_at,
        finished_at: Utc::now(),
        phases: vec![
            PhaseReport { phase: Phase::Add, outcome: add },
            PhaseReport { phase: Phase::Delete, outcome: delete },
            PhaseReport { phase: Phase::Move, outcome: moves },
        ],
        created_groups,
    };
    Ok((report, mirror))
}

/// Invite registry users missing remotely into the Default group.
///
/// Any refused email ends the run.
pub fn add_phase<A: DirectoryApi, C: Console>(
    api: &mut A,
    gate: &mut ConfirmationGate<C>,
    external: &[ExternalUser],
    mirror: &mut Mirror,
) -> Result<PhaseOutcome, SyncError> {
    let to_add = compute_adds(external, mirror);
    if gate.confirm(ADD_PROMPT, &to_add, &AddFormat)? == Decision::Skip {
        return Ok(skipped(Phase::Add, to_add.len()));
    }

    let emails: Vec<Email> = to_add.into_iter().map(|u| u.email).collect();
    for batch in chunk(&emails, INVITE_BATCH_SIZE) {
        debug!(size = batch.len(), "inviting batch");
        let outcome = api.invite_users(&batch, GroupId::DEFAULT)?;
        if !outcome.not_invited.is_empty() {
            return Err(SyncError::NotInvited {
                emails: outcome.not_invited,
            });
        }
        for email in batch {
            mirror.push_invited(email);
        }
    }
    Ok(applied(Phase::Add, emails.len()))
}

/// Delete remote users the registry no longer lists.
pub fn delete_phase<A: DirectoryApi, C: Console>(
    api: &mut A,
    gate: &mut ConfirmationGate<C>,
    external: &[ExternalUser],
    mirror: &mut Mirror,
) -> Result<PhaseOutcome, SyncError> {
    let to_delete = compute_deletes(external, mirror);
    if gate.confirm(DELETE_PROMPT, &to_delete, &DeleteFormat)? == Decision::Skip {
        return Ok(skipped(Phase::Delete, to_delete.len()));
    }

    let emails: Vec<Email> = to_delete.into_iter().map(|u| u.email).collect();
    for batch in chunk(&emails, DELETE_BATCH_SIZE) {
        debug!(size = batch.len(), "deleting batch");
        api.delete_users(&batch)?;
        for email in &batch {
            mirror.remove(email);
        }
    }
    Ok(applied(Phase::Delete, emails.len()))
}

/// Move users into their registry group, creating missing groups first.
///
/// Returns the outcome and the names of any groups created.
pub fn move_phase<A: DirectoryApi, C: Console>(
    api: &mut A,
    gate: &mut ConfirmationGate<C>,
    external: &[ExternalUser],
    mirror: &mut Mirror,
) -> Result<(PhaseOutcome, Vec<GroupName>), SyncError> {
    let to_move = compute_moves(external, mirror);
    if gate.confirm(MOVE_PROMPT, &to_move, &MoveFormat)? == Decision::Skip {
        return Ok((skipped(Phase::Move, to_move.len()), Vec::new()));
    }

    let missing = find_missing_groups(&to_move, mirror.groups());
    if !missing.is_empty() {
        let groups = provision(api, &missing)?;
        mirror.replace_groups(groups);
    }

    let by_target = group_by_target(&to_move);
    for (target, emails) in &by_target {
        let id = resolve_group_id(mirror.groups(), Some(target))?;
        for batch in chunk(emails, MOVE_BATCH_SIZE) {
            debug!(group = %target, id = %id, size = batch.len(), "moving batch");
            api.move_users(&batch, id)?;
            for email in &batch {
                mirror.apply_move(email, id, target);
            }
        }
    }
    Ok((applied(Phase::Move, to_move.len()), missing))
}

fn group_by_target(to_move: &[RemoteUser]) -> BTreeMap<GroupName, Vec<Email>> {
    let mut by_target: BTreeMap<GroupName, Vec<Email>> = BTreeMap::new();
    for user in to_move {
        if let Some(target) = &user.pending_group {
            by_target
                .entry(target.clone())
                .or_default()
                .push(user.email.clone());
        }
    }
    by_target
}

fn skipped(phase: Phase, planned: usize) -> PhaseOutcome {
    if planned == 0 {
        return PhaseOutcome::NothingToDo;
    }
    info!(%phase, planned, "phase skipped");
    PhaseOutcome::Skipped { planned }
}

fn applied(phase: Phase, count: usize) -> PhaseOutcome {
    info!(%phase, count, "phase applied");
    PhaseOutcome::Applied { count }
}
