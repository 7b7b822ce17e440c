//! # roster-sync
//!
//! Reconciliation engine: diff the external registry against remote state
//! and apply the difference through a [`DirectoryApi`] in three gated
//! phases.
//!
//! Call [`pipeline::run`] with an API client, a [`ConfirmationGate`] and
//! the registry records.

pub mod api;
pub mod batch;
pub mod diff;
pub mod error;
pub mod gate;
pub mod mirror;
pub mod pipeline;
pub mod provision;
pub mod resolve;

pub use api::{DirectoryApi, InviteOutcome};
pub use error::{ApiError, SyncError};
pub use gate::{ActionFormat, ConfirmationGate, Console, Decision, RunMode};
pub use mirror::Mirror;
pub use pipeline::{Phase, PhaseOutcome, PhaseReport, SyncReport};
