//! Stable exit codes for the roster CLI.

use roster_sync::SyncError;

/// Run completed (including what-if runs and skipped phases).
pub const OK: i32 = 0;
/// Registry, config or remote API failure.
pub const FAILED: i32 = 1;
/// The operator answered Abort. Distinct from clap's usage error code 2.
pub const ABORTED: i32 = 3;

/// Map a run error to its exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    let aborted = err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<SyncError>(), Some(SyncError::Aborted)));
    if aborted {
        ABORTED
    } else {
        FAILED
    }
}
