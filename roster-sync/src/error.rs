//! Error types for roster-sync.

use thiserror::Error;

use roster_core::types::{Email, GroupName};

/// Failures reported by a [`DirectoryApi`](crate::api::DirectoryApi)
/// implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS or timeout failure before a response arrived.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The service answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that can end a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The operator answered Abort at a confirmation prompt.
    #[error("sync aborted by user")]
    Aborted,

    /// The invite endpoint refused some of the submitted emails.
    #[error("{} user(s) were not invited: {}", .emails.len(), join_emails(.emails))]
    NotInvited { emails: Vec<Email> },

    /// A remote call failed.
    #[error("remote API error: {0}")]
    Api(#[from] ApiError),

    /// A group name has no identifier even after provisioning.
    #[error("group '{name}' could not be resolved to an identifier")]
    UnresolvedGroup { name: GroupName },

    /// Reading an answer from, or writing to, the console failed.
    #[error("console I/O error: {0}")]
    Prompt(#[from] std::io::Error),
}

fn join_emails(emails: &[Email]) -> String {
    emails
        .iter()
        .map(Email::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
