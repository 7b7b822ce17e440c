//! The remote account-management service as seen by the sync engine.
//!
//! Every call is blocking and fully consumed before the next one starts.

use roster_core::types::{Email, GroupId, GroupName, RemoteGroup};

use crate::error::ApiError;

/// Answer of the invite endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteOutcome {
    /// Submitted emails the service did not accept.
    pub not_invited: Vec<Email>,
}

/// Remote user/group store.
pub trait DirectoryApi {
    /// All groups with their members. The first group is the Default group.
    fn fetch_groups(&mut self) -> Result<Vec<RemoteGroup>, ApiError>;

    /// Invite `emails` into `group`.
    fn invite_users(&mut self, emails: &[Email], group: GroupId)
        -> Result<InviteOutcome, ApiError>;

    /// Remove `emails` from the account. All-or-nothing per call.
    fn delete_users(&mut self, emails: &[Email]) -> Result<(), ApiError>;

    /// Create an empty group. The new identifier is not returned.
    fn create_group(&mut self, name: &GroupName) -> Result<(), ApiError>;

    /// Move existing users into `group`.
    fn move_users(&mut self, emails: &[Email], group: GroupId) -> Result<(), ApiError>;
}
