//! In-process mirror of remote state for one run.
//!
//! Built once from the fetched group listing and updated optimistically as
//! each phase applies, so later phases see earlier effects without another
//! fetch. No two users in the mirror share an email.

use std::collections::HashSet;

use roster_core::types::{Email, GroupId, GroupName, RemoteGroup, RemoteUser};
use tracing::warn;

/// Name used for the Default group when the listing is empty.
pub const DEFAULT_GROUP_NAME: &str = "Default";

/// Remote users flattened out of their groups, plus the group snapshot used
/// for name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    groups: Vec<RemoteGroup>,
    users: Vec<RemoteUser>,
}

impl Mirror {
    /// Flatten `groups` into one user list, keeping the first occurrence of
    /// any email listed in more than one group.
    pub fn from_groups(groups: Vec<RemoteGroup>) -> Self {
        let mut seen = HashSet::new();
        let mut users = Vec::new();
        for group in &groups {
            for member in &group.members {
                if !seen.insert(member.email.clone()) {
                    warn!(
                        email = %member.email,
                        group = %group.name,
                        "email listed in more than one remote group; keeping first"
                    );
                    continue;
                }
                users.push(RemoteUser::new(
                    member.email.clone(),
                    group.id,
                    group.name.clone(),
                ));
            }
        }
        Self { groups, users }
    }

    pub fn groups(&self) -> &[RemoteGroup] {
        &self.groups
    }

    pub fn users(&self) -> &[RemoteUser] {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut [RemoteUser] {
        &mut self.users
    }

    /// Name of the Default group: the first group of the listing.
    pub fn default_group(&self) -> GroupName {
        self.groups
            .first()
            .map(|g| g.name.clone())
            .unwrap_or_else(|| GroupName::from(DEFAULT_GROUP_NAME))
    }

    pub fn contains(&self, email: &Email) -> bool {
        self.users.iter().any(|u| &u.email == email)
    }

    /// Record a newly invited user under the Default group. Emails already
    /// present are left alone.
    pub fn push_invited(&mut self, email: Email) {
        if self.contains(&email) {
            return;
        }
        let default = self.default_group();
        self.users
            .push(RemoteUser::new(email, GroupId::DEFAULT, default));
    }

    /// Drop a deleted user.
    pub fn remove(&mut self, email: &Email) -> Option<RemoteUser> {
        let idx = self.users.iter().position(|u| &u.email == email)?;
        Some(self.users.remove(idx))
    }

    /// Consume a user's pending move into `group`.
    pub fn apply_move(&mut self, email: &Email, id: GroupId, group: &GroupName) {
        if let Some(user) = self.users.iter_mut().find(|u| &u.email == email) {
            user.group_id = id;
            user.group_name = group.clone();
            user.pending_group = None;
        }
    }

    /// Swap in a freshly fetched group listing. Users are kept as they are.
    pub fn replace_groups(&mut self, groups: Vec<RemoteGroup>) {
        self.groups = groups;
    }
}

#[cfg(test)]
mod tests {
    use roster_core::types::RemoteMember;

    use super::*;

    fn group(id: i64, name: &str, members: &[&str]) -> RemoteGroup {
        RemoteGroup {
            id: GroupId(id),
            name: GroupName::from(name),
            members: members
                .iter()
                .map(|e| RemoteMember {
                    email: Email::from(*e),
                })
                .collect(),
        }
    }

    #[test]
    fn flattens_members_with_their_group() {
        let mirror = Mirror::from_groups(vec![
            group(-1, "Default", &["john@x"]),
            group(5, "Admins", &["bob@x"]),
        ]);
        assert_eq!(
            mirror.users(),
            [
                RemoteUser::new("john@x", GroupId::DEFAULT, "Default"),
                RemoteUser::new("bob@x", GroupId(5), "Admins"),
            ]
        );
        assert_eq!(mirror.default_group(), GroupName::from("Default"));
    }

    #[test]
    fn duplicate_remote_email_keeps_first_group() {
        let mirror = Mirror::from_groups(vec![
            group(-1, "Default", &["a@x"]),
            group(5, "Admins", &["a@x"]),
        ]);
        assert_eq!(mirror.users().len(), 1);
        assert_eq!(mirror.users()[0].group_id, GroupId::DEFAULT);
    }

    #[test]
    fn default_name_follows_first_group() {
        let mirror = Mirror::from_groups(vec![group(-1, "Everyone", &[])]);
        assert_eq!(mirror.default_group(), GroupName::from("Everyone"));
        assert_eq!(
            Mirror::from_groups(vec![]).default_group(),
            GroupName::from(DEFAULT_GROUP_NAME)
        );
    }

    #[test]
    fn push_invited_is_unique_by_email() {
        let mut mirror = Mirror::from_groups(vec![group(-1, "Default", &["a@x"])]);
        mirror.push_invited(Email::from("a@x"));
        mirror.push_invited(Email::from("b@x"));
        assert_eq!(mirror.users().len(), 2);
        assert_eq!(mirror.users()[1], RemoteUser::new("b@x", GroupId::DEFAULT, "Default"));
    }

    #[test]
    fn remove_and_apply_move() {
        let mut mirror = Mirror::from_groups(vec![
            group(-1, "Default", &["a@x", "b@x"]),
            group(5, "Admins", &[]),
        ]);
        assert!(mirror.remove(&Email::from("a@x")).is_some());
        assert!(mirror.remove(&Email::from("a@x")).is_none());

        mirror.users_mut()[0].pending_group = Some(GroupName::from("Admins"));
        mirror.apply_move(&Email::from("b@x"), GroupId(5), &GroupName::from("Admins"));
        let b = &mirror.users()[0];
        assert_eq!((b.group_id, b.group_name.as_str()), (GroupId(5), "Admins"));
        assert!(b.pending_group.is_none());
    }
}
