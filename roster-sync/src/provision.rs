//! Creation of move-target groups that do not exist remotely yet.

use roster_core::types::{GroupName, RemoteGroup, RemoteUser};
use tracing::{debug, info};

use crate::api::DirectoryApi;
use crate::error::SyncError;

/// Distinct pending target names of `to_move` with no group of that exact
/// name in `groups`, in order of first appearance.
pub fn find_missing_groups(to_move: &[RemoteUser], groups: &[RemoteGroup]) -> Vec<GroupName> {
    let mut missing: Vec<GroupName> = Vec::new();
    for name in to_move.iter().filter_map(|u| u.pending_group.as_ref()) {
        if groups.iter().any(|g| &g.name == name) || missing.contains(name) {
            continue;
        }
        missing.push(name.clone());
    }
    missing
}

/// Create every group in `missing`, then fetch the full listing again so the
/// new identifiers can be resolved.
///
/// The first failed creation ends the run; groups created before it stay.
pub fn provision<A: DirectoryApi>(
    api: &mut A,
    missing: &[GroupName],
) -> Result<Vec<RemoteGroup>, SyncError> {
    for name in missing {
        debug!(group = %name, "creating group");
        api.create_group(name)?;
    }
    info!(created = missing.len(), "groups created; refreshing group list");
    Ok(api.fetch_groups()?)
}

#[cfg(test)]
mod tests {
    use roster_core::types::GroupId;

    use super::*;

    fn moving(email: &str, target: &str) -> RemoteUser {
        let mut user = RemoteUser::new(email, GroupId::DEFAULT, "Default");
        user.pending_group = Some(GroupName::from(target));
        user
    }

    fn existing(id: i64, name: &str) -> RemoteGroup {
        RemoteGroup {
            id: GroupId(id),
            name: GroupName::from(name),
            members: vec![],
        }
    }

    #[test]
    fn missing_groups_are_distinct_and_ordered() {
        let to_move = [
            moving("a@x", "Engineers"),
            moving("b@x", "Admins"),
            moving("c@x", "Sales"),
            moving("d@x", "Engineers"),
        ];
        let groups = [existing(-1, "Default"), existing(5, "Admins")];
        assert_eq!(
            find_missing_groups(&to_move, &groups),
            [GroupName::from("Engineers"), GroupName::from("Sales")]
        );
    }

    #[test]
    fn nothing_missing_when_all_targets_exist() {
        let to_move = [moving("a@x", "Admins"), moving("b@x", "Default")];
        let groups = [existing(-1, "Default"), existing(5, "Admins")];
        assert!(find_missing_groups(&to_move, &groups).is_empty());
    }

    #[test]
    fn group_name_match_is_exact() {
        let to_move = [moving("a@x", "admins")];
        let groups = [existing(5, "Admins")];
        assert_eq!(find_missing_groups(&to_move, &groups), [GroupName::from("admins")]);
    }
}
