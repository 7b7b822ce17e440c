//! Group name → identifier resolution.

use roster_core::types::{GroupId, GroupName, RemoteGroup};

use crate::error::SyncError;

/// Resolve `name` against `groups`.
///
/// `None` or an empty name is the Default group and resolves to
/// [`GroupId::DEFAULT`] without searching. Otherwise the first group with an
/// exactly equal name wins.
pub fn resolve_group_id(
    groups: &[RemoteGroup],
    name: Option<&GroupName>,
) -> Result<GroupId, SyncError> {
    let Some(name) = name.filter(|n| !n.0.is_empty()) else {
        return Ok(GroupId::DEFAULT);
    };
    groups
        .iter()
        .find(|g| &g.name == name)
        .map(|g| g.id)
        .ok_or_else(|| SyncError::UnresolvedGroup { name: name.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<RemoteGroup> {
        vec![
            RemoteGroup {
                id: GroupId::DEFAULT,
                name: GroupName::from("Default"),
                members: vec![],
            },
            RemoteGroup {
                id: GroupId(5),
                name: GroupName::from("Admins"),
                members: vec![],
            },
            RemoteGroup {
                id: GroupId(9),
                name: GroupName::from("Admins"),
                members: vec![],
            },
        ]
    }

    #[test]
    fn none_and_empty_are_default_without_search() {
        assert_eq!(resolve_group_id(&[], None).expect("none"), GroupId::DEFAULT);
        assert_eq!(
            resolve_group_id(&[], Some(&GroupName::from(""))).expect("empty"),
            GroupId::DEFAULT
        );
    }

    #[test]
    fn first_exact_match_wins() {
        let id = resolve_group_id(&groups(), Some(&GroupName::from("Admins"))).expect("resolve");
        assert_eq!(id, GroupId(5));
    }

    #[test]
    fn match_is_case_sensitive() {
        let err = resolve_group_id(&groups(), Some(&GroupName::from("admins"))).unwrap_err();
        assert!(matches!(err, SyncError::UnresolvedGroup { ref name } if name.0 == "admins"));
    }
}
