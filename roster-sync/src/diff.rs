//! Three-way comparison of the external registry against the mirror.
//!
//! Email is the identity key. The three action sets are disjoint by
//! construction: adds are absent from the mirror, deletes are absent from the
//! registry, moves are present in both.

use std::collections::HashSet;

use roster_core::types::{Email, ExternalUser, RemoteUser};

use crate::gate::ActionFormat;
use crate::mirror::Mirror;

/// Registry users with no remote account yet.
pub fn compute_adds(external: &[ExternalUser], mirror: &Mirror) -> Vec<ExternalUser> {
    let remote: HashSet<&Email> = mirror.users().iter().map(|u| &u.email).collect();
    external
        .iter()
        .filter(|u| !remote.contains(&u.email))
        .cloned()
        .collect()
}

/// Remote users that the registry no longer lists, in mirror order.
pub fn compute_deletes(external: &[ExternalUser], mirror: &Mirror) -> Vec<RemoteUser> {
    let wanted: HashSet<&Email> = external.iter().map(|u| &u.email).collect();
    mirror
        .users()
        .iter()
        .filter(|u| !wanted.contains(&u.email))
        .cloned()
        .collect()
}

/// Remote users whose group differs from the registry's effective group.
///
/// An empty or missing registry group means the Default group. Each matched
/// mirror entry gets its `pending_group` set to the target; the returned
/// list carries the same marking. Registry users not in the mirror are
/// ignored, and each email yields at most one move.
pub fn compute_moves(external: &[ExternalUser], mirror: &mut Mirror) -> Vec<RemoteUser> {
    let default = mirror.default_group();
    let mut seen = HashSet::new();
    let mut moves = Vec::new();

    for wanted in external {
        if !seen.insert(&wanted.email) {
            continue;
        }
        let target = wanted.requested_group().unwrap_or(&default);
        let Some(remote) = mirror
            .users_mut()
            .iter_mut()
            .find(|u| u.email == wanted.email)
        else {
            continue;
        };
        if &remote.group_name == target {
            remote.pending_group = None;
            continue;
        }
        remote.pending_group = Some(target.clone());
        moves.push(remote.clone());
    }
    moves
}

/// Listing format for the add phase.
pub struct AddFormat;

impl ActionFormat for AddFormat {
    type Item = ExternalUser;

    fn format(&self, item: &ExternalUser) -> String {
        match item.requested_group() {
            Some(group) => format!("{} [{}]", item.email, group),
            None => item.email.to_string(),
        }
    }
}

/// Listing format for the delete phase.
pub struct DeleteFormat;

impl ActionFormat for DeleteFormat {
    type Item = RemoteUser;

    fn format(&self, item: &RemoteUser) -> String {
        format!("{} [{}]", item.email, item.group_name)
    }
}

/// Listing format for the move phase.
pub struct MoveFormat;

impl ActionFormat for MoveFormat {
    type Item = RemoteUser;

    fn format(&self, item: &RemoteUser) -> String {
        match &item.pending_group {
            Some(target) => format!("{}: {} -> {}", item.email, item.group_name, target),
            None => format!("{}: {}", item.email, item.group_name),
        }
    }
}
