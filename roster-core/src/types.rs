//! Domain types shared by the registry reader, the sync engine and the CLI.
//!
//! Email is the identity key on both sides of a sync. Comparison is exact
//! and case-sensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A user's email address, used as the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(pub String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Email {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Email {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A remote group's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(pub String);

impl GroupName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GroupName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque remote group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl GroupId {
    /// The immutable "Default" group every new user lands in.
    pub const DEFAULT: GroupId = GroupId(-1);

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Source-of-truth records
// ---------------------------------------------------------------------------

/// One desired user as listed by the external registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUser {
    pub email: Email,
    /// Desired group. `None` or an empty name means the Default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupName>,
}

impl ExternalUser {
    pub fn new(email: impl Into<Email>, group: Option<&str>) -> Self {
        Self {
            email: email.into(),
            group: group.map(GroupName::from),
        }
    }

    /// The requested group name, or `None` when the Default group is meant.
    pub fn requested_group(&self) -> Option<&GroupName> {
        self.group.as_ref().filter(|g| !g.0.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Remote records
// ---------------------------------------------------------------------------

/// A member entry as nested in the remote group listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMember {
    pub email: Email,
}

/// A remote group with its members. The first group of a listing is the
/// Default group by API convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteGroup {
    pub id: GroupId,
    pub name: GroupName,
    #[serde(default)]
    pub members: Vec<RemoteMember>,
}

/// A user as currently known on the remote side, attributed to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    pub email: Email,
    pub group_id: GroupId,
    pub group_name: GroupName,
    /// Target group of a planned move; consumed when the move is applied.
    pub pending_group: Option<GroupName>,
}

impl RemoteUser {
    pub fn new(email: impl Into<Email>, group_id: GroupId, group_name: impl Into<GroupName>) -> Self {
        Self {
            email: email.into(),
            group_id,
            group_name: group_name.into(),
            pending_group: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
