//! External user registry reader.
//!
//! The registry is a flat list of `{email, group}` records, stored as YAML
//! or JSON and selected by file extension:
//!
//! ```yaml
//! - email: jane@example.com
//!   group: Admins
//! - email: john@example.com      # no group: Default
//! ```
//!
//! The list is validated on load: every email must be non-blank and appear
//! once.

use std::collections::HashSet;
use std::path::Path;

use crate::error::RegistryError;
use crate::types::ExternalUser;

/// Supported on-disk registry encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Yaml,
    Json,
}

impl RegistryFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Read and validate the registry at `path`.
pub fn read_at(path: &Path) -> Result<Vec<ExternalUser>, RegistryError> {
    let format = RegistryFormat::from_path(path).ok_or_else(|| {
        RegistryError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    })?;
    let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&contents, format, path)
}

fn parse(
    contents: &str,
    format: RegistryFormat,
    path: &Path,
) -> Result<Vec<ExternalUser>, RegistryError> {
    let users: Vec<ExternalUser> = match format {
        // An empty YAML document is an empty registry, not a parse error.
        RegistryFormat::Yaml if contents.trim().is_empty() => Vec::new(),
        RegistryFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| RegistryError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?,
        RegistryFormat::Json => serde_json::from_str(contents).map_err(|e| RegistryError::Json {
            path: path.to_path_buf(),
            source: e,
        })?,
    };
    validate(&users)?;
    Ok(users)
}

/// Reject blank and duplicate emails.
pub fn validate(users: &[ExternalUser]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(users.len());
    for (index, user) in users.iter().enumerate() {
        if user.email.0.trim().is_empty() {
            return Err(RegistryError::BlankEmail { index });
        }
        if !seen.insert(user.email.as_str()) {
            return Err(RegistryError::DuplicateEmail {
                email: user.email.0.clone(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Email, GroupName};
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("users.yaml")
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(RegistryFormat::from_path(Path::new("a.yml")), Some(RegistryFormat::Yaml));
        assert_eq!(RegistryFormat::from_path(Path::new("a.YAML")), Some(RegistryFormat::Yaml));
        assert_eq!(RegistryFormat::from_path(Path::new("a.json")), Some(RegistryFormat::Json));
        assert_eq!(RegistryFormat::from_path(Path::new("a.csv")), None);
        assert_eq!(RegistryFormat::from_path(Path::new("users")), None);
    }

    #[test]
    fn yaml_group_may_be_missing_null_or_empty() {
        let yaml = "- email: a@x\n- email: b@x\n  group: null\n- email: c@x\n  group: ''\n- email: d@x\n  group: Ops\n";
        let users = parse(yaml, RegistryFormat::Yaml, &p()).expect("parse");
        assert_eq!(users.len(), 4);
        assert!(users[..3].iter().all(|u| u.requested_group().is_none()));
        assert_eq!(users[3].group, Some(GroupName::from("Ops")));
    }

    #[test]
    fn empty_yaml_is_empty_registry() {
        let users = parse("  \n", RegistryFormat::Yaml, &p()).expect("parse");
        assert!(users.is_empty());
    }

    #[test]
    fn duplicate_email_rejected() {
        let json = r#"[{"email":"a@x"},{"email":"a@x","group":"Ops"}]"#;
        let err = parse(json, RegistryFormat::Json, &p()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateEmail { ref email } if email == "a@x"));
    }

    #[test]
    fn emails_differing_only_in_case_are_distinct() {
        let json = r#"[{"email":"a@x"},{"email":"A@x"}]"#;
        let users = parse(json, RegistryFormat::Json, &p()).expect("parse");
        assert_eq!(users[1].email, Email::from("A@x"));
    }

    #[test]
    fn blank_email_rejected_with_index() {
        let json = r#"[{"email":"a@x"},{"email":"  "}]"#;
        let err = parse(json, RegistryFormat::Json, &p()).unwrap_err();
        assert!(matches!(err, RegistryError::BlankEmail { index: 1 }));
    }
}
