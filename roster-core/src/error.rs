//! Error types for roster-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while reading the external user registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("failed to read user registry at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the file path.
    #[error("failed to parse user registry at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON parse error, with the file path.
    #[error("failed to parse user registry at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file extension is not one of `.yaml`, `.yml` or `.json`.
    #[error("unsupported user registry format at {path}; expected .yaml, .yml or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A record has an empty email.
    #[error("user registry entry #{index} has an empty email")]
    BlankEmail { index: usize },

    /// The same email is listed twice.
    #[error("user registry lists '{email}' more than once")]
    DuplicateEmail { email: String },
}

/// Errors from loading the per-user configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
