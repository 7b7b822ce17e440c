//! Roster core library — domain types, registry reader, config, errors.
//!
//! - [`types`] — newtypes and user/group records
//! - [`error`] — [`RegistryError`], [`ConfigError`]
//! - [`registry`] — read the external user registry
//! - [`config`] — optional `~/.roster/config.yaml`

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, RegistryError};
pub use types::{
    Email, ExternalUser, GroupId, GroupName, RemoteGroup, RemoteMember, RemoteUser,
};
