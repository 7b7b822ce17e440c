//! `roster` — read the registry, diff it against the remote service, apply.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use roster_core::{config, registry};
use roster_sync::{pipeline, ConfirmationGate, RunMode};

use crate::console::TerminalConsole;
use crate::http::HttpDirectoryApi;
use crate::summary;

/// Arguments for a sync run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Company identifier on the remote service.
    #[arg(long, alias = "CompanyId", env = "ROSTER_COMPANY_ID")]
    pub company_id: String,

    /// Pre-shared API key.
    #[arg(long, alias = "Psk", env = "ROSTER_PSK", hide_env_values = true)]
    pub psk: String,

    /// User registry file (.yaml, .yml or .json) listing `email` and `group`.
    #[arg(long, alias = "UserRegistry", value_name = "PATH")]
    pub user_registry: PathBuf,

    /// Show the planned changes without applying any of them.
    #[arg(long, alias = "WhatIf", conflicts_with = "confirm")]
    pub what_if: bool,

    /// Apply every planned change without asking.
    #[arg(long, alias = "Confirm")]
    pub confirm: bool,

    /// Remote API base URL (overrides `api_url` in ~/.roster/config.yaml).
    #[arg(long, env = "ROSTER_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Log phase progress to stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl SyncArgs {
    pub fn mode(&self) -> RunMode {
        if self.what_if {
            RunMode::DryRun
        } else if self.confirm {
            RunMode::AutoConfirm
        } else {
            RunMode::Interactive
        }
    }

    pub fn run(self) -> Result<()> {
        let config = config::load().context("failed to load ~/.roster/config.yaml")?;
        let external = registry::read_at(&self.user_registry).with_context(|| {
            format!(
                "failed to load user registry '{}'",
                self.user_registry.display()
            )
        })?;

        let mode = self.mode();
        let api_url = config.api_url_or(self.api_url.as_deref());
        tracing::info!(%api_url, users = external.len(), ?mode, "starting sync");

        let mut api = HttpDirectoryApi::new(
            &api_url,
            &self.company_id,
            &self.psk,
            Duration::from_secs(config.timeout_secs()),
        );
        let mut gate = ConfirmationGate::new(TerminalConsole::stdio(), mode);

        let (report, _) = pipeline::run(&mut api, &mut gate, &external)
            .with_context(|| format!("sync failed for company '{}'", self.company_id))?;

        println!("{}", summary::render(&report, mode));
        Ok(())
    }
}
