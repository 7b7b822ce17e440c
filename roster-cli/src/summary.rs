//! End-of-run summary table.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use roster_sync::{PhaseOutcome, RunMode, SyncReport};

#[derive(Tabled)]
struct PhaseRow {
    #[tabled(rename = "phase")]
    phase: String,
    #[tabled(rename = "planned")]
    planned: usize,
    #[tabled(rename = "outcome")]
    outcome: String,
}

/// Render the report as a headline plus one table row per phase.
pub fn render(report: &SyncReport, mode: RunMode) -> String {
    let prefix = if mode == RunMode::DryRun { "[what-if] " } else { "" };
    let elapsed_ms = (report.finished_at - report.started_at).num_milliseconds();

    if report.is_in_sync() {
        return format!(
            "{prefix}{} remote directory already matches the registry ({elapsed_ms} ms)",
            "✓".green().bold()
        );
    }

    let rows: Vec<PhaseRow> = report
        .phases
        .iter()
        .map(|p| PhaseRow {
            phase: p.phase.to_string(),
            planned: p.outcome.planned(),
            outcome: outcome_label(&p.outcome, mode).to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let mut out = format!("{prefix}sync finished in {elapsed_ms} ms\n{table}");
    if !report.created_groups.is_empty() {
        let names: Vec<&str> = report.created_groups.iter().map(|g| g.as_str()).collect();
        out.push_str(&format!("\ncreated groups: {}", names.join(", ")));
    }
    out
}

fn outcome_label(outcome: &PhaseOutcome, mode: RunMode) -> &'static str {
    match outcome {
        PhaseOutcome::NothingToDo => "nothing to do",
        PhaseOutcome::Skipped { .. } if mode == RunMode::DryRun => "would apply",
        PhaseOutcome::Skipped { .. } => "skipped",
        PhaseOutcome::Applied { .. } => "applied",
    }
}
