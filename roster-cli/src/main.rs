//! Roster — reconcile a user registry into a remote account service.
//!
//! # Usage
//!
//! ```text
//! roster --company-id <ID> --psk <KEY> --user-registry <PATH> [--what-if | --confirm]
//!        [--api-url <URL>] [--verbose]
//! ```
//!
//! Without `--what-if` or `--confirm` every phase (invite, delete, move)
//! asks for confirmation.

mod console;
mod exit_codes;
mod http;
mod logging;
mod summary;
mod sync;

use clap::Parser;
use colored::Colorize;

use sync::SyncArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Sync a user registry's members and groups into a remote account service",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    logging::init(cli.sync.verbose);

    let code = match cli.sync.run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            exit_codes::for_error(&err)
        }
    };
    std::process::exit(code);
}
