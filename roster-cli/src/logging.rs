//! Diagnostic tracing for sync runs.
//!
//! Tracing goes to stderr so prompts and the summary on stdout stay clean.
//! `RUST_LOG` wins when set; otherwise `warn`, or `info` with `--verbose`.
//!
//! ```bash
//! RUST_LOG=roster_sync=debug roster --company-id 42 --psk ... --user-registry users.yaml --what-if
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
