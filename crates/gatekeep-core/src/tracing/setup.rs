//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Filter used when `GATEKEEP_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "gatekeep=warn";

/// Filter used when the caller asks for verbose output.
pub const VERBOSE_FILTER: &str = "gatekeep=debug";

/// Initialize the gatekeep tracing/logging system.
///
/// Reads the `GATEKEEP_LOG` environment variable for per-crate log levels,
/// e.g. `GATEKEEP_LOG=gatekeep_analysis=debug,gatekeep_cli=info`.
/// `GATEKEEP_LOG` always wins over `verbose`.
///
/// Logs are written to stderr; stdout is reserved for the gate report.
/// Calling this more than once is a no-op.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        let filter = EnvFilter::try_from_env("GATEKEEP_LOG")
            .unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
