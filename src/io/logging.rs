//! Structured logging setup
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber once. `RUST_LOG` takes precedence over the verbosity flag.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Filter directive for a `-v` count
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing on stderr (idempotent, first call wins)
pub fn init_tracing(verbosity: u8) {
    let directive = format!("tilecollapse={}", level_for_verbosity(verbosity));
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        // A global subscriber may already be installed by an embedding host
        let _ = subscriber.try_init();
    });
}
