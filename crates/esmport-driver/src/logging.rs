//! Tracing setup for the `esmport` binary.
//!
//! The subscriber is installed only when `ESMPORT_LOG` (or `RUST_LOG`) is
//! set, using the same filter syntax as `RUST_LOG`:
//!
//! ```bash
//! ESMPORT_LOG=debug esmport transform lib/*.js
//! ESMPORT_LOG="esmport_transform=debug" esmport check src/index.js
//! ```

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "ESMPORT_LOG";

/// `ESMPORT_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs the global subscriber writing to stderr.
///
/// Stdout stays reserved for transformed sources.
pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
