//! Console logging for Rivulet drivers.
//!
//! The engine crates only emit `tracing` events. A driver that wants to see
//! them calls [`init`] once at startup; the level is taken from the
//! `RIVULET_LOG` environment variable using `EnvFilter` syntax
//! (for example `RIVULET_LOG=rivulet_core=trace`).

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
pub const ENV_VAR: &str = "RIVULET_LOG";
const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Installs a console subscriber filtered by `RIVULET_LOG` (default `info`).
///
/// Only the first call in a process does anything. If another global
/// subscriber is already set, this one is silently not installed.
pub fn init() {
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Like [`init`] but with an explicit filter, ignoring the environment.
/// Unparseable directives fall back to `info`.
pub fn init_with_filter(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

fn install(filter: EnvFilter) {
    TRACING_INSTALLED.call_once(|| {
        let console = fmt::layer().with_target(true).with_filter(filter);
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_with_filter("rivulet_core=trace");
        init();
        init_with_filter("not a [valid filter");
        tracing::trace!("still alive");
    }
}
