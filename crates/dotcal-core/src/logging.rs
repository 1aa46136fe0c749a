#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! host's decision. Hosts that want the default formatting call [`init`]
//! (requires the `logging` feature).
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DOTCAL_LOG` | `info` | `EnvFilter` directives, e.g. `dotcal_tutorial=debug` |

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "DOTCAL_LOG";

/// Default filter when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Returns `false` if a global subscriber was already installed, which is
/// common in tests that share a process.
#[cfg(feature = "logging")]
pub fn init() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    result.is_ok()
}

#[cfg(all(test, feature = "logging"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init();
        assert!(!init());
    }
}
