//! Subscriber setup for the `envx` binary

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Quiet human-readable output for interactive CLI use
    Cli,
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Default filter directive when `RUST_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Cli => "envx=warn",
            Profile::Development => "envx=debug",
            Profile::Production => "envx=info",
            Profile::Test => "off",
        }
    }

    /// Select a profile from the `ENVX_LOG_FORMAT` value (`json`, `pretty`)
    ///
    /// Anything else falls back to [`Profile::Cli`].
    pub fn from_log_format(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("json") => Profile::Production,
            Some("pretty") => Profile::Development,
            _ => Profile::Cli,
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

/// Install the global subscriber for `profile`; only the first call counts
///
/// `RUST_LOG` overrides the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Cli | Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(profile))
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(profile))
                .init();
        }
        // Tests install their own capture subscriber
        Profile::Test => {}
    });
}
