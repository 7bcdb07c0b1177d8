//! Logging
//!
//! Structured logs go to stderr so they never mix with the generator's
//! progress output on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Filter directive for a `-v` count
///
/// `RUST_LOG` takes precedence over this when set.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,modforge=info",
        2 => "info,modforge=debug",
        _ => "debug,modforge=trace",
    }
}

/// Initialize the global subscriber
///
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```rust,no_run
/// use modforge::observability::{self, LogFormat};
///
/// observability::init(1, LogFormat::Compact);
/// tracing::info!("Generator started");
/// ```
pub fn init(verbosity: u8, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Subscriber already installed");
    }
}
