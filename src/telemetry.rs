//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to every
/// target.
///
/// # Errors
///
/// Returns an error when the filter cannot be parsed or a global
/// subscriber is already installed.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level.to_lowercase()))?;
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
