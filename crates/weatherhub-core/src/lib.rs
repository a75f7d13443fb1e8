pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, UiConfig, ValidationResult, DEFAULT_API_URL};
pub use error::{AppError, AuthError, StorageError};

use anyhow::Result;

/// Initialize logging for the WeatherHub binaries.
///
/// Honors `RUST_LOG`; falls back to `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::debug!("WeatherHub core initialized");
    Ok(())
}
