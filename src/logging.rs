//! Tracing subscriber setup
//!
//! Logs go to stderr so report output on stdout stays machine-readable.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::AppConfig;
use crate::shared::errors::InfraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Unrecognised names fall back to text.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level;
/// an unparseable level falls back to `info`.
pub fn init_tracing(config: &AppConfig) -> Result<(), InfraError> {
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let layer = match LogFormat::from_name(&config.logging.format) {
        LogFormat::Json => fmt.json().boxed(),
        LogFormat::Text => fmt.boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter(&config.logging.level))
        .with(layer)
        .try_init()?;
    Ok(())
}
