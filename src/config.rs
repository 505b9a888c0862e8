//! Configuration module
//!
//! Read from a TOML file (`~/.config/billing-engine/config.toml` by default).
//! Every key is optional; missing sections fall back to defaults.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "text"      # or "json"
//!
//! [reporting]
//! currency = "USD"
//! quote_currency = "EUR"
//! cost_center_basis = "discounted"   # or "gross"
//! money_precision = 2
//! rate_precision = 4
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::CostCenterBasis;
use crate::shared::errors::InfraError;
use crate::shared::format::{DEFAULT_MONEY_PRECISION, DEFAULT_RATE_PRECISION};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// "text" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    pub currency: String,
    pub quote_currency: String,
    pub cost_center_basis: CostCenterBasis,
    pub money_precision: u32,
    pub rate_precision: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            quote_currency: "EUR".to_string(),
            cost_center_basis: CostCenterBasis::Discounted,
            money_precision: DEFAULT_MONEY_PRECISION,
            rate_precision: DEFAULT_RATE_PRECISION,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(text)?)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billing-engine")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.reporting.rate_precision, 4);
        assert_eq!(cfg.reporting.cost_center_basis, CostCenterBasis::Discounted);
    }

    #[test]
    fn partial_sections_are_merged_with_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [logging]
            format = "json"

            [reporting]
            cost_center_basis = "gross"
            quote_currency = "GBP"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.reporting.cost_center_basis, CostCenterBasis::Gross);
        assert_eq!(cfg.reporting.quote_currency, "GBP");
        assert_eq!(cfg.reporting.currency, "USD");
    }

    #[test]
    fn unknown_basis_is_rejected() {
        let err = AppConfig::from_toml("[reporting]\ncost_center_basis = \"net\"").unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[reporting]\nmoney_precision = 3").unwrap();
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.reporting.money_precision, 3);
    }

    #[test]
    fn default_path_ends_with_crate_dir() {
        assert!(default_config_path().ends_with("billing-engine/config.toml"));
    }
}
