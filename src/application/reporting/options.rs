//! Report rendering options

use crate::config::AppConfig;
use crate::domain::CostCenterBasis;
use crate::shared::format::{DEFAULT_MONEY_PRECISION, DEFAULT_RATE_PRECISION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Currency the account figures are denominated in.
    pub currency: String,
    /// Currency the exchange widget converts into.
    pub quote_currency: String,
    pub cost_center_basis: CostCenterBasis,
    pub money_precision: u32,
    pub rate_precision: u32,
}

impl Default for ReportOptions {
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

impl From<&AppConfig> for ReportOptions {
    fn from(cfg: &AppConfig) -> Self {
        let reporting = &cfg.reporting;
        Self {
            currency: reporting.currency.clone(),
            quote_currency: reporting.quote_currency.clone(),
            cost_center_basis: reporting.cost_center_basis,
            money_precision: reporting.money_precision,
            rate_precision: reporting.rate_precision,
        }
    }
}
