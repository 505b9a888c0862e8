//! JSON dataset files for seeding the in-memory data source
//!
//! ```json
//! {
//!   "exchange_rate": { "rate": "0.92" },
//!   "period_rates": { "2026-09": { "rate": "0.91" } },
//!   "customers": [
//!     {
//!       "id": "acme",
//!       "name": "Acme Corp",
//!       "discount_policy": { "customer_discount_percent": "10", "rebate_credits_enabled": true },
//!       "cost_centers": [ { "id": "cc-1", "name": "Platform", "linked_usage_account_ids": ["u-1"] } ],
//!       "usage": { "2026-09": [ { "id": "u-1", "usage": "10000", "fee": "100", "credit": "500" } ] }
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::memory::InMemoryBillingData;
use crate::domain::{AccountRecord, BillingPeriod, CostCenter, Customer, ExchangeRate};
use crate::shared::errors::InfraError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub exchange_rate: Option<ExchangeRate>,
    #[serde(default)]
    pub period_rates: HashMap<BillingPeriod, ExchangeRate>,
    #[serde(default)]
    pub customers: Vec<CustomerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerEntry {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(default)]
    pub cost_centers: Vec<CostCenter>,
    #[serde(default)]
    pub usage: HashMap<BillingPeriod, Vec<AccountRecord>>,
}

impl Dataset {
    pub fn from_json(text: &str) -> Result<Self, InfraError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let text = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            customers = dataset.customers.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

impl InMemoryBillingData {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let data = Self::new();
        if let Some(rate) = dataset.exchange_rate {
            data.set_exchange_rate(rate);
        }
        for (period, rate) in dataset.period_rates {
            data.set_period_exchange_rate(period, rate);
        }
        for entry in dataset.customers {
            let id = entry.customer.id.clone();
            data.upsert_customer(entry.customer);
            data.set_cost_centers(&id, entry.cost_centers);
            for (period, accounts) in entry.usage {
                data.record_accounts(&id, period, accounts);
            }
        }
        data
    }

    pub fn load_json(path: &Path) -> Result<Self, InfraError> {
        Dataset::load(path).map(Self::from_dataset)
    }
}
