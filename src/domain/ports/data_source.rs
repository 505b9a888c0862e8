//! Outbound port: where report input comes from
//!
//! The aggregation core never fetches anything itself. A [`BillingDataSource`]
//! hands it one [`CustomerSnapshot`] per report, read in a single call so all
//! accounts of a report come from the same consistent view.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountRecord;
use crate::domain::cost_center::CostCenter;
use crate::domain::customer::Customer;
use crate::domain::report::{BillingPeriod, ExchangeRate};
use crate::shared::errors::BillingResult;

/// Everything one customer report is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer: Customer,
    pub period: BillingPeriod,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub cost_centers: Vec<CostCenter>,
    #[serde(default)]
    pub exchange_rate: ExchangeRate,
}

#[async_trait]
pub trait BillingDataSource: Send + Sync {
    /// Consistent snapshot for one customer and period, `None` if the
    /// customer is unknown. A known customer with no usage yields a
    /// snapshot with no accounts.
    async fn customer_snapshot(
        &self,
        customer_id: &str,
        period: BillingPeriod,
    ) -> BillingResult<Option<CustomerSnapshot>>;

    async fn list_customers(&self) -> BillingResult<Vec<Customer>>;
}
