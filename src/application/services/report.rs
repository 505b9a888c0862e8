//! Report service: fetch a snapshot, build the report

use std::sync::Arc;

use tracing::info;

use crate::application::reporting::{build_portfolio, build_report, ReportOptions};
use crate::domain::{
    BillingDataSource, BillingError, BillingPeriod, BillingReport, BillingResult, Customer,
    PortfolioReport,
};

/// Service for customer and portfolio reports
pub struct ReportService {
    source: Arc<dyn BillingDataSource>,
    options: ReportOptions,
}

impl ReportService {
    pub fn new(source: Arc<dyn BillingDataSource>, options: ReportOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub async fn customer_report(
        &self,
        customer_id: &str,
        period: BillingPeriod,
    ) -> BillingResult<BillingReport> {
        let snapshot = self
            .source
            .customer_snapshot(customer_id, period)
            .await?
            .ok_or_else(|| BillingError::NotFound {
                entity: "Customer",
                field: "id",
                value: customer_id.to_string(),
            })?;

        let report = build_report(&snapshot, &self.options)?;

        metrics::counter!("billing_reports_built_total").increment(1);
        for notice in &report.notices {
            metrics::counter!("billing_report_notices_total", "kind" => notice.kind()).increment(1);
        }

        info!(
            customer_id,
            period = %period,
            accounts = report.accounts.len(),
            net_cost = %report.customer.net_customer_cost,
            currency = report.currency.as_str(),
            notices = report.notices.len(),
            "Customer report built"
        );

        Ok(report)
    }

    /// Reports for `customer_ids` (all known customers when empty), rolled
    /// up per customer in the order requested.
    pub async fn portfolio_report(
        &self,
        customer_ids: &[String],
        period: BillingPeriod,
    ) -> BillingResult<PortfolioReport> {
        let ids: Vec<String> = if customer_ids.is_empty() {
            self.source
                .list_customers()
                .await?
                .into_iter()
                .map(|c| c.id)
                .collect()
        } else {
            customer_ids.to_vec()
        };

        let mut reports = Vec::with_capacity(ids.len());
        for id in &ids {
            reports.push(self.customer_report(id, period).await?);
        }

        let portfolio = build_portfolio(period, &reports, &self.options);

        info!(
            period = %period,
            customers = portfolio.customers.len(),
            net_cost = %portfolio.totals.net_customer_cost,
            "Portfolio report built"
        );

        Ok(portfolio)
    }

    pub async fn list_customers(&self) -> BillingResult<Vec<Customer>> {
        self.source.list_customers().await
    }
}
