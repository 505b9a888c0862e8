//! Report view models
//!
//! Derived values only: breakdowns, balances, exchange summaries and the
//! full customer and portfolio reports.

pub mod model;
pub mod period;

pub use model::{
    AccountCostRow, BillingReport, CostBreakdown, CostCategory, CostCategoryRow, CustomerCostRow,
    ExchangeRate, ExchangeRateSummary, PayerAccountBalance, PortfolioReport, ReportNotice,
};
pub use period::BillingPeriod;
