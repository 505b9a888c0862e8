pub mod account;
pub mod cost_center;
pub mod customer;
pub mod ports;
pub mod report;

// Re-export commonly used types
pub use account::{
    compute_account_cost, AccountCostResult, AccountFigures, AccountId, AccountRecord,
    DiscountPolicy, Money, Percentage,
};
pub use cost_center::{CostCenter, CostCenterBalance, CostCenterBasis, CostCenterId};
pub use customer::{Customer, CustomerCostSummary, CustomerId};
pub use ports::{BillingDataSource, CustomerSnapshot};
pub use report::{
    AccountCostRow, BillingPeriod, BillingReport, CostBreakdown, CostCategory, CostCategoryRow,
    CustomerCostRow, ExchangeRate, ExchangeRateSummary, PayerAccountBalance, PortfolioReport,
    ReportNotice,
};

pub use crate::shared::errors::{BillingError, BillingResult};
