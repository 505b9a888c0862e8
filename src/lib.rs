//! # Billing cost engine
//!
//! Turns raw per-account usage, fee and credit figures into net cost,
//! customer-facing discounted cost, savings, currency-converted totals and
//! cost-center / payer / customer rollups.
//!
//! ## Architecture
//!
//! - **domain**: Accounts, discount policy, the per-account cost calculator,
//!   report view models and the data-source port
//! - **application**: Report aggregation and the report service
//! - **infrastructure**: In-memory data source, JSON dataset loading
//! - **shared**: Error types and presentation-boundary formatting
//!
//! Calculation and aggregation are pure and synchronous. Only the data-source
//! port and [`ReportService`] are async.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{ReportOptions, ReportService};
pub use domain::{compute_account_cost, AccountCostResult, AccountFigures, DiscountPolicy};
pub use infrastructure::{Dataset, InMemoryBillingData};
pub use shared::errors::{AppError, BillingError, BillingResult, InfraError};
