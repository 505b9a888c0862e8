//! Domain ports
//!
//! Trait contracts the aggregation core depends on and adapters implement.

pub mod data_source;

pub use data_source::{BillingDataSource, CustomerSnapshot};
