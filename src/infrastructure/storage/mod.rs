//! Data source implementations

mod dataset;
mod memory;

pub use dataset::{CustomerEntry, Dataset};
pub use memory::InMemoryBillingData;
