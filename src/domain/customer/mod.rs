pub mod model;

pub use model::{Customer, CustomerCostSummary, CustomerId};
