//! Usage account aggregate
//!
//! Contains the account figures, the customer discount policy and the
//! per-account cost calculator.

pub mod model;

pub use model::{
    compute_account_cost, AccountCostResult, AccountFigures, AccountId, AccountRecord,
    DiscountPolicy, Money, Percentage,
};
