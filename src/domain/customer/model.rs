//! Customer entity and customer-level cost summary

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::{AccountCostResult, DiscountPolicy, Money};

pub type CustomerId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub discount_policy: DiscountPolicy,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>, discount_policy: DiscountPolicy) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discount_policy,
        }
    }
}

/// Gross, discount and net totals over every account of a customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomerCostSummary {
    pub gross_customer_cost: Money,
    pub discount_applied: Money,
    pub net_customer_cost: Money,
}

impl CustomerCostSummary {
    pub fn zero() -> Self {
        Self {
            gross_customer_cost: Decimal::ZERO,
            discount_applied: Decimal::ZERO,
            net_customer_cost: Decimal::ZERO,
        }
    }
}

impl From<&AccountCostResult> for CustomerCostSummary {
    fn from(result: &AccountCostResult) -> Self {
        Self {
            gross_customer_cost: result.total_cost,
            discount_applied: result.savings,
            net_customer_cost: result.discounted_cost,
        }
    }
}

impl Add for CustomerCostSummary {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for CustomerCostSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.gross_customer_cost += rhs.gross_customer_cost;
        self.discount_applied += rhs.discount_applied;
        self.net_customer_cost += rhs.net_customer_cost;
    }
}

impl Sum for CustomerCostSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
