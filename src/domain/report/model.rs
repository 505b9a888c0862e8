//! Report view-model types

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::{AccountCostResult, AccountFigures, AccountId, Money};
use crate::domain::cost_center::{CostCenterBalance, CostCenterId};
use crate::domain::customer::{CustomerCostSummary, CustomerId};
use crate::shared::errors::{BillingError, BillingResult};

use super::BillingPeriod;

// ── Cost breakdown ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Usage,
    Tax,
    Fee,
    Discount,
    Credits,
    Adjustment,
}

impl CostCategory {
    /// Display order of breakdown rows.
    pub const ALL: [CostCategory; 6] = [
        Self::Usage,
        Self::Tax,
        Self::Fee,
        Self::Discount,
        Self::Credits,
        Self::Adjustment,
    ];
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage => write!(f, "Usage"),
            Self::Tax => write!(f, "Tax"),
            Self::Fee => write!(f, "Fee"),
            Self::Discount => write!(f, "Discount"),
            Self::Credits => write!(f, "Credits"),
            Self::Adjustment => write!(f, "Adjustment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostCategoryRow {
    pub category: CostCategory,
    pub amount: Money,
}

/// Category sums across accounts. `discount` is stored as a negative amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub usage: Money,
    pub tax: Money,
    pub fee: Money,
    pub discount: Money,
    pub credits: Money,
    pub adjustment: Money,
}

impl CostBreakdown {
    /// Breakdown contribution of a single account.
    pub fn for_account(figures: &AccountFigures, result: &AccountCostResult) -> Self {
        Self {
            usage: figures.usage,
            tax: figures.tax,
            fee: figures.fee,
            discount: -result.savings,
            credits: result.credit_applied,
            adjustment: figures.adjustment,
        }
    }

    pub fn total(&self) -> Money {
        self.usage + self.tax + self.fee + self.discount + self.credits + self.adjustment
    }

    pub fn amount(&self, category: CostCategory) -> Money {
        match category {
            CostCategory::Usage => self.usage,
            CostCategory::Tax => self.tax,
            CostCategory::Fee => self.fee,
            CostCategory::Discount => self.discount,
            CostCategory::Credits => self.credits,
            CostCategory::Adjustment => self.adjustment,
        }
    }

    pub fn rows(&self) -> Vec<CostCategoryRow> {
        CostCategory::ALL
            .iter()
            .map(|&category| CostCategoryRow {
                category,
                amount: self.amount(category),
            })
            .collect()
    }

    /// Cross-check against the summed discounted cost of the same accounts.
    ///
    /// Tax and adjustment are outside the calculator, so they are taken out
    /// of the total before comparing.
    pub fn reconciles_with(&self, net_customer_cost: Money) -> bool {
        self.total() - self.tax - self.adjustment == net_customer_cost
    }
}

impl Add for CostBreakdown {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for CostBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        self.usage += rhs.usage;
        self.tax += rhs.tax;
        self.fee += rhs.fee;
        self.discount += rhs.discount;
        self.credits += rhs.credits;
        self.adjustment += rhs.adjustment;
    }
}

impl Sum for CostBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

// ── Exchange rate ──────────────────────────────────────────────

/// Quote-currency units per one base-currency unit (EUR per USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn convert(&self, amount: Money) -> Money {
        amount * self.rate
    }

    /// `1 / rate`, the ratio shown next to the converted total.
    pub fn inverse(&self) -> BillingResult<Decimal> {
        Decimal::ONE
            .checked_div(self.rate)
            .ok_or(BillingError::DivisionByZeroRate)
    }
}

/// An unconfigured rate is zero, which reports as unavailable.
impl Default for ExchangeRate {
    fn default() -> Self {
        Self { rate: Decimal::ZERO }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRateSummary {
    pub total_usd: Money,
    pub rate: Decimal,
    pub total_eur: Money,
    /// Rounded inverse ratio; `None` when the rate is zero.
    pub inverse_rate: Option<Decimal>,
    pub display: String,
}

impl ExchangeRateSummary {
    pub fn is_available(&self) -> bool {
        self.inverse_rate.is_some()
    }
}

// ── Notices ────────────────────────────────────────────────────

/// Non-fatal conditions found while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportNotice {
    RateUnavailable,
    MissingCostCenterReference {
        account_id: AccountId,
        cost_center_id: CostCenterId,
    },
    DuplicateCostCenterMembership {
        account_id: AccountId,
        kept_cost_center_id: CostCenterId,
        ignored_cost_center_id: CostCenterId,
    },
}

impl ReportNotice {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateUnavailable => "rate_unavailable",
            Self::MissingCostCenterReference { .. } => "missing_cost_center_reference",
            Self::DuplicateCostCenterMembership { .. } => "duplicate_cost_center_membership",
        }
    }

    /// Notice equivalent of a non-fatal error, `None` for fatal ones.
    pub fn from_error(err: BillingError) -> Option<Self> {
        if !err.is_reportable() {
            return None;
        }
        match err {
            BillingError::DivisionByZeroRate => Some(Self::RateUnavailable),
            BillingError::MissingCostCenterReference {
                account_id,
                cost_center_id,
            } => Some(Self::MissingCostCenterReference {
                account_id,
                cost_center_id,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateUnavailable => write!(f, "Exchange rate unavailable"),
            Self::MissingCostCenterReference {
                account_id,
                cost_center_id,
            } => write!(
                f,
                "Account {} references unknown cost center {}",
                account_id, cost_center_id
            ),
            Self::DuplicateCostCenterMembership {
                account_id,
                kept_cost_center_id,
                ignored_cost_center_id,
            } => write!(
                f,
                "Account {} is linked to {} and {}; counted under {}",
                account_id, kept_cost_center_id, ignored_cost_center_id, kept_cost_center_id
            ),
        }
    }
}

// ── Report rows ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountCostRow {
    pub account_id: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub result: AccountCostResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayerAccountBalance {
    pub payer_account_id: AccountId,
    pub account_count: usize,
    pub total_cost: Money,
    pub discounted_cost: Money,
}

/// Everything a customer report view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingReport {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub period: BillingPeriod,
    pub currency: String,
    pub accounts: Vec<AccountCostRow>,
    pub breakdown: CostBreakdown,
    pub breakdown_total: Money,
    pub categories: Vec<CostCategoryRow>,
    pub cost_centers: Vec<CostCenterBalance>,
    pub payer_accounts: Vec<PayerAccountBalance>,
    pub customer: CustomerCostSummary,
    pub exchange: ExchangeRateSummary,
    pub notices: Vec<ReportNotice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerCostRow {
    pub customer_id: CustomerId,
    pub customer_name: String,
    #[serde(flatten)]
    pub summary: CustomerCostSummary,
}

/// Customer-level rollup across several customers for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioReport {
    pub period: BillingPeriod,
    pub currency: String,
    pub customers: Vec<CustomerCostRow>,
    pub totals: CustomerCostSummary,
}
