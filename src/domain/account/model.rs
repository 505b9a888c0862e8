//! Usage account entity and the per-account cost calculator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{BillingError, BillingResult};

/// Monetary amount in a single currency, kept at full precision.
pub type Money = Decimal;

/// Customer discount as a percentage in `[0, 100]`.
pub type Percentage = Decimal;

pub type AccountId = String;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Raw figures for one account in one billing period.
///
/// Negative values are allowed and represent corrections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFigures {
    pub usage: Money,
    pub fee: Money,
    pub credit: Money,
    /// Pass-through, reported in the breakdown only.
    #[serde(default)]
    pub tax: Money,
    /// Pass-through, reported in the breakdown only.
    #[serde(default)]
    pub adjustment: Money,
}

impl AccountFigures {
    pub fn new(usage: Money, fee: Money, credit: Money) -> Self {
        Self {
            usage,
            fee,
            credit,
            ..Self::default()
        }
    }

    pub fn with_tax(mut self, tax: Money) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_adjustment(mut self, adjustment: Money) -> Self {
        self.adjustment = adjustment;
        self
    }

    /// Run the calculator for these figures under `policy`.
    pub fn cost(&self, policy: &DiscountPolicy) -> AccountCostResult {
        compute_account_cost(
            self.usage,
            self.fee,
            self.credit,
            policy.customer_discount_percent,
            policy.rebate_credits_enabled,
        )
    }
}

/// Per-customer discount settings, applied uniformly to all its accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    pub customer_discount_percent: Percentage,
    pub rebate_credits_enabled: bool,
}

impl DiscountPolicy {
    pub fn new(customer_discount_percent: Percentage, rebate_credits_enabled: bool) -> BillingResult<Self> {
        let policy = Self {
            customer_discount_percent,
            rebate_credits_enabled,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Reject percentages outside `[0, 100]`.
    ///
    /// Policies deserialized from a data source bypass [`DiscountPolicy::new`],
    /// so callers validate before handing them to the calculator.
    pub fn validate(&self) -> BillingResult<()> {
        let pct = self.customer_discount_percent;
        if pct < Decimal::ZERO || pct > HUNDRED {
            return Err(BillingError::InvalidDiscountRange(pct));
        }
        Ok(())
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            customer_discount_percent: Decimal::ZERO,
            rebate_credits_enabled: false,
        }
    }
}

/// Derived cost figures for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCostResult {
    pub total_cost: Money,
    pub discounted_cost: Money,
    pub savings: Money,
    pub credit_applied: Money,
    pub credit_ignored: Money,
}

/// Compute total and customer-facing cost for a single account.
///
/// Pure decimal arithmetic: no rounding, no clamping, no validation. The
/// discount percentage is expected to have been checked by the caller.
pub fn compute_account_cost(
    usage: Money,
    fee: Money,
    credit: Money,
    customer_discount_percent: Percentage,
    rebate_credits_enabled: bool,
) -> AccountCostResult {
    let credit_applied = if rebate_credits_enabled {
        credit
    } else {
        Decimal::ZERO
    };
    let total_cost = usage + fee + credit_applied;
    // Divide before multiplying: the product stays within the magnitude of `total_cost`.
    let discounted_cost = total_cost - total_cost * (customer_discount_percent / HUNDRED);
    // Kept as its own field so reported savings always match reported totals.
    let savings = total_cost - discounted_cost;

    AccountCostResult {
        total_cost,
        discounted_cost,
        savings,
        credit_applied,
        credit_ignored: credit - credit_applied,
    }
}

/// A usage account as supplied by the accounts service for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    #[serde(default)]
    pub name: Option<String>,
    /// Owning payer account; `None` means the account pays for itself.
    #[serde(default)]
    pub payer_account_id: Option<AccountId>,
    /// Cost center tag carried on the account itself.
    #[serde(default)]
    pub cost_center_id: Option<String>,
    #[serde(flatten)]
    pub figures: AccountFigures,
}

impl AccountRecord {
    pub fn new(id: impl Into<AccountId>, figures: AccountFigures) -> Self {
        Self {
            id: id.into(),
            name: None,
            payer_account_id: None,
            cost_center_id: None,
            figures,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn under_payer(mut self, payer_account_id: impl Into<AccountId>) -> Self {
        self.payer_account_id = Some(payer_account_id.into());
        self
    }

    pub fn tagged(mut self, cost_center_id: impl Into<String>) -> Self {
        self.cost_center_id = Some(cost_center_id.into());
        self
    }

    /// Payer the account rolls up to.
    pub fn payer_id(&self) -> &str {
        self.payer_account_id.as_deref().unwrap_or(&self.id)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn policy(pct: Decimal, rebate: bool) -> DiscountPolicy {
        DiscountPolicy::new(pct, rebate).unwrap()
    }

    #[test]
    fn rebate_enabled_applies_credit() {
        let r = compute_account_cost(dec!(10000), dec!(100), dec!(500), dec!(10), true);
        assert_eq!(r.total_cost, dec!(10600));
        assert_eq!(r.discounted_cost, dec!(9540));
        assert_eq!(r.savings, dec!(1060));
        assert_eq!(r.credit_applied, dec!(500));
        assert_eq!(r.credit_ignored, dec!(0));
    }

    #[test]
    fn rebate_disabled_ignores_credit() {
        let r = compute_account_cost(dec!(10000), dec!(100), dec!(500), dec!(10), false);
        assert_eq!(r.total_cost, dec!(10100));
        assert_eq!(r.discounted_cost, dec!(9090));
        assert_eq!(r.savings, dec!(1010));
        assert_eq!(r.credit_applied, dec!(0));
        assert_eq!(r.credit_ignored, dec!(500));
    }

    #[test]
    fn negative_credit_is_not_clamped() {
        let r = compute_account_cost(dec!(100), dec!(0), dec!(-40), dec!(0), true);
        assert_eq!(r.total_cost, dec!(60));
        assert_eq!(r.credit_applied, dec!(-40));

        let r = compute_account_cost(dec!(100), dec!(0), dec!(-40), dec!(0), false);
        assert_eq!(r.total_cost, dec!(100));
        assert_eq!(r.credit_ignored, dec!(-40));
    }

    #[test]
    fn zero_and_full_discount() {
        let none = compute_account_cost(dec!(250.75), dec!(10), dec!(0), dec!(0), true);
        assert_eq!(none.discounted_cost, none.total_cost);
        assert_eq!(none.savings, dec!(0));

        let full = compute_account_cost(dec!(250.75), dec!(10), dec!(0), dec!(100), true);
        assert_eq!(full.discounted_cost, dec!(0));
        assert_eq!(full.savings, full.total_cost);
    }

    #[test]
    fn large_totals_do_not_overflow() {
        let usage: Decimal = "1000000000000000000000000000".parse().unwrap();

        let none = compute_account_cost(usage, dec!(0), dec!(0), dec!(0), false);
        assert_eq!(none.discounted_cost, usage);
        assert_eq!(none.savings, dec!(0));

        let half = compute_account_cost(usage, dec!(0), dec!(0), dec!(50), false);
        assert_eq!(half.discounted_cost, usage / dec!(2));
        assert_eq!(half.savings, usage / dec!(2));

        let full = compute_account_cost(usage, dec!(0), dec!(0), dec!(100), false);
        assert_eq!(full.total_cost, usage);
        assert_eq!(full.discounted_cost, dec!(0));
        assert_eq!(full.savings, usage);
    }

    #[test]
    fn fractional_discount_keeps_precision() {
        let r = compute_account_cost(dec!(33.33), dec!(0), dec!(0), dec!(12.5), false);
        assert_eq!(r.savings, dec!(4.16625));
        assert_eq!(r.discounted_cost, dec!(29.16375));
    }

    #[test]
    fn method_form_matches_free_function() {
        let figures = AccountFigures::new(dec!(10000), dec!(100), dec!(500)).with_tax(dec!(7));
        let p = policy(dec!(10), true);
        assert_eq!(
            figures.cost(&p),
            compute_account_cost(dec!(10000), dec!(100), dec!(500), dec!(10), true)
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let figures = AccountFigures::new(dec!(1.1), dec!(2.2), dec!(3.3));
        let p = policy(dec!(33), true);
        assert_eq!(figures.cost(&p), figures.cost(&p));
    }

    #[test]
    fn policy_rejects_out_of_range() {
        assert!(matches!(
            DiscountPolicy::new(dec!(-0.01), true),
            Err(BillingError::InvalidDiscountRange(_))
        ));
        assert!(matches!(
            DiscountPolicy::new(dec!(100.5), false),
            Err(BillingError::InvalidDiscountRange(_))
        ));
        assert!(DiscountPolicy::new(dec!(0), false).is_ok());
        assert!(DiscountPolicy::new(dec!(100), true).is_ok());
    }

    #[test]
    fn payer_defaults_to_self() {
        let standalone = AccountRecord::new("u-1", AccountFigures::default());
        assert_eq!(standalone.payer_id(), "u-1");
        let child = AccountRecord::new("u-2", AccountFigures::default()).under_payer("p-1");
        assert_eq!(child.payer_id(), "p-1");
    }

    #[test]
    fn record_deserializes_flattened_figures() {
        let json = r#"{"id":"u-1","usage":"10.5","fee":1,"credit":"0","cost_center_id":"cc-1"}"#;
        let record: AccountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.figures.usage, dec!(10.5));
        assert_eq!(record.figures.fee, dec!(1));
        assert_eq!(record.figures.tax, dec!(0));
        assert_eq!(record.cost_center_id.as_deref(), Some("cc-1"));
    }
}
