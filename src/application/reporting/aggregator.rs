//! Report aggregator
//!
//! Pure folds over per-account calculator results. Every function here is
//! deterministic and order-preserving: rows come out in the order accounts
//! and cost centers were supplied.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::options::ReportOptions;
use crate::domain::{
    AccountCostResult, AccountCostRow, AccountRecord, BillingError, BillingPeriod, BillingReport,
    BillingResult, CostBreakdown, CostCenter, CostCenterBalance, CostCenterBasis, CustomerCostRow,
    CustomerCostSummary, CustomerSnapshot, DiscountPolicy, ExchangeRate, ExchangeRateSummary, Money,
    PayerAccountBalance, PortfolioReport, ReportNotice,
};
use crate::shared::format::{format_ratio, round_to};

/// One account together with its calculator result.
#[derive(Debug, Clone, Copy)]
pub struct AccountLine<'a> {
    pub account: &'a AccountRecord,
    pub result: AccountCostResult,
}

impl<'a> AccountLine<'a> {
    pub fn new(account: &'a AccountRecord, policy: &DiscountPolicy) -> Self {
        Self {
            account,
            result: account.figures.cost(policy),
        }
    }
}

/// Run the calculator once per account.
pub fn evaluate<'a>(accounts: &'a [AccountRecord], policy: &DiscountPolicy) -> Vec<AccountLine<'a>> {
    accounts.iter().map(|a| AccountLine::new(a, policy)).collect()
}

pub fn cost_breakdown(lines: &[AccountLine<'_>]) -> CostBreakdown {
    lines
        .iter()
        .map(|l| CostBreakdown::for_account(&l.account.figures, &l.result))
        .sum()
}

pub fn customer_cost(lines: &[AccountLine<'_>]) -> CustomerCostSummary {
    lines
        .iter()
        .map(|l| CustomerCostSummary::from(&l.result))
        .sum()
}

/// Cost-center balances plus the notices raised while resolving membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterRollup {
    pub balances: Vec<CostCenterBalance>,
    pub notices: Vec<ReportNotice>,
}

/// Group accounts by cost center.
///
/// An account belongs to the first center whose linked set contains it. If
/// no set contains it, its own `cost_center_id` tag is used when it names a
/// known center. Accounts that resolve to no center are left out of every
/// balance. Every configured center gets a row, even with no accounts.
pub fn cost_by_center(
    lines: &[AccountLine<'_>],
    centers: &[CostCenter],
    basis: CostCenterBasis,
) -> CenterRollup {
    let mut linked: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut by_id: HashMap<&str, usize> = HashMap::new();
    for (idx, center) in centers.iter().enumerate() {
        by_id.entry(center.id.as_str()).or_insert(idx);
        for account_id in &center.linked_usage_account_ids {
            linked.entry(account_id.as_str()).or_default().push(idx);
        }
    }

    let mut totals = vec![(0usize, Decimal::ZERO); centers.len()];
    let mut notices = Vec::new();

    for line in lines {
        let account = line.account;
        let target = match linked.get(account.id.as_str()).map(Vec::as_slice) {
            Some([kept, rest @ ..]) => {
                for &ignored in rest {
                    notices.push(ReportNotice::DuplicateCostCenterMembership {
                        account_id: account.id.clone(),
                        kept_cost_center_id: centers[*kept].id.clone(),
                        ignored_cost_center_id: centers[ignored].id.clone(),
                    });
                }
                Some(*kept)
            }
            _ => match account.cost_center_id.as_deref() {
                Some(tag) => match by_id.get(tag) {
                    Some(&idx) => Some(idx),
                    None => {
                        notices.extend(ReportNotice::from_error(
                            BillingError::MissingCostCenterReference {
                                account_id: account.id.clone(),
                                cost_center_id: tag.to_string(),
                            },
                        ));
                        None
                    }
                },
                None => None,
            },
        };

        if let Some(idx) = target {
            let (count, sum) = &mut totals[idx];
            *count += 1;
            *sum += match basis {
                CostCenterBasis::Discounted => line.result.discounted_cost,
                CostCenterBasis::Gross => line.result.total_cost,
            };
        }
    }

    let balances = centers
        .iter()
        .zip(totals)
        .map(|(center, (account_count, total_cost))| CostCenterBalance {
            cost_center_id: center.id.clone(),
            cost_center_name: center.name.clone(),
            account_count,
            total_cost,
        })
        .collect();

    debug!(centers = centers.len(), %basis, notices = notices.len(), "Cost centers aggregated");

    CenterRollup { balances, notices }
}

/// Roll usage accounts up to their payer accounts, in first-seen order.
pub fn cost_by_payer(lines: &[AccountLine<'_>]) -> Vec<PayerAccountBalance> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut balances: Vec<PayerAccountBalance> = Vec::new();

    for line in lines {
        let payer = line.account.payer_id();
        let idx = *position.entry(payer).or_insert_with(|| {
            balances.push(PayerAccountBalance {
                payer_account_id: payer.to_string(),
                account_count: 0,
                total_cost: Decimal::ZERO,
                discounted_cost: Decimal::ZERO,
            });
            balances.len() - 1
        });
        let balance = &mut balances[idx];
        balance.account_count += 1;
        balance.total_cost += line.result.total_cost;
        balance.discounted_cost += line.result.discounted_cost;
    }

    balances
}

/// Convert a base-currency total and render the inverse ratio.
///
/// A zero rate still converts (to zero); only the ratio becomes unavailable.
pub fn exchange_rate_summary(
    total_usd: Money,
    rate: ExchangeRate,
    options: &ReportOptions,
) -> ExchangeRateSummary {
    let inverse_rate = rate
        .inverse()
        .ok()
        .map(|inv| round_to(inv, options.rate_precision));

    ExchangeRateSummary {
        total_usd,
        rate: rate.rate,
        total_eur: rate.convert(total_usd),
        inverse_rate,
        display: format_ratio(
            inverse_rate,
            &options.currency,
            &options.quote_currency,
            options.rate_precision,
        ),
    }
}

/// Build the full customer report from one snapshot.
///
/// The discount policy is validated up front; nothing is computed for an
/// invalid one.
pub fn build_report(snapshot: &CustomerSnapshot, options: &ReportOptions) -> BillingResult<BillingReport> {
    let customer = &snapshot.customer;
    customer.discount_policy.validate()?;

    let lines = evaluate(&snapshot.accounts, &customer.discount_policy);

    let breakdown = cost_breakdown(&lines);
    let summary = customer_cost(&lines);
    let CenterRollup {
        balances,
        mut notices,
    } = cost_by_center(&lines, &snapshot.cost_centers, options.cost_center_basis);
    let payer_accounts = cost_by_payer(&lines);

    let exchange = exchange_rate_summary(summary.net_customer_cost, snapshot.exchange_rate, options);
    if let Err(err) = snapshot.exchange_rate.inverse() {
        notices.extend(ReportNotice::from_error(err));
    }

    for notice in &notices {
        warn!(customer_id = %customer.id, kind = notice.kind(), "{}", notice);
    }

    let accounts = lines
        .iter()
        .map(|l| AccountCostRow {
            account_id: l.account.id.clone(),
            name: l.account.name.clone(),
            result: l.result,
        })
        .collect();

    debug!(
        customer_id = %customer.id,
        period = %snapshot.period,
        accounts = lines.len(),
        reconciled = breakdown.reconciles_with(summary.net_customer_cost),
        "Customer report built"
    );

    Ok(BillingReport {
        customer_id: customer.id.clone(),
        customer_name: customer.name.clone(),
        period: snapshot.period,
        currency: options.currency.clone(),
        accounts,
        breakdown,
        breakdown_total: breakdown.total(),
        categories: breakdown.rows(),
        cost_centers: balances,
        payer_accounts,
        customer: summary,
        exchange,
        notices,
    })
}

/// Customer-level rollup across reports of the same period.
pub fn build_portfolio(period: BillingPeriod, reports: &[BillingReport], options: &ReportOptions) -> PortfolioReport {
    let customers: Vec<CustomerCostRow> = reports
        .iter()
        .map(|r| CustomerCostRow {
            customer_id: r.customer_id.clone(),
            customer_name: r.customer_name.clone(),
            summary: r.customer,
        })
        .collect();
    let totals = customers.iter().map(|c| c.summary).sum();

    PortfolioReport {
        period,
        currency: options.currency.clone(),
        customers,
        totals,
    }
}
