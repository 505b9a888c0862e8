//! In-memory billing data source

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{
    AccountRecord, BillingDataSource, BillingPeriod, BillingResult, CostCenter, Customer,
    CustomerId, CustomerSnapshot, ExchangeRate,
};

/// Everything held for one customer. Kept in a single map entry so a
/// snapshot is read under one shard lock.
#[derive(Debug, Clone)]
struct CustomerBook {
    seq: u64,
    customer: Customer,
    cost_centers: Vec<CostCenter>,
    usage: HashMap<BillingPeriod, Vec<AccountRecord>>,
}

/// In-memory data source for development, tests and file-backed runs
pub struct InMemoryBillingData {
    books: DashMap<CustomerId, CustomerBook>,
    /// `None` key holds the fallback rate for periods without their own.
    rates: DashMap<Option<BillingPeriod>, ExchangeRate>,
    customer_counter: AtomicU64,
}

impl InMemoryBillingData {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            rates: DashMap::new(),
            customer_counter: AtomicU64::new(1),
        }
    }

    /// Insert or replace a customer. Replacing keeps its accounts, cost
    /// centers and listing position.
    pub fn upsert_customer(&self, customer: Customer) {
        match self.books.entry(customer.id.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().customer = customer,
            Entry::Vacant(entry) => {
                entry.insert(CustomerBook {
                    seq: self.customer_counter.fetch_add(1, Ordering::SeqCst),
                    customer,
                    cost_centers: Vec::new(),
                    usage: HashMap::new(),
                });
            }
        }
    }

    /// Replace a customer's cost centers. Returns `false` for an unknown customer.
    pub fn set_cost_centers(&self, customer_id: &str, cost_centers: Vec<CostCenter>) -> bool {
        match self.books.get_mut(customer_id) {
            Some(mut book) => {
                book.cost_centers = cost_centers;
                true
            }
            None => false,
        }
    }

    /// Replace a customer's account figures for one period.
    pub fn record_accounts(&self, customer_id: &str, period: BillingPeriod, accounts: Vec<AccountRecord>) -> bool {
        match self.books.get_mut(customer_id) {
            Some(mut book) => {
                debug!(customer_id, period = %period, accounts = accounts.len(), "Account figures recorded");
                book.usage.insert(period, accounts);
                true
            }
            None => false,
        }
    }

    pub fn set_exchange_rate(&self, rate: ExchangeRate) {
        self.rates.insert(None, rate);
    }

    pub fn set_period_exchange_rate(&self, period: BillingPeriod, rate: ExchangeRate) {
        self.rates.insert(Some(period), rate);
    }

    pub fn exchange_rate(&self, period: BillingPeriod) -> ExchangeRate {
        self.rates
            .get(&Some(period))
            .or_else(|| self.rates.get(&None))
            .map(|r| *r)
            .unwrap_or_default()
    }

    pub fn customer_count(&self) -> usize {
        self.books.len()
    }
}

impl Default for InMemoryBillingData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingDataSource for InMemoryBillingData {
    /// Customer, accounts and cost centers come from one entry under one
    /// shard lock. The rate is read while that lock is held; rates are
    /// shared across customers, so a rate write is not ordered against it.
    async fn customer_snapshot(
        &self,
        customer_id: &str,
        period: BillingPeriod,
    ) -> BillingResult<Option<CustomerSnapshot>> {
        Ok(self.books.get(customer_id).map(|book| CustomerSnapshot {
            customer: book.customer.clone(),
            period,
            accounts: book.usage.get(&period).cloned().unwrap_or_default(),
            cost_centers: book.cost_centers.clone(),
            exchange_rate: self.exchange_rate(period),
        }))
    }

    async fn list_customers(&self) -> BillingResult<Vec<Customer>> {
        let mut books: Vec<(u64, Customer)> = self
            .books
            .iter()
            .map(|entry| (entry.seq, entry.customer.clone()))
            .collect();
        books.sort_by_key(|(seq, _)| *seq);
        Ok(books.into_iter().map(|(_, customer)| customer).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountFigures, DiscountPolicy};
    use rust_decimal_macros::dec;

    fn period(s: &str) -> BillingPeriod {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn snapshot_for_unknown_customer_is_none() {
        let data = InMemoryBillingData::new();
        let snap = data.customer_snapshot("ghost", period("2026-09")).await.unwrap();
        assert!(snap.is_none());
    }

    #[tokio::test]
    async fn snapshot_selects_period() {
        let data = InMemoryBillingData::new();
        data.upsert_customer(Customer::new("acme", "Acme", DiscountPolicy::default()));
        let figures = AccountFigures::new(dec!(1), dec!(0), dec!(0));
        assert!(data.record_accounts("acme", period("2026-08"), vec![AccountRecord::new("u-1", figures.clone())]));
        assert!(data.record_accounts(
            "acme",
            period("2026-09"),
            vec![AccountRecord::new("u-1", figures.clone()), AccountRecord::new("u-2", figures)],
        ));

        let snap = data.customer_snapshot("acme", period("2026-09")).await.unwrap().unwrap();
        assert_eq!(snap.accounts.len(), 2);
        let snap = data.customer_snapshot("acme", period("2026-07")).await.unwrap().unwrap();
        assert!(snap.accounts.is_empty());
    }

    #[tokio::test]
    async fn writes_for_unknown_customer_are_rejected() {
        let data = InMemoryBillingData::new();
        assert!(!data.record_accounts("ghost", period("2026-09"), vec![]));
        assert!(!data.set_cost_centers("ghost", vec![]));
    }

    #[tokio::test]
    async fn period_rate_overrides_fallback() {
        let data = InMemoryBillingData::new();
        assert_eq!(data.exchange_rate(period("2026-09")).rate, dec!(0));

        data.set_exchange_rate(ExchangeRate::new(dec!(0.9)));
        data.set_period_exchange_rate(period("2026-09"), ExchangeRate::new(dec!(0.92)));
        assert_eq!(data.exchange_rate(period("2026-09")).rate, dec!(0.92));
        assert_eq!(data.exchange_rate(period("2026-10")).rate, dec!(0.9));
    }

    #[tokio::test]
    async fn snapshot_carries_rate_current_at_read() {
        let data = InMemoryBillingData::new();
        data.upsert_customer(Customer::new("acme", "Acme", DiscountPolicy::default()));
        data.set_exchange_rate(ExchangeRate::new(dec!(0.9)));

        let snap = data.customer_snapshot("acme", period("2026-09")).await.unwrap().unwrap();
        assert_eq!(snap.exchange_rate.rate, dec!(0.9));

        data.set_period_exchange_rate(period("2026-09"), ExchangeRate::new(dec!(0.92)));
        let snap = data.customer_snapshot("acme", period("2026-09")).await.unwrap().unwrap();
        assert_eq!(snap.exchange_rate.rate, dec!(0.92));
    }

    #[tokio::test]
    async fn customers_listed_in_insertion_order() {
        let data = InMemoryBillingData::new();
        for id in ["c-3", "c-1", "c-2"] {
            data.upsert_customer(Customer::new(id, id, DiscountPolicy::default()));
        }
        // Replacing keeps the original position.
        data.upsert_customer(Customer::new("c-3", "Renamed", DiscountPolicy::default()));

        let customers = data.list_customers().await.unwrap();
        let ids: Vec<_> = customers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c-3", "c-1", "c-2"]);
        assert_eq!(customers[0].name, "Renamed");
        assert_eq!(data.customer_count(), 3);
    }
}
