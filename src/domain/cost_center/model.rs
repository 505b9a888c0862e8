//! Cost center entity and its derived balance

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::account::{AccountId, Money};

pub type CostCenterId = String;

/// Customer-defined grouping of usage accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: CostCenterId,
    pub name: String,
    #[serde(default)]
    pub linked_usage_account_ids: HashSet<AccountId>,
}

impl CostCenter {
    pub fn new(id: impl Into<CostCenterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            linked_usage_account_ids: HashSet::new(),
        }
    }

    pub fn link<I, S>(mut self, account_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AccountId>,
    {
        self.linked_usage_account_ids
            .extend(account_ids.into_iter().map(Into::into));
        self
    }
}

/// Which per-account figure a cost center sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCenterBasis {
    /// After customer discount.
    #[default]
    Discounted,
    /// Before customer discount.
    Gross,
}

impl std::fmt::Display for CostCenterBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discounted => write!(f, "discounted"),
            Self::Gross => write!(f, "gross"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostCenterBalance {
    pub cost_center_id: CostCenterId,
    pub cost_center_name: String,
    pub account_count: usize,
    pub total_cost: Money,
}
