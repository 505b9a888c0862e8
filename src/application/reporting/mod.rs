//! Report aggregation over account cost results

pub mod aggregator;
pub mod options;

pub use aggregator::{
    build_portfolio, build_report, cost_breakdown, cost_by_center, cost_by_payer, customer_cost,
    evaluate, exchange_rate_summary, AccountLine, CenterRollup,
};
pub use options::ReportOptions;
