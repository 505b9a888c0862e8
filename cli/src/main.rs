//! Billing cost engine report CLI
//!
//! Loads a JSON dataset into the in-memory data source and prints a
//! customer or portfolio report.
//!
//! ```sh
//! # One customer, current month, JSON output
//! billing-report --data billing.json --customer acme
//!
//! # Every customer for a given month, as text
//! billing-report --data billing.json --period 2026-09 --format text
//!
//! # Validate config and dataset without reporting
//! billing-report --data billing.json --check
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use billing_engine::config::AppConfig;
use billing_engine::domain::{BillingPeriod, BillingReport, PortfolioReport};
use billing_engine::logging::init_tracing;
use billing_engine::shared::format::format_money;
use billing_engine::{AppError, InMemoryBillingData, InfraError, ReportOptions, ReportService};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Billing cost reports from a dataset file.
#[derive(Parser, Debug)]
#[command(name = "billing-report", version, about = "Customer and portfolio billing cost reports")]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BILLING_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the dataset file (JSON).
    #[arg(short, long)]
    data: PathBuf,

    /// Customer to report on. Repeat for several; omit for all customers.
    #[arg(long = "customer")]
    customers: Vec<String>,

    /// Billing period as YYYY-MM (default: current month).
    #[arg(short, long)]
    period: Option<String>,

    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate configuration and dataset, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(billing_engine::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config)?;

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config {}: {}. Using defaults.", config_path.display(), e),
    }

    // ── Data source ────────────────────────────────────────────
    let data = InMemoryBillingData::load_json(&cli.data)?;

    let period: BillingPeriod = match &cli.period {
        Some(p) => p.parse()?,
        None => BillingPeriod::containing(Utc::now().date_naive()),
    };

    if cli.check {
        info!(
            customers = data.customer_count(),
            period = %period,
            "Configuration and dataset are valid"
        );
        return Ok(());
    }

    let service = ReportService::new(Arc::new(data), ReportOptions::from(&config));

    if let [customer_id] = cli.customers.as_slice() {
        let report = service.customer_report(customer_id, period).await?;
        match cli.format {
            OutputFormat::Json => println!("{}", to_json(&report)?),
            OutputFormat::Text => print_report(&report, service.options()),
        }
    } else {
        let portfolio = service.portfolio_report(&cli.customers, period).await?;
        match cli.format {
            OutputFormat::Json => println!("{}", to_json(&portfolio)?),
            OutputFormat::Text => print_portfolio(&portfolio, service.options()),
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, InfraError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn print_report(report: &BillingReport, opts: &ReportOptions) {
    let money = |v| format_money(v, &report.currency, opts.money_precision);

    println!("{} ({}), {}", report.customer_name, report.customer_id, report.period);
    println!();
    println!("Accounts");
    for row in &report.accounts {
        println!(
            "  {:<24} total {:>18}  discounted {:>18}  savings {:>16}",
            row.name.as_deref().unwrap_or(&row.account_id),
            money(row.result.total_cost),
            money(row.result.discounted_cost),
            money(row.result.savings),
        );
    }

    println!();
    println!("Cost breakdown");
    for row in &report.categories {
        println!("  {:<12} {:>18}", row.category.to_string(), money(row.amount));
    }
    println!("  {:<12} {:>18}", "Total", money(report.breakdown_total));

    println!();
    println!("Cost centers");
    for center in &report.cost_centers {
        println!(
            "  {:<24} {:>18}  ({} accounts)",
            center.cost_center_name,
            money(center.total_cost),
            center.account_count
        );
    }

    println!();
    println!("Customer");
    println!("  Gross     {:>18}", money(report.customer.gross_customer_cost));
    println!("  Discount  {:>18}", money(report.customer.discount_applied));
    println!("  Net       {:>18}", money(report.customer.net_customer_cost));

    println!();
    println!(
        "Converted  {}  ({})",
        format_money(report.exchange.total_eur, &opts.quote_currency, opts.money_precision),
        report.exchange.display
    );

    if !report.notices.is_empty() {
        println!();
        println!("Notices");
        for notice in &report.notices {
            println!("  - {}", notice);
        }
    }
}

fn print_portfolio(portfolio: &PortfolioReport, opts: &ReportOptions) {
    let money = |v| format_money(v, &portfolio.currency, opts.money_precision);

    println!("Portfolio {}", portfolio.period);
    println!();
    for row in &portfolio.customers {
        println!(
            "  {:<24} gross {:>18}  discount {:>16}  net {:>18}",
            row.customer_name,
            money(row.summary.gross_customer_cost),
            money(row.summary.discount_applied),
            money(row.summary.net_customer_cost),
        );
    }
    println!(
        "  {:<24} gross {:>18}  discount {:>16}  net {:>18}",
        "Total",
        money(portfolio.totals.gross_customer_cost),
        money(portfolio.totals.discount_applied),
        money(portfolio.totals.net_customer_cost),
    );
}
