//! Presentation-boundary rounding and formatting.
//!
//! Amounts are kept at full precision everywhere else; these helpers are the
//! only place a figure is rounded.

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_MONEY_PRECISION: u32 = 2;
pub const DEFAULT_RATE_PRECISION: u32 = 4;

/// Round half away from zero to `dp` decimal places.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with a fixed number of decimals, e.g. `"10600.00 USD"`.
pub fn format_money(value: Decimal, currency: &str, dp: u32) -> String {
    let rounded = round_to(value, dp);
    format!("{:.*} {}", dp as usize, rounded, currency)
}

/// Display text for the inverse exchange ratio, e.g. `"1 USD = 1.0870 EUR"`.
///
/// `None` means the ratio is undefined and renders as `"N/A"`.
pub fn format_ratio(inverse: Option<Decimal>, base: &str, quote: &str, dp: u32) -> String {
    match inverse {
        Some(ratio) => format!("1 {} = {:.*} {}", base, dp as usize, round_to(ratio, dp), quote),
        None => "N/A".to_string(),
    }
}
