use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with a currency symbol and exactly two decimals.
///
/// Negative amounts put the sign before the symbol: `-$50.00`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let mut rounded = round_cents(amount);
    let negative = rounded < Decimal::ZERO;
    rounded.rescale(2);
    let digits = rounded.abs().to_string();
    if negative {
        format!("-{symbol}{digits}")
    } else {
        format!("{symbol}{digits}")
    }
}

/// Format a quantity or percentage without trailing zeros: `2`, `1.5`, `7.25`.
pub fn format_number(value: Decimal) -> String {
    value.normalize().to_string()
}
