use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Format a monetary value for display: pt-BR convention, fixed two
/// decimals ("R$ 1.234,56"). Display-only; never feeds back into
/// calculations.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let abs = rounded.abs();

    let text = format!("{:.2}", abs);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, "00".to_string()),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*b as char);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

/// Format a decimal-fraction rate as a percentage with two decimals.
pub fn format_percent(rate: Decimal) -> String {
    let pct = (rate * dec!(100)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", pct)
}
