//! Validated construction and presentation of monetary amounts.
//!
//! Arithmetic stays exact in [`Money`]; rounding to cents happens only here,
//! when a value leaves the crate as text.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::PayrollError;
use crate::types::{Currency, Money};
use crate::PayrollResult;

/// Decimal places used for every rendered amount.
pub const PRESENTATION_DP: u32 = 2;

const CURRENCY_PREFIXES: [&str; 3] = ["KES", "KSH", "SH"];

/// Reject negative amounts.
pub fn ensure_non_negative(amount: Money, field: &str) -> PayrollResult<Money> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PayrollError::invalid_amount(
            field,
            format!("must be a non-negative monetary value, got {amount}"),
        ));
    }
    Ok(amount)
}

/// Convert a native float (e.g. a JavaScript number) into [`Money`].
///
/// `NaN`, infinities and negative values are rejected rather than coerced.
pub fn amount_from_f64(value: f64, field: &str) -> PayrollResult<Money> {
    if !value.is_finite() {
        return Err(PayrollError::invalid_amount(
            field,
            format!("must be a finite number, got {value}"),
        ));
    }
    if value == 0.0 {
        return Ok(Decimal::ZERO);
    }
    let amount = Decimal::from_f64(value).ok_or_else(|| {
        PayrollError::invalid_amount(field, format!("{value} is outside the decimal range"))
    })?;
    ensure_non_negative(amount, field)
}

/// Parse user-entered text such as `"50,000.50"`, `"KES 1,200"` or `"KSh 1200"`.
pub fn parse_amount(text: &str, field: &str) -> PayrollResult<Money> {
    let mut body = text.trim();
    let upper = body.to_ascii_uppercase();
    for prefix in CURRENCY_PREFIXES {
        if upper.starts_with(prefix) {
            body = body[prefix.len()..].trim_start_matches('.').trim();
            break;
        }
    }

    let cleaned: String = body
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(PayrollError::invalid_amount(field, "no amount given"));
    }

    let amount: Money = cleaned.parse().map_err(|_| {
        PayrollError::invalid_amount(field, format!("'{text}' is not a monetary value"))
    })?;
    ensure_non_negative(amount, field)
}

/// Round to cents, midpoint away from zero (matches spreadsheet `ROUND`).
pub fn round_money(amount: Money) -> Money {
    let mut rounded =
        amount.round_dp_with_strategy(PRESENTATION_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRESENTATION_DP);
    rounded
}

/// Plain two-decimal rendering for export cells: `39910.65`.
pub fn format_amount(amount: Money) -> String {
    round_money(amount).to_string()
}

/// Two decimals with thousands separators: `39,910.65`.
pub fn format_grouped(amount: Money) -> String {
    let plain = format_amount(amount);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    format!("{sign}{grouped}.{frac_part}")
}

/// Labelled rendering: `KES 39,910.65`.
pub fn format_kes(amount: Money) -> String {
    format_currency(amount, &Currency::KES)
}

pub fn format_currency(amount: Money, currency: &Currency) -> String {
    format!("{} {}", currency.label(), format_grouped(amount))
}
