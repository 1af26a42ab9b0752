pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout. Amounts stay exact decimal strings.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Keys whose decimal strings are not money and must be shown verbatim.
pub(crate) fn is_money_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    !["rate", "share", "id", "days", "year", "upper", "lower"]
        .iter()
        .any(|suffix| key.ends_with(suffix))
}

/// The amount held in a money-keyed decimal string, if any.
///
/// Results carry exact decimals; every non-JSON format rounds them to cents.
pub(crate) fn money_value(key: &str, text: &str) -> Option<Decimal> {
    if !is_money_key(key) {
        return None;
    }
    text.parse::<Decimal>().ok()
}
