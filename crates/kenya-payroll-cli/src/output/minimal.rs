use kenya_payroll_core::money::format_amount;
use serde_json::Value;

use super::money_value;

/// Print just the headline figure from the output.
///
/// Looks for well-known payroll fields in order of priority, then falls back
/// to the first field in the result object. Amounts are rounded to cents.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Preview output nests its totals under "summary"
    let result_obj = result_obj
        .as_object()
        .and_then(|m| m.get("summary"))
        .unwrap_or(result_obj);

    let priority_keys = [
        "net_salary",
        "total_net",
        "total_deductions",
        "total_gross",
        "paye",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(key, val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(key, val));
            return;
        }
    }

    if let Value::Array(items) = result_obj {
        println!("{}", items.len());
        return;
    }

    println!("{}", format_minimal("", result_obj));
}

fn format_minimal(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match money_value(key, s) {
            Some(amount) => format_amount(amount),
            None => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_rounded_to_cents() {
        assert_eq!(format_minimal("net_salary", &json!("10919.75215")), "10919.75");
        assert_eq!(format_minimal("total_net", &json!("4475")), "4475.00");
    }

    #[test]
    fn test_non_money_verbatim() {
        assert_eq!(format_minimal("nssf_rate", &json!("0.06")), "0.06");
        assert_eq!(format_minimal("count", &json!(3)), "3");
    }
}
