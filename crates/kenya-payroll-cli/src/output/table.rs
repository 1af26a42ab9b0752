use kenya_payroll_core::money::format_grouped;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::money_value;

/// Format output as a table using the tabled crate.
///
/// Decimal-string amounts are rounded to cents and grouped here, the
/// presentation boundary for terminal output.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_object(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        Value::Array(items) => print_array_table(items),
        other => println!("{}", other),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalar fields as a Field/Value table, then one table per array of objects
/// (preview lines, breakdown components, schedule bands).
fn print_object(map: &serde_json::Map<String, Value>) {
    print_flat_object(map);
    for (key, val) in map {
        if let Value::Array(items) = val {
            if !items.is_empty() && items.iter().all(Value::is_object) {
                println!("\n{}:", key);
                print_array_table(items);
            }
        }
    }
}

fn print_flat_object(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if matches!(val, Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object)) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(|v| format_value(h, v)).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value("", item));
        }
    }
}

fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match money_value(key, s) {
            Some(amount) => format_grouped(amount),
            None => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(key, v)).collect();
            items.join(", ")
        }
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, format_value(k, v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
