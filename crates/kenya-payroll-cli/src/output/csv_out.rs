use kenya_payroll_core::money::format_amount;
use serde_json::Value;
use std::io::{self, Write};

use super::money_value;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(value, stdout.lock()) {
        eprintln!("CSV output error: {}", e);
    }
}

/// CSV rendering of a command result.
///
/// Envelopes with an object result become `field,value` pairs; envelopes with
/// an array result (register, payslips, monthly trend) and bare arrays
/// (register `--export`) become one row per item. Money cells are rounded
/// to 2 dp.
pub fn write_csv<W: Write>(value: &Value, out: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_pairs(&mut wtr, result)?,
            Some(Value::Array(rows)) => write_rows(&mut wtr, rows)?,
            _ => write_pairs(&mut wtr, map)?,
        },
        Value::Array(arr) => write_rows(&mut wtr, arr)?,
        _ => wtr.write_record([format_csv_value("", value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_pairs<W: Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_csv_value(key, val)])?;
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_csv_value("", item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(|v| format_csv_value(h, v)).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

/// Nested objects (e.g. a row's `deductions`) are flattened as `key=value` pairs.
fn format_csv_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match money_value(key, s) {
            Some(amount) => format_amount(amount),
            None => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, format_csv_value(k, v)))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Array(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kenya_payroll_core::deductions::{analyze_deductions, DeductionsInput, StatutoryRates};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(value, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_object_result_as_pairs() {
        let v = json!({ "result": { "nssf": "1080", "net_salary": "39910.65" }, "warnings": [] });
        assert_eq!(render(&v), "field,value\nnssf,1080.00\nnet_salary,39910.65\n");
    }

    #[test]
    fn test_export_grid_keeps_column_order() {
        let v = json!([
            { "Employee ID": "10", "Employee Name": "Otieno, Achieng", "Net Salary": "39910.65" },
            { "Employee ID": "11", "Employee Name": "Brian", "Net Salary": "4475.00" }
        ]);
        assert_eq!(
            render(&v),
            "Employee ID,Employee Name,Net Salary\n10,\"Otieno, Achieng\",39910.65\n11,Brian,4475.00\n"
        );
    }

    #[test]
    fn test_array_result_rows() {
        let v = json!({ "result": [ { "month": "Jan", "count": 2 } ] });
        assert_eq!(render(&v), "month,count\nJan,2\n");
    }

    #[test]
    fn test_nested_object_flattened() {
        let v = json!({ "result": { "period": { "start": "2025-01-01", "end": "2025-01-31" } } });
        assert_eq!(render(&v), "field,value\nperiod,start=2025-01-01; end=2025-01-31\n");
    }

    #[test]
    fn test_sub_cent_amounts_rounded() {
        let input = DeductionsInput { gross_salary: dec!(12345.678) };
        let out = analyze_deductions(&input, &StatutoryRates::kenya()).unwrap();
        let csv = render(&serde_json::to_value(out).unwrap());
        assert!(csv.contains("nssf,740.74\n"));
        assert!(csv.contains("housing_levy,185.19\n"));
        assert!(csv.contains("total_deductions,1425.93\n"));
        assert!(csv.contains("net_salary,10919.75\n"));
    }

    #[test]
    fn test_nested_deductions_rounded() {
        let v = json!({ "result": [ { "record_id": 1, "deductions": { "housing_levy": "499.99995" } } ] });
        assert_eq!(render(&v), "record_id,deductions\n1,housing_levy=500.00\n");
    }
}
