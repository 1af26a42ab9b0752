use napi::Result as NapiResult;
use napi_derive::napi;

use kenya_payroll_core::deductions::{self, DeductionsInput, StatutoryRates};
use kenya_payroll_core::money::parse_amount;
use kenya_payroll_core::payroll::payslip::{self, PayslipBatchInput};
use kenya_payroll_core::payroll::preview::{self, PreviewInput};
use kenya_payroll_core::payroll::register;
use kenya_payroll_core::payroll::{Employee, PayrollRecord};
use kenya_payroll_core::reports::{statistics, trends};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Gazetted schedule unless the caller passes a replacement as JSON.
fn resolve_rates(rates_json: Option<String>) -> NapiResult<StatutoryRates> {
    match rates_json {
        Some(json) => {
            let rates: StatutoryRates = serde_json::from_str(&json).map_err(to_napi_error)?;
            rates.validate().map_err(to_napi_error)?;
            Ok(rates)
        }
        None => Ok(StatutoryRates::kenya()),
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Breakdown for a JS number. NaN, Infinity and negatives throw.
#[napi]
pub fn compute_deductions(gross: f64) -> NapiResult<String> {
    let output = deductions::compute_deductions_f64(gross).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Breakdown for user-entered text such as "KES 50,000".
#[napi]
pub fn compute_deductions_str(amount: String) -> NapiResult<String> {
    let gross = parse_amount(&amount, "gross_salary").map_err(to_napi_error)?;
    let output = deductions::compute_deductions(gross).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_deductions(input_json: String, rates_json: Option<String>) -> NapiResult<String> {
    let input: DeductionsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = deductions::analyze_deductions(&input, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct BatchDeductionsInput {
    gross_salaries: Vec<rust_decimal::Decimal>,
    #[serde(default)]
    rates: Option<StatutoryRates>,
}

/// Breakdowns for many salaries against one schedule, in input order.
#[napi]
pub fn compute_deductions_batch(input_json: String) -> NapiResult<String> {
    let input: BatchDeductionsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rates = input.rates.unwrap_or_default();
    rates.validate().map_err(to_napi_error)?;
    let breakdowns = input
        .gross_salaries
        .iter()
        .map(|gross| rates.breakdown(*gross))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_napi_error)?;
    serde_json::to_string(&breakdowns).map_err(to_napi_error)
}

#[napi]
pub fn statutory_schedule() -> NapiResult<String> {
    serde_json::to_string(&StatutoryRates::kenya()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[napi]
pub fn payroll_preview(input_json: String, rates_json: Option<String>) -> NapiResult<String> {
    let input: PreviewInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = preview::preview_payroll(&input, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn payroll_register(records_json: String, rates_json: Option<String>) -> NapiResult<String> {
    let records: Vec<PayrollRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = register::build_register(&records, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Spreadsheet grid (2-decimal text cells) for the Excel exporter.
#[napi]
pub fn payroll_export_rows(
    records_json: String,
    rates_json: Option<String>,
) -> NapiResult<String> {
    let records: Vec<PayrollRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = register::build_register(&records, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&register::export_rows(&output.result)).map_err(to_napi_error)
}

#[napi]
pub fn payslips(input_json: String, rates_json: Option<String>) -> NapiResult<String> {
    let input: PayslipBatchInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = payslip::build_payslips(&input, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[napi]
pub fn payroll_statistics(records_json: String, rates_json: Option<String>) -> NapiResult<String> {
    let records: Vec<PayrollRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = statistics::payroll_statistics(&records, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn deductions_breakdown(
    records_json: String,
    rates_json: Option<String>,
) -> NapiResult<String> {
    let records: Vec<PayrollRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = statistics::deductions_breakdown(&records, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn monthly_trend(
    records_json: String,
    year: i32,
    rates_json: Option<String>,
) -> NapiResult<String> {
    let records: Vec<PayrollRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let rates = resolve_rates(rates_json)?;
    let output = trends::monthly_trend(&records, year, &rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn salary_distribution(employees_json: String) -> NapiResult<String> {
    let employees: Vec<Employee> =
        serde_json::from_str(&employees_json).map_err(to_napi_error)?;
    serde_json::to_string(&trends::salary_distribution(&employees)).map_err(to_napi_error)
}
