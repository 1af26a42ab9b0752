use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deductions::{DeductionBreakdown, StatutoryRates};
use crate::money::format_amount;
use crate::payroll::records::{DeductionSource, PayrollRecord, PayrollStatus};
use crate::types::{with_metadata, ComputationOutput};
use crate::PayrollResult;

/// One line of the payroll register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRow {
    pub record_id: u64,
    pub employee_id: u64,
    pub employee: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: PayrollStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_days: Option<u32>,
    pub source: DeductionSource,
    pub deductions: DeductionBreakdown,
}

/// Register line rendered for a spreadsheet or CSV cell grid.
///
/// Amounts are rounded to cents here and nowhere earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Employee ID")]
    pub employee_id: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
    #[serde(rename = "Period Start")]
    pub period_start: String,
    #[serde(rename = "Period End")]
    pub period_end: String,
    #[serde(rename = "Gross Salary")]
    pub gross_salary: String,
    #[serde(rename = "NSSF")]
    pub nssf: String,
    #[serde(rename = "NHIF")]
    pub nhif: String,
    #[serde(rename = "PAYE")]
    pub paye: String,
    #[serde(rename = "Housing Levy")]
    pub housing_levy: String,
    #[serde(rename = "Total Deductions")]
    pub total_deductions: String,
    #[serde(rename = "Net Salary")]
    pub net_salary: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Attendance Days")]
    pub attendance_days: String,
}

impl RegisterRow {
    pub fn to_export_row(&self) -> ExportRow {
        let d = &self.deductions;
        ExportRow {
            employee_id: self.employee_id.to_string(),
            employee_name: self.employee.clone(),
            period_start: self.period_start.to_string(),
            period_end: self.period_end.to_string(),
            gross_salary: format_amount(d.gross_salary),
            nssf: format_amount(d.nssf),
            nhif: format_amount(d.nhif),
            paye: format_amount(d.paye),
            housing_levy: format_amount(d.housing_levy),
            total_deductions: format_amount(d.total_deductions),
            net_salary: format_amount(d.net_salary),
            status: format!("{:?}", self.status),
            attendance_days: self
                .attendance_days
                .map_or_else(|| "N/A".to_string(), |days| days.to_string()),
        }
    }
}

/// Build the payroll register for a list of backend records.
pub fn build_register(
    records: &[PayrollRecord],
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<Vec<RegisterRow>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for rec in records {
        rec.period()?;
        let (deductions, source) = rec.resolve_deductions(rates)?;
        if rec.status.is_final() && source == DeductionSource::Estimated {
            warnings.push(format!(
                "Record #{} is {:?} but has no recorded deductions; figures are estimated",
                rec.id, rec.status
            ));
        }
        tracing::trace!(record_id = rec.id, ?source, "register row resolved");

        rows.push(RegisterRow {
            record_id: rec.id,
            employee_id: rec.employee_id,
            employee: rec.employee.clone(),
            period_start: rec.period_start,
            period_end: rec.period_end,
            status: rec.status,
            attendance_days: rec.attendance_days,
            source,
            deductions,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payroll register: backend figures for approved/processed records, statutory estimate otherwise",
        &serde_json::json!({ "records": records.len() }),
        warnings,
        elapsed,
        rows,
    ))
}

/// Export grid for the register, one row per record.
pub fn export_rows(rows: &[RegisterRow]) -> Vec<ExportRow> {
    rows.iter().map(RegisterRow::to_export_row).collect()
}
