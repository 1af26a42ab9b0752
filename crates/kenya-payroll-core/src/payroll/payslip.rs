use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::deductions::{DeductionBreakdown, StatutoryRates};
use crate::error::PayrollError;
use crate::payroll::records::{DeductionSource, Employee, PayrollRecord, PayrollStatus};
use crate::types::{with_metadata, ComputationOutput, Money, PayPeriod};
use crate::PayrollResult;

const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub hr_contact: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "GLIMMER LIMITED".into(),
            hr_contact: "hr@glimmerlimited.com".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipEmployee {
    pub id: u64,
    pub name: String,
    pub department: String,
    pub position: String,
    pub national_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Earnings {
    pub gross_salary: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_days: Option<u32>,
}

/// Everything a payslip renderer needs, with no layout decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payslip {
    pub payslip_id: u64,
    pub company: CompanyInfo,
    pub employee: PayslipEmployee,
    pub period: PayPeriod,
    /// ISO date, or "Pending" until the backend records a payment
    pub payment_date: String,
    pub status: PayrollStatus,
    pub earnings: Earnings,
    pub deductions: DeductionBreakdown,
    pub source: DeductionSource,
    pub net_salary: Money,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipBatchInput {
    #[serde(default)]
    pub company: CompanyInfo,
    pub records: Vec<PayrollRecord>,
    pub employees: Vec<Employee>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Assemble one payslip from a payroll record and its employee.
pub fn build_payslip(
    record: &PayrollRecord,
    employee: &Employee,
    company: &CompanyInfo,
    rates: &StatutoryRates,
) -> PayrollResult<Payslip> {
    if record.employee_id != employee.id {
        return Err(PayrollError::InvalidInput {
            field: "employee".into(),
            reason: format!(
                "Record #{} belongs to employee #{}, not #{}",
                record.id, record.employee_id, employee.id
            ),
        });
    }

    let period = record.period()?;
    let (deductions, source) = record.resolve_deductions(rates)?;

    Ok(Payslip {
        payslip_id: record.id,
        company: company.clone(),
        employee: PayslipEmployee {
            id: employee.id,
            name: employee.name.clone(),
            department: or_not_available(&employee.department),
            position: or_not_available(&employee.position),
            national_id: or_not_available(&employee.national_id),
        },
        period,
        payment_date: record
            .payment_date
            .map_or_else(|| "Pending".to_string(), |d| d.to_string()),
        status: record.status,
        earnings: Earnings {
            gross_salary: deductions.gross_salary,
            attendance_days: record.attendance_days,
        },
        net_salary: deductions.net_salary,
        deductions,
        source,
        file_name: payslip_file_name(&employee.name, &period),
    })
}

/// Payslips for every record whose employee is known.
///
/// Records that reference an unknown employee are skipped with a warning.
pub fn build_payslips(
    input: &PayslipBatchInput,
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<Vec<Payslip>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let by_id: HashMap<u64, &Employee> = input.employees.iter().map(|e| (e.id, e)).collect();

    let mut payslips = Vec::with_capacity(input.records.len());
    for record in &input.records {
        match by_id.get(&record.employee_id) {
            Some(employee) => {
                payslips.push(build_payslip(record, employee, &input.company, rates)?);
            }
            None => {
                tracing::warn!(
                    record_id = record.id,
                    employee_id = record.employee_id,
                    "skipping payslip for unknown employee"
                );
                warnings.push(format!(
                    "Record #{} skipped: employee #{} not found",
                    record.id, record.employee_id
                ));
            }
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payslip documents joined from payroll records and employee master data",
        &serde_json::json!({
            "records": input.records.len(),
            "employees": input.employees.len(),
            "company": input.company.name,
        }),
        warnings,
        elapsed,
        payslips,
    ))
}

/// `Payslip_<Name_With_Underscores>_<period_end>.pdf`
pub fn payslip_file_name(employee_name: &str, period: &PayPeriod) -> String {
    let name: Vec<&str> = employee_name.split_whitespace().collect();
    format!("Payslip_{}_{}.pdf", name.join("_"), period.end)
}

fn or_not_available(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
