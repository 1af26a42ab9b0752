use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deductions::{DeductionBreakdown, StatutoryRates};
use crate::error::PayrollError;
use crate::types::{with_metadata, ComputationOutput, Money, PayPeriod};
use crate::PayrollResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewEmployee {
    pub employee_id: u64,
    pub employee: String,
    pub gross_salary: Money,
    pub attendance_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewInput {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub employees: Vec<PreviewEmployee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewLine {
    pub employee_id: u64,
    pub employee: String,
    pub attendance_days: u32,
    /// No attendance recorded for the period
    #[serde(rename = "anomaly_flag")]
    pub anomaly: bool,
    #[serde(flatten)]
    pub deductions: DeductionBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub total_employees: usize,
    pub total_gross: Money,
    pub total_deductions: Money,
    pub total_net: Money,
    pub anomalies: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewOutput {
    pub period: PayPeriod,
    pub preview: Vec<PreviewLine>,
    pub summary: PreviewSummary,
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Estimate a payroll run before it is submitted.
///
/// Every employee is run through the calculator and the totals are summed
/// from the exact per-employee breakdowns. Employees with zero attendance
/// days are flagged as anomalies. The backend recomputes the run on submit;
/// these figures are for review only.
pub fn preview_payroll(
    input: &PreviewInput,
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<PreviewOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let period = PayPeriod::new(input.period_start, input.period_end)?;
    if input.employees.is_empty() {
        return Err(PayrollError::InsufficientData(
            "Payroll preview requires at least one employee".into(),
        ));
    }

    let mut preview = Vec::with_capacity(input.employees.len());
    let mut total_gross = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;
    let mut anomalies = 0usize;

    for emp in &input.employees {
        let deductions = rates.breakdown(emp.gross_salary).map_err(|e| match e {
            PayrollError::InvalidAmount { reason, .. } => PayrollError::InvalidAmount {
                field: format!("employees[{}].gross_salary", emp.employee_id),
                reason,
            },
            other => other,
        })?;

        let anomaly = emp.attendance_days == 0;
        if anomaly {
            anomalies += 1;
            tracing::debug!(employee_id = emp.employee_id, "no attendance recorded for period");
            warnings.push(format!(
                "{} (#{}) has no attendance recorded for {} to {}",
                emp.employee, emp.employee_id, period.start, period.end
            ));
        }
        if emp.attendance_days as i64 > period.days() {
            warnings.push(format!(
                "{} (#{}) has {} attendance days in a {}-day period",
                emp.employee,
                emp.employee_id,
                emp.attendance_days,
                period.days()
            ));
        }

        total_gross += deductions.gross_salary;
        total_deductions += deductions.total_deductions;
        total_net += deductions.net_salary;

        preview.push(PreviewLine {
            employee_id: emp.employee_id,
            employee: emp.employee.clone(),
            attendance_days: emp.attendance_days,
            anomaly,
            deductions,
        });
    }

    tracing::debug!(
        employees = preview.len(),
        anomalies,
        "payroll preview computed"
    );

    let output = PreviewOutput {
        period,
        summary: PreviewSummary {
            total_employees: preview.len(),
            total_gross,
            total_deductions,
            total_net,
            anomalies,
        },
        preview,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payroll preview estimate (statutory deductions per employee); the backend calculation on submit is authoritative",
        &serde_json::json!({
            "period_start": input.period_start,
            "period_end": input.period_end,
            "employees": input.employees.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
