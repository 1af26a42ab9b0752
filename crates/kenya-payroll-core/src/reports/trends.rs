use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deductions::StatutoryRates;
use crate::payroll::{Employee, PayrollRecord};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PayrollResult;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Salary bands for the distribution report: (label, exclusive upper bound).
const SALARY_BANDS: [(&str, Option<Money>); 4] = [
    ("0-30k", Some(dec!(30000))),
    ("30k-50k", Some(dec!(50000))),
    ("50k-70k", Some(dec!(70000))),
    ("70k+", None),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    pub gross: Money,
    pub net: Money,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBandCount {
    pub band: String,
    pub count: usize,
}

/// Gross and net pay per calendar month for runs starting in `year`.
///
/// Net is the true statutory net of each record, not a flat approximation.
pub fn monthly_trend(
    records: &[PayrollRecord],
    year: i32,
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<Vec<MonthTotal>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut months: Vec<MonthTotal> = MONTHS
        .iter()
        .map(|m| MonthTotal {
            month: (*m).to_string(),
            gross: Decimal::ZERO,
            net: Decimal::ZERO,
            count: 0,
        })
        .collect();

    let mut included = 0usize;
    for rec in records {
        if rec.period_start.year() != year {
            continue;
        }
        let (b, _) = rec.resolve_deductions(rates)?;
        let slot = &mut months[rec.period_start.month0() as usize];
        slot.gross += b.gross_salary;
        slot.net += b.net_salary;
        slot.count += 1;
        included += 1;
    }

    if included == 0 {
        warnings.push(format!("No payroll records start in {year}"));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Monthly gross and statutory net pay by period start month",
        &serde_json::json!({ "year": year, "records": records.len(), "included": included }),
        warnings,
        elapsed,
        months,
    ))
}

/// Head-count by base salary band. Lower bounds are inclusive.
pub fn salary_distribution(employees: &[Employee]) -> ComputationOutput<Vec<SalaryBandCount>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut counts = [0usize; SALARY_BANDS.len()];
    for emp in employees {
        let Some(salary) = emp.base_salary else {
            warnings.push(format!("{} (#{}) has no base salary; skipped", emp.name, emp.id));
            continue;
        };
        let idx = SALARY_BANDS
            .iter()
            .position(|(_, upper)| upper.map_or(true, |u| salary < u))
            .unwrap_or(SALARY_BANDS.len() - 1);
        counts[idx] += 1;
    }

    let bands = SALARY_BANDS
        .iter()
        .zip(counts)
        .map(|((label, _), count)| SalaryBandCount {
            band: (*label).to_string(),
            count,
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Employee head-count by base salary band",
        &serde_json::json!({ "employees": employees.len() }),
        warnings,
        elapsed,
        bands,
    )
}
