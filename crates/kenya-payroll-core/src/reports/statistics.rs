use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::deductions::{DeductionBreakdown, StatutoryRates};
use crate::error::PayrollError;
use crate::payroll::PayrollRecord;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PayrollResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollStatistics {
    pub total_records: usize,
    pub unique_employees: usize,
    pub total_gross: Money,
    pub total_deductions: Money,
    pub total_net: Money,
    pub average_gross: Money,
    pub average_net: Money,
    pub min_gross: Money,
    pub max_gross: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentTotal {
    pub component: String,
    pub total: Money,
    /// Share of all statutory deductions (0-1)
    pub share: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsBreakdownReport {
    pub components: Vec<ComponentTotal>,
    pub total_deductions: Money,
}

// ---------------------------------------------------------------------------
// Function 1: Summary statistics
// ---------------------------------------------------------------------------

/// Totals, averages and range of a set of payroll records.
pub fn payroll_statistics(
    records: &[PayrollRecord],
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<PayrollStatistics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if records.is_empty() {
        return Err(PayrollError::InsufficientData(
            "Payroll statistics require at least one record".into(),
        ));
    }

    let breakdowns = resolve_all(records, rates)?;

    let mut total_gross = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;
    let mut min_gross = breakdowns[0].gross_salary;
    let mut max_gross = breakdowns[0].gross_salary;

    for b in &breakdowns {
        total_gross += b.gross_salary;
        total_deductions += b.total_deductions;
        total_net += b.net_salary;
        min_gross = min_gross.min(b.gross_salary);
        max_gross = max_gross.max(b.gross_salary);
    }

    let unique_employees = records
        .iter()
        .map(|r| r.employee_id)
        .collect::<HashSet<_>>()
        .len();
    if unique_employees < records.len() {
        warnings.push(format!(
            "{} records cover {} employees; averages are per record",
            records.len(),
            unique_employees
        ));
    }

    let count = Decimal::from(records.len() as u64);
    let output = PayrollStatistics {
        total_records: records.len(),
        unique_employees,
        total_gross,
        total_deductions,
        total_net,
        average_gross: total_gross / count,
        average_net: total_net / count,
        min_gross,
        max_gross,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payroll summary statistics over per-record statutory breakdowns",
        &serde_json::json!({ "records": records.len() }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Function 2: Deductions by component
// ---------------------------------------------------------------------------

/// Total NSSF, NHIF, PAYE and Housing Levy across records, with shares.
pub fn deductions_breakdown(
    records: &[PayrollRecord],
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<DeductionsBreakdownReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if records.is_empty() {
        warnings.push("No payroll records; all totals are zero".into());
    }

    let breakdowns = resolve_all(records, rates)?;

    let mut nssf = Decimal::ZERO;
    let mut nhif = Decimal::ZERO;
    let mut paye = Decimal::ZERO;
    let mut housing_levy = Decimal::ZERO;
    for b in &breakdowns {
        nssf += b.nssf;
        nhif += b.nhif;
        paye += b.paye;
        housing_levy += b.housing_levy;
    }
    let total_deductions = nssf + nhif + paye + housing_levy;

    let share = |amount: Money| {
        if total_deductions.is_zero() {
            Decimal::ZERO
        } else {
            amount / total_deductions
        }
    };

    let components = [
        ("NSSF", nssf),
        ("NHIF", nhif),
        ("PAYE", paye),
        ("Housing Levy", housing_levy),
    ]
    .into_iter()
    .map(|(name, total)| ComponentTotal {
        component: name.into(),
        total,
        share: share(total),
    })
    .collect();

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Statutory deductions aggregated by component",
        &serde_json::json!({ "records": records.len() }),
        warnings,
        elapsed,
        DeductionsBreakdownReport {
            components,
            total_deductions,
        },
    ))
}

fn resolve_all(
    records: &[PayrollRecord],
    rates: &StatutoryRates,
) -> PayrollResult<Vec<DeductionBreakdown>> {
    records
        .iter()
        .map(|r| r.resolve_deductions(rates).map(|(b, _)| b))
        .collect()
}
