use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deductions::schedule::{default_schedule, StatutoryRates};
use crate::money::{amount_from_f64, ensure_non_negative, format_kes};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PayrollResult;

const GROSS_FIELD: &str = "gross_salary";

/// Statutory deductions for one gross salary.
///
/// All fields are exact; round only when rendering (see [`crate::money`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub gross_salary: Money,
    /// National Social Security Fund contribution (capped percentage)
    pub nssf: Money,
    /// National Hospital Insurance Fund contribution (banded flat fee)
    pub nhif: Money,
    /// Pay-As-You-Earn income tax after personal relief
    pub paye: Money,
    /// Affordable Housing Levy
    pub housing_levy: Money,
    pub total_deductions: Money,
    pub net_salary: Money,
}

impl DeductionBreakdown {
    /// Share of gross taken by statutory deductions. Zero for zero gross, and
    /// for sub-cent gross where the flat NHIF fee makes the ratio unrepresentable.
    pub fn effective_rate(&self) -> Rate {
        self.total_deductions
            .checked_div(self.gross_salary)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Input for [`analyze_deductions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsInput {
    pub gross_salary: Money,
}

impl StatutoryRates {
    /// `min(gross * nssf_rate, nssf_cap)`
    pub fn nssf(&self, gross: Money) -> PayrollResult<Money> {
        let gross = ensure_non_negative(gross, GROSS_FIELD)?;
        Ok((gross * self.nssf_rate).min(self.nssf_cap))
    }

    /// Flat fee of the first band whose inclusive upper bound covers `gross`.
    /// Pay above every bound falls in the open-ended top band; zero pay owes nothing.
    pub fn nhif(&self, gross: Money) -> PayrollResult<Money> {
        let gross = ensure_non_negative(gross, GROSS_FIELD)?;
        if gross.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let band = self
            .nhif_bands
            .iter()
            .find(|band| band.upper.map_or(true, |upper| gross <= upper))
            .or_else(|| self.nhif_bands.last());
        Ok(band.map_or(Decimal::ZERO, |b| b.contribution))
    }

    /// Progressive tax on `gross - nssf`, less personal relief, floored at zero.
    pub fn paye(&self, gross: Money) -> PayrollResult<Money> {
        let taxable = gross - self.nssf(gross)?;
        let tax = self.progressive_tax(taxable) - self.personal_relief;
        Ok(tax.max(Decimal::ZERO))
    }

    /// `gross * housing_levy_rate`, uncapped.
    pub fn housing_levy(&self, gross: Money) -> PayrollResult<Money> {
        let gross = ensure_non_negative(gross, GROSS_FIELD)?;
        Ok(gross * self.housing_levy_rate)
    }

    /// Full breakdown under this schedule.
    pub fn breakdown(&self, gross: Money) -> PayrollResult<DeductionBreakdown> {
        let gross = ensure_non_negative(gross, GROSS_FIELD)?;
        let nssf = self.nssf(gross)?;
        let nhif = self.nhif(gross)?;
        let paye = self.paye(gross)?;
        let housing_levy = self.housing_levy(gross)?;
        let total_deductions = nssf + nhif + paye + housing_levy;

        // normalize() only drops trailing zeros picked up from rate scales
        Ok(DeductionBreakdown {
            gross_salary: gross.normalize(),
            nssf: nssf.normalize(),
            nhif: nhif.normalize(),
            paye: paye.normalize(),
            housing_levy: housing_levy.normalize(),
            total_deductions: total_deductions.normalize(),
            net_salary: (gross - total_deductions).normalize(),
        })
    }

    /// Tax before relief: each band taxes the slice of income that falls inside it.
    fn progressive_tax(&self, taxable: Money) -> Money {
        let mut tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;
        for band in &self.paye_bands {
            if taxable <= lower {
                break;
            }
            let top = band.upper.map_or(taxable, |upper| taxable.min(upper));
            tax += (top - lower) * band.rate;
            match band.upper {
                Some(upper) => lower = upper,
                None => break,
            }
        }
        tax
    }
}

// ---------------------------------------------------------------------------
// Free functions on the gazetted schedule
// ---------------------------------------------------------------------------

pub fn compute_nssf(gross: Money) -> PayrollResult<Money> {
    default_schedule().nssf(gross)
}

pub fn compute_nhif(gross: Money) -> PayrollResult<Money> {
    default_schedule().nhif(gross)
}

pub fn compute_paye(gross: Money) -> PayrollResult<Money> {
    default_schedule().paye(gross)
}

pub fn compute_housing_levy(gross: Money) -> PayrollResult<Money> {
    default_schedule().housing_levy(gross)
}

/// Statutory deductions and net pay for `gross` under the gazetted schedule.
///
/// Every report, export and preview goes through this (or
/// [`StatutoryRates::breakdown`] for a custom schedule) instead of
/// re-deriving the individual contributions.
pub fn compute_deductions(gross: Money) -> PayrollResult<DeductionBreakdown> {
    default_schedule().breakdown(gross)
}

/// [`compute_deductions`] for callers holding a native float.
/// `NaN`, infinities and negatives fail with `InvalidAmount`.
pub fn compute_deductions_f64(gross: f64) -> PayrollResult<DeductionBreakdown> {
    compute_deductions(amount_from_f64(gross, GROSS_FIELD)?)
}

/// Breakdown wrapped in the standard output envelope, with advisory warnings.
pub fn analyze_deductions(
    input: &DeductionsInput,
    rates: &StatutoryRates,
) -> PayrollResult<ComputationOutput<DeductionBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let breakdown = rates.breakdown(input.gross_salary)?;
    tracing::debug!(
        gross = %breakdown.gross_salary,
        effective_rate = %breakdown.effective_rate().round_dp(4),
        "deductions computed"
    );

    if breakdown.net_salary < Decimal::ZERO {
        warnings.push(format!(
            "Deductions ({}) exceed gross salary ({}); net salary is negative",
            format_kes(breakdown.total_deductions),
            format_kes(breakdown.gross_salary)
        ));
    }
    if breakdown.paye.is_zero() && !breakdown.gross_salary.is_zero() {
        warnings.push("PAYE fully offset by personal relief".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Kenyan statutory deductions: NSSF (capped), NHIF (banded), PAYE (progressive, after NSSF and personal relief), Housing Levy",
        input,
        warnings,
        elapsed,
        breakdown,
    ))
}
