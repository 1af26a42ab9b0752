use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::PayrollError;
use crate::types::{Money, Rate};
use crate::PayrollResult;

// ---------------------------------------------------------------------------
// Gazetted monthly schedule
// ---------------------------------------------------------------------------

/// NSSF employee contribution rate on gross pay.
pub const NSSF_RATE: Rate = dec!(0.06);

/// Monthly ceiling on the NSSF employee contribution.
pub const NSSF_CAP: Money = dec!(1080);

/// Affordable Housing Levy rate on gross pay (uncapped).
pub const HOUSING_LEVY_RATE: Rate = dec!(0.015);

/// Monthly personal relief credited against computed PAYE.
pub const PERSONAL_RELIEF: Money = dec!(2400);

/// Progressive PAYE bands on taxable pay (gross less NSSF).
pub const PAYE_BANDS: [PayeBand; 3] = [
    PayeBand { upper: Some(dec!(24000)), rate: dec!(0.10) },
    PayeBand { upper: Some(dec!(32333)), rate: dec!(0.25) },
    PayeBand { upper: None, rate: dec!(0.30) },
];

/// NHIF flat contributions by gross pay. Upper bounds are inclusive.
pub const NHIF_BANDS: [NhifBand; 17] = [
    NhifBand { upper: Some(dec!(5999)), contribution: dec!(150) },
    NhifBand { upper: Some(dec!(7999)), contribution: dec!(300) },
    NhifBand { upper: Some(dec!(11999)), contribution: dec!(400) },
    NhifBand { upper: Some(dec!(14999)), contribution: dec!(500) },
    NhifBand { upper: Some(dec!(19999)), contribution: dec!(600) },
    NhifBand { upper: Some(dec!(24999)), contribution: dec!(750) },
    NhifBand { upper: Some(dec!(29999)), contribution: dec!(850) },
    NhifBand { upper: Some(dec!(34999)), contribution: dec!(900) },
    NhifBand { upper: Some(dec!(39999)), contribution: dec!(950) },
    NhifBand { upper: Some(dec!(44999)), contribution: dec!(1000) },
    NhifBand { upper: Some(dec!(49999)), contribution: dec!(1100) },
    NhifBand { upper: Some(dec!(59999)), contribution: dec!(1200) },
    NhifBand { upper: Some(dec!(69999)), contribution: dec!(1300) },
    NhifBand { upper: Some(dec!(79999)), contribution: dec!(1400) },
    NhifBand { upper: Some(dec!(89999)), contribution: dec!(1500) },
    NhifBand { upper: Some(dec!(99999)), contribution: dec!(1600) },
    NhifBand { upper: None, contribution: dec!(1700) },
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One PAYE band. `upper == None` marks the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub rate: Rate,
}

/// One NHIF band. `upper == None` marks the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NhifBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub contribution: Money,
}

/// Full statutory schedule used by the calculator.
///
/// [`StatutoryRates::kenya`] (also the `Default`) is the gazetted monthly
/// schedule. A replacement can be loaded from JSON/YAML when rates change;
/// call [`StatutoryRates::validate`] before using one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    pub nssf_rate: Rate,
    pub nssf_cap: Money,
    pub housing_levy_rate: Rate,
    pub personal_relief: Money,
    pub paye_bands: Vec<PayeBand>,
    pub nhif_bands: Vec<NhifBand>,
}

/// PAYE band annotated with its lower bound and the tax accumulated below it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayeBandSummary {
    pub lower: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub rate: Rate,
    pub base_tax: Money,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self::kenya()
    }
}

static DEFAULT_SCHEDULE: OnceLock<StatutoryRates> = OnceLock::new();

/// Shared, immutable gazetted schedule used by the free functions.
pub fn default_schedule() -> &'static StatutoryRates {
    DEFAULT_SCHEDULE.get_or_init(StatutoryRates::kenya)
}

impl StatutoryRates {
    pub fn kenya() -> Self {
        StatutoryRates {
            nssf_rate: NSSF_RATE,
            nssf_cap: NSSF_CAP,
            housing_levy_rate: HOUSING_LEVY_RATE,
            personal_relief: PERSONAL_RELIEF,
            paye_bands: PAYE_BANDS.to_vec(),
            nhif_bands: NHIF_BANDS.to_vec(),
        }
    }

    /// Check that the schedule is internally consistent.
    pub fn validate(&self) -> PayrollResult<()> {
        validate_rate("nssf_rate", self.nssf_rate)?;
        validate_rate("housing_levy_rate", self.housing_levy_rate)?;
        validate_non_negative("nssf_cap", self.nssf_cap)?;
        validate_non_negative("personal_relief", self.personal_relief)?;

        let paye_uppers: Vec<Option<Money>> = self.paye_bands.iter().map(|b| b.upper).collect();
        validate_band_bounds("paye_bands", &paye_uppers)?;
        for (i, band) in self.paye_bands.iter().enumerate() {
            validate_rate(&format!("paye_bands[{i}].rate"), band.rate)?;
        }

        let nhif_uppers: Vec<Option<Money>> = self.nhif_bands.iter().map(|b| b.upper).collect();
        validate_band_bounds("nhif_bands", &nhif_uppers)?;
        let mut previous = Decimal::ZERO;
        for (i, band) in self.nhif_bands.iter().enumerate() {
            let field = format!("nhif_bands[{i}].contribution");
            validate_non_negative(&field, band.contribution)?;
            if band.contribution < previous {
                return Err(PayrollError::InvalidInput {
                    field,
                    reason: "NHIF contributions must not decrease as pay rises".into(),
                });
            }
            previous = band.contribution;
        }

        Ok(())
    }

    /// PAYE bands with their lower bounds and accumulated base tax.
    pub fn paye_schedule(&self) -> Vec<PayeBandSummary> {
        let mut lower = Decimal::ZERO;
        let mut base_tax = Decimal::ZERO;
        let mut out = Vec::with_capacity(self.paye_bands.len());
        for band in &self.paye_bands {
            out.push(PayeBandSummary {
                lower,
                upper: band.upper,
                rate: band.rate,
                base_tax,
            });
            if let Some(upper) = band.upper {
                base_tax += (upper - lower) * band.rate;
                lower = upper;
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_rate(field: &str, rate: Rate) -> PayrollResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(PayrollError::InvalidInput {
            field: field.into(),
            reason: format!("Rate must be between 0 and 1, got {rate}"),
        });
    }
    Ok(())
}

fn validate_non_negative(field: &str, amount: Money) -> PayrollResult<()> {
    if amount < Decimal::ZERO {
        return Err(PayrollError::InvalidInput {
            field: field.into(),
            reason: format!("Amount cannot be negative, got {amount}"),
        });
    }
    Ok(())
}

/// Bands need strictly ascending positive bounds and a single open-ended last band.
fn validate_band_bounds(table: &str, uppers: &[Option<Money>]) -> PayrollResult<()> {
    if uppers.is_empty() {
        return Err(PayrollError::InvalidInput {
            field: table.into(),
            reason: "At least one band is required".into(),
        });
    }

    let last = uppers.len() - 1;
    let mut previous = Decimal::ZERO;
    for (i, upper) in uppers.iter().enumerate() {
        match upper {
            Some(bound) if i == last => {
                return Err(PayrollError::InvalidInput {
                    field: format!("{table}[{i}].upper"),
                    reason: format!("Last band must be open-ended, got upper bound {bound}"),
                });
            }
            None if i != last => {
                return Err(PayrollError::InvalidInput {
                    field: format!("{table}[{i}].upper"),
                    reason: "Only the last band may be open-ended".into(),
                });
            }
            Some(bound) if *bound <= previous => {
                return Err(PayrollError::InvalidInput {
                    field: format!("{table}[{i}].upper"),
                    reason: format!("Upper bounds must be strictly ascending, got {bound} after {previous}"),
                });
            }
            Some(bound) => previous = *bound,
            None => {}
        }
    }
    Ok(())
}
