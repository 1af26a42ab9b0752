pub mod calculator;
pub mod schedule;

pub use calculator::{
    analyze_deductions, compute_deductions, compute_deductions_f64, compute_housing_levy,
    compute_nhif, compute_nssf, compute_paye, DeductionBreakdown, DeductionsInput,
};
pub use schedule::{default_schedule, NhifBand, PayeBand, StatutoryRates};
