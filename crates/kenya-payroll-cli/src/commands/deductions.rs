use clap::Args;
use serde_json::Value;

use kenya_payroll_core::deductions::{self, DeductionsInput, StatutoryRates};
use kenya_payroll_core::money::parse_amount;

use crate::input;

/// Arguments for a single-salary deductions breakdown
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DeductionsArgs {
    /// Monthly gross salary (e.g. 50000, "50,000.00" or "KES 50,000")
    #[arg(long)]
    pub gross: Option<String>,

    /// Path to JSON input file (overrides --gross)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for showing the statutory schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Show PAYE bands with lower bounds and accumulated base tax
    #[arg(long)]
    pub paye_detail: bool,
}

pub fn run_deductions(
    args: DeductionsArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let deductions_input: DeductionsInput = match (&args.input, &args.gross) {
        (None, Some(gross)) => DeductionsInput {
            gross_salary: parse_amount(gross, "gross_salary")?,
        },
        (path, _) => input::read_input(path.as_deref(), "deductions (or pass --gross)")?,
    };

    tracing::debug!(gross = %deductions_input.gross_salary, "computing deductions");
    let result = deductions::analyze_deductions(&deductions_input, rates)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: ScheduleArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    if args.paye_detail {
        return Ok(serde_json::to_value(rates.paye_schedule())?);
    }
    Ok(serde_json::to_value(rates)?)
}
