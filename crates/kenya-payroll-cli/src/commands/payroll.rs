use clap::Args;
use serde_json::Value;

use kenya_payroll_core::deductions::StatutoryRates;
use kenya_payroll_core::payroll::payslip::{self, PayslipBatchInput};
use kenya_payroll_core::payroll::preview::{self, PreviewInput};
use kenya_payroll_core::payroll::register;
use kenya_payroll_core::payroll::PayrollRecord;

use crate::input;

/// Arguments for a payroll preview
#[derive(Args)]
pub struct PreviewArgs {
    /// Path to JSON input file (period and employees)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the payroll register
#[derive(Args)]
pub struct RegisterArgs {
    /// Path to JSON file with an array of payroll records
    #[arg(long)]
    pub input: Option<String>,

    /// Emit the spreadsheet grid (2-decimal text cells) instead of the full register
    #[arg(long)]
    pub export: bool,
}

/// Arguments for payslip generation
#[derive(Args)]
pub struct PayslipsArgs {
    /// Path to JSON input file (company, records, employees)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_preview(
    args: PreviewArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let preview_input: PreviewInput = input::read_input(args.input.as_deref(), "payroll preview")?;
    let result = preview::preview_payroll(&preview_input, rates)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_register(
    args: RegisterArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records: Vec<PayrollRecord> = input::read_input(args.input.as_deref(), "payroll register")?;
    let result = register::build_register(&records, rates)?;
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }
    if args.export {
        return Ok(serde_json::to_value(register::export_rows(&result.result))?);
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_payslips(
    args: PayslipsArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let batch: PayslipBatchInput = input::read_input(args.input.as_deref(), "payslips")?;
    let result = payslip::build_payslips(&batch, rates)?;
    Ok(serde_json::to_value(result)?)
}
