use clap::Args;
use serde_json::Value;

use kenya_payroll_core::deductions::StatutoryRates;
use kenya_payroll_core::payroll::{Employee, PayrollRecord};
use kenya_payroll_core::reports::{statistics, trends};

use crate::input;

/// Arguments for payroll summary statistics
#[derive(Args)]
pub struct StatisticsArgs {
    /// Path to JSON file with an array of payroll records
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the deductions breakdown
#[derive(Args)]
pub struct BreakdownArgs {
    /// Path to JSON file with an array of payroll records
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the monthly trend
#[derive(Args)]
pub struct MonthlyArgs {
    /// Calendar year of the pay periods to include
    #[arg(long)]
    pub year: i32,

    /// Path to JSON file with an array of payroll records
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the salary distribution
#[derive(Args)]
pub struct DistributionArgs {
    /// Path to JSON file with an array of employees
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_statistics(
    args: StatisticsArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records: Vec<PayrollRecord> = input::read_input(args.input.as_deref(), "statistics")?;
    let result = statistics::payroll_statistics(&records, rates)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_breakdown(
    args: BreakdownArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records: Vec<PayrollRecord> =
        input::read_input(args.input.as_deref(), "deductions breakdown")?;
    let result = statistics::deductions_breakdown(&records, rates)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_monthly(
    args: MonthlyArgs,
    rates: &StatutoryRates,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records: Vec<PayrollRecord> = input::read_input(args.input.as_deref(), "monthly trend")?;
    let result = trends::monthly_trend(&records, args.year, rates)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_distribution(args: DistributionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let employees: Vec<Employee> =
        input::read_input(args.input.as_deref(), "salary distribution")?;
    Ok(serde_json::to_value(trends::salary_distribution(&employees))?)
}
