mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::deductions::{DeductionsArgs, ScheduleArgs};
use commands::payroll::{PayslipsArgs, PreviewArgs, RegisterArgs};
use commands::reports::{BreakdownArgs, DistributionArgs, MonthlyArgs, StatisticsArgs};

/// Kenyan statutory payroll deductions
#[derive(Parser)]
#[command(
    name = "kpay",
    version,
    about = "Kenyan statutory payroll deductions (NSSF, NHIF, PAYE, Housing Levy)",
    long_about = "A CLI for computing Kenyan statutory payroll deductions with decimal \
                  precision. Supports single-salary breakdowns, payroll previews, \
                  payroll registers, payslip data and payroll reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Statutory schedule override (JSON or YAML)
    #[arg(long, global = true)]
    rates: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Statutory deductions and net pay for one gross salary
    Deductions(DeductionsArgs),
    /// Show the statutory schedule in use
    Schedule(ScheduleArgs),
    /// Estimate a payroll run before submission
    Preview(PreviewArgs),
    /// Payroll register for backend records
    Register(RegisterArgs),
    /// Payslip data for records joined with employees
    Payslips(PayslipsArgs),
    /// Summary statistics over payroll records
    Statistics(StatisticsArgs),
    /// Deductions totals by statutory component
    Breakdown(BreakdownArgs),
    /// Monthly gross and net pay for a year
    Monthly(MonthlyArgs),
    /// Employee head-count by salary band
    Distribution(DistributionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("kpay={level},kenya_payroll_core={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rates = match config::load_rates(cli.rates.as_deref()) {
        Ok(rates) => rates,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Deductions(args) => commands::deductions::run_deductions(args, &rates),
        Commands::Schedule(args) => commands::deductions::run_schedule(args, &rates),
        Commands::Preview(args) => commands::payroll::run_preview(args, &rates),
        Commands::Register(args) => commands::payroll::run_register(args, &rates),
        Commands::Payslips(args) => commands::payroll::run_payslips(args, &rates),
        Commands::Statistics(args) => commands::reports::run_statistics(args, &rates),
        Commands::Breakdown(args) => commands::reports::run_breakdown(args, &rates),
        Commands::Monthly(args) => commands::reports::run_monthly(args, &rates),
        Commands::Distribution(args) => commands::reports::run_distribution(args),
        Commands::Version => {
            println!("kpay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
