//! Cash-flow projection CLI
//!
//! Loads assumptions, projects the monthly cash flow, prints the KPI summary
//! and exports the table.
//!
//! Exit codes: 0 on success, 2 when the assumptions fail validation, 1 otherwise.

use anyhow::Context;
use cashflow_projection::assumptions::{self, Config, ExpenseList};
use cashflow_projection::export::{self, render_summary, render_table, ExportFormat};
use cashflow_projection::{project, summarize, ValidationError};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "cashflow", version, about = "Project a monthly cash-flow statement")]
struct Cli {
    /// First projected month (YYYY-MM-DD)
    #[arg(long, default_value = "2025-08-01")]
    start: NaiveDate,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Spreadsheet)]
    export: ExportFormat,

    /// Configuration document (defaults are used when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Expense document: an array of items or a name-to-amount map
    #[arg(long)]
    expenses: Option<PathBuf>,

    /// Name-to-growth map paired with a name-to-amount expense document
    #[arg(long, requires = "expenses")]
    growth: Option<PathBuf>,

    /// Override the number of projected months
    #[arg(long, allow_negative_numbers = true)]
    months: Option<i64>,

    /// Output file (defaults to cashflow.<ext> in the working directory)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.chain().any(|cause| cause.is::<ValidationError>()) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => assumptions::load_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(months) = cli.months {
        config.months = months;
    }

    let expenses = load_expenses(cli)?;
    log::info!(
        "projecting {} months from {} with {} expense items",
        config.months,
        cli.start,
        expenses.len()
    );

    let series = project(&config, &expenses, cli.start)?;
    let report = summarize(&series);

    if cli.export == ExportFormat::None {
        println!("{}", render_table(&series));
    }
    print!("{}", render_summary(&report));

    if let Some(path) = export::export(&series, &report, cli.export, cli.output.as_deref())
        .context("exporting projection")?
    {
        println!("\nExported to {}", path.display());
    }

    Ok(())
}

fn load_expenses(cli: &Cli) -> anyhow::Result<ExpenseList> {
    let Some(path) = &cli.expenses else {
        return Ok(ExpenseList::new());
    };

    let expenses = match &cli.growth {
        Some(growth) => assumptions::load_split_expenses(path, Some(growth)),
        None => assumptions::load_expenses(path),
    };
    expenses.with_context(|| format!("loading expenses from {}", path.display()))
}
