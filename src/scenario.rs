//! Scenario runner for batch projections
//!
//! Holds one expense list and start date, then projects many configurations
//! against them. Batches run in parallel; each projection is independent.

use crate::assumptions::{Config, ExpenseList};
use crate::error::ValidationError;
use crate::projection::{project, MonthlySeries};
use crate::report::{summarize, Report};
use chrono::NaiveDate;
use rayon::prelude::*;

/// Series and report for one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub series: MonthlySeries,
    pub report: Report,
}

/// Runner projecting configurations against a fixed expense list
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(expenses, start);
///
/// for (rate, report) in runner.revenue_growth_sensitivity(&config, &[0.0, 0.1, 0.2])? {
///     println!("{rate}: {}", report.payback);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    expenses: ExpenseList,
    start: NaiveDate,
}

impl ScenarioRunner {
    pub fn new(expenses: ExpenseList, start: NaiveDate) -> Self {
        Self { expenses, start }
    }

    /// Run a single projection with the given config
    pub fn run(&self, config: &Config) -> Result<ScenarioResult, ValidationError> {
        let series = project(config, &self.expenses, self.start)?;
        let report = summarize(&series);
        Ok(ScenarioResult { series, report })
    }

    /// Run every config in parallel, results in input order
    ///
    /// Fails with the first invalid config (by position).
    pub fn run_batch(&self, configs: &[Config]) -> Result<Vec<ScenarioResult>, ValidationError> {
        let results: Vec<Result<ScenarioResult, ValidationError>> =
            configs.par_iter().map(|config| self.run(config)).collect();
        results.into_iter().collect()
    }

    /// Reports for `base` with each revenue growth rate substituted in
    pub fn revenue_growth_sensitivity(
        &self,
        base: &Config,
        rates: &[f64],
    ) -> Result<Vec<(f64, Report)>, ValidationError> {
        let configs: Vec<Config> = rates
            .iter()
            .map(|&rate| Config {
                revenue_growth_annual: rate,
                ..base.clone()
            })
            .collect();

        let results = self.run_batch(&configs)?;
        Ok(rates
            .iter()
            .copied()
            .zip(results.into_iter().map(|r| r.report))
            .collect())
    }

    pub fn expenses(&self) -> &ExpenseList {
        &self.expenses
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
}
