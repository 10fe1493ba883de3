//! Core projection engine for monthly cash-flow projections

use super::growth::{grown_amount, monthly_rate};
use super::series::{MonthlyRecord, MonthlySeries};
use super::state::{month_offset, ProjectionState};
use crate::assumptions::{Config, ExpenseList};
use crate::error::ValidationError;
use chrono::NaiveDate;

/// Project `config` and `expenses` month by month from `start`
pub fn project(config: &Config, expenses: &ExpenseList, start: NaiveDate) -> Result<MonthlySeries, ValidationError> {
    ProjectionEngine::new(config, expenses)?.project(start)
}

/// Expense item prepared for projection
#[derive(Debug, Clone)]
struct ExpenseStream {
    base: f64,
    monthly_rate: f64,
}

/// Main projection engine
///
/// Holds validated inputs with growth rates already converted to monthly
/// factors; projecting is then a closed-form calculation per month.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: Config,
    months: usize,
    revenue_rate: f64,
    expense_names: Vec<String>,
    streams: Vec<ExpenseStream>,
}

impl ProjectionEngine {
    /// Validate inputs and create an engine
    pub fn new(config: &Config, expenses: &ExpenseList) -> Result<Self, ValidationError> {
        config.validate()?;
        expenses.validate()?;

        let months = usize::try_from(config.months)
            .map_err(|_| ValidationError::NonPositiveMonths(config.months))?;

        Ok(Self {
            config: config.clone(),
            months,
            revenue_rate: monthly_rate(config.revenue_growth_annual),
            expense_names: expenses.names().map(str::to_string).collect(),
            streams: expenses
                .iter()
                .map(|item| ExpenseStream {
                    base: item.monthly_base_amount,
                    monthly_rate: monthly_rate(item.annual_growth_rate),
                })
                .collect(),
        })
    }

    pub fn months(&self) -> usize {
        self.months
    }

    /// Run the projection starting at `start`
    pub fn project(&self, start: NaiveDate) -> Result<MonthlySeries, ValidationError> {
        log::debug!(
            "projecting {} months from {} with {} expense items",
            self.months,
            start,
            self.streams.len()
        );

        // The last month must have a calendar date before anything is allocated
        let last = self.months - 1;
        if month_offset(start, last).is_none() {
            return Err(ValidationError::DateOutOfRange { start, months: last });
        }

        let mut series = MonthlySeries::new(start, self.config.tax_rate, self.expense_names.clone(), self.months);
        let mut state = ProjectionState::new(start);

        for month in 0..self.months {
            if month > 0 {
                let previous = series.records()[month - 1].operating_profit;
                state.advance_month(previous)?;
            }

            let row = self.calculate_month(&state);

            if !row.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: format!("projected amounts for month {}", state.month_index),
                });
            }

            series.add_record(row);
        }

        Ok(series)
    }

    /// Calculate cashflows for a single month
    fn calculate_month(&self, state: &ProjectionState) -> MonthlyRecord {
        let i = state.month_index;
        let mut row = MonthlyRecord::new(i, state.date, self.streams.len());

        // Revenue segments grow independently
        row.revenue_club = grown_amount(self.config.revenue_club, self.revenue_rate, i);
        row.revenue_non_members = grown_amount(self.config.revenue_non_members, self.revenue_rate, i);
        row.total_revenue = row.revenue_club + row.revenue_non_members;

        // Capex (only in month 0)
        if i == 0 {
            row.capex = self.config.capex;
        }

        row.expenses.extend(
            self.streams
                .iter()
                .map(|stream| grown_amount(stream.base, stream.monthly_rate, i)),
        );
        row.expense_subtotal = row.expenses.iter().sum();

        // Contingency is reserved on OPEX only, never on capex or taxes
        row.contingency = row.expense_subtotal * self.config.contingency_rate;
        row.taxes = row.total_revenue * self.config.tax_rate;
        row.total_outflow = row.expense_subtotal + row.contingency + row.taxes + row.capex;

        row.operating_profit = row.total_revenue - row.total_outflow;
        row.cumulative_profit = state.cumulative_profit + row.operating_profit;

        row
    }
}
