//! KPIs and chart aggregates derived from a projected series
//!
//! Everything here is a pure function of a [`MonthlySeries`]:
//! - Column totals and margins
//! - Best/worst month by operating profit (earliest month wins ties)
//! - Payback month (first month with non-negative cumulative profit)
//! - Waterfall and pie structures for presentation
//!
//! # Example
//!
//! ```rust,ignore
//! let series = project(&config, &expenses, start)?;
//! let report = summarize(&series);
//! println!("Payback: {}", report.payback);
//! ```

mod charts;

pub use charts::{
    pie_slices, trend_points, waterfall, Measure, PieSlice, TrendPoint, WaterfallItem,
    CATEGORY_CAPEX, CATEGORY_CONTINGENCY, CATEGORY_OPEX, CATEGORY_TAXES, TOTAL_PROFIT_LABEL,
    TOTAL_REVENUE_LABEL,
};

use crate::projection::{MonthlyRecord, MonthlySeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A month of the series, identified by index and calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub index: usize,
    pub date: NaiveDate,
}

impl MonthRef {
    fn of(record: &MonthlyRecord) -> Self {
        Self {
            index: record.month_index,
            date: record.date,
        }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%b %Y"))
    }
}

/// Month in which cumulative profit first becomes non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Payback {
    Reached(MonthRef),
    NotReached,
}

impl Payback {
    pub fn month(&self) -> Option<MonthRef> {
        match self {
            Payback::Reached(month) => Some(*month),
            Payback::NotReached => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Payback::Reached(_))
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Reached(month) => month.fmt(f),
            Payback::NotReached => f.write_str("Not reached"),
        }
    }
}

/// Column sums across every month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTotals {
    pub revenue_club: f64,
    pub revenue_non_members: f64,
    pub total_revenue: f64,
    pub capex: f64,
    /// Per expense item, in list order
    pub expenses: Vec<(String, f64)>,
    pub expense_subtotal: f64,
    pub contingency: f64,
    pub taxes: f64,
    pub total_outflow: f64,
    pub operating_profit: f64,
}

impl ColumnTotals {
    fn from_series(series: &MonthlySeries) -> Self {
        let sum = |f: fn(&MonthlyRecord) -> f64| -> f64 { series.iter().map(f).sum() };

        let expenses: Vec<(String, f64)> = series
            .expense_names()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let total: f64 = series
                    .iter()
                    .map(|r| r.expenses.get(idx).copied().unwrap_or(0.0))
                    .sum();
                (name.clone(), total)
            })
            .collect();

        Self {
            revenue_club: sum(|r| r.revenue_club),
            revenue_non_members: sum(|r| r.revenue_non_members),
            total_revenue: sum(|r| r.total_revenue),
            capex: sum(|r| r.capex),
            expenses,
            expense_subtotal: sum(|r| r.expense_subtotal),
            contingency: sum(|r| r.contingency),
            taxes: sum(|r| r.taxes),
            total_outflow: sum(|r| r.total_outflow),
            operating_profit: sum(|r| r.operating_profit),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_months: usize,
    pub totals: ColumnTotals,

    /// Mean of monthly margins over months with positive revenue; 0 when no month has revenue
    pub average_margin: f64,

    /// Total profit over total revenue; 0 when total revenue is not positive
    pub aggregate_margin: f64,

    pub best_month: MonthRef,
    pub worst_month: MonthRef,
    pub payback: Payback,

    /// Cumulative profit at the last projected month
    pub final_cumulative_profit: f64,

    pub waterfall: Vec<WaterfallItem>,
    pub pie: Vec<PieSlice>,
}

/// Derive KPIs and chart aggregates from a series
///
/// Series built by the projection engine always hold at least one month.
pub fn summarize(series: &MonthlySeries) -> Report {
    let records = series.records();
    let first = &records[0];

    let totals = ColumnTotals::from_series(series);

    let aggregate_margin = if totals.total_revenue > 0.0 {
        totals.operating_profit / totals.total_revenue
    } else {
        0.0
    };

    let best_month = MonthRef::of(extreme_month(records, |candidate, best| candidate > best));
    let worst_month = MonthRef::of(extreme_month(records, |candidate, worst| candidate < worst));

    let final_cumulative_profit = records
        .last()
        .map(|r| r.cumulative_profit)
        .unwrap_or(first.cumulative_profit);

    Report {
        total_months: series.len(),
        average_margin: average_margin(records),
        aggregate_margin,
        best_month,
        worst_month,
        payback: payback(series),
        final_cumulative_profit,
        waterfall: waterfall(&totals),
        pie: pie_slices(&totals),
        totals,
    }
}

/// Mean of `profit / revenue` over months with positive revenue
pub fn average_margin(records: &[MonthlyRecord]) -> f64 {
    let (sum, count) = records
        .iter()
        .filter(|r| r.total_revenue > 0.0)
        .fold((0.0, 0usize), |(sum, count), r| {
            (sum + r.operating_profit / r.total_revenue, count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// First month whose cumulative profit is non-negative
pub fn payback(series: &MonthlySeries) -> Payback {
    series
        .iter()
        .find(|r| r.cumulative_profit >= 0.0)
        .map(|r| Payback::Reached(MonthRef::of(r)))
        .unwrap_or(Payback::NotReached)
}

/// Scan in month order, replacing the current pick only on a strict improvement
/// so the earliest month wins ties
fn extreme_month(records: &[MonthlyRecord], better: fn(f64, f64) -> bool) -> &MonthlyRecord {
    let mut pick = &records[0];
    for record in &records[1..] {
        if better(record.operating_profit, pick.operating_profit) {
            pick = record;
        }
    }
    pick
}
