//! Aggregates feeding the waterfall, pie and trend charts

use super::ColumnTotals;
use crate::projection::MonthlySeries;
use chrono::NaiveDate;
use serde::Serialize;

pub const TOTAL_REVENUE_LABEL: &str = "Total Revenue";
pub const TOTAL_PROFIT_LABEL: &str = "Total Profit";
pub const CATEGORY_OPEX: &str = "OPEX";
pub const CATEGORY_TAXES: &str = "Taxes";
pub const CATEGORY_CONTINGENCY: &str = "Contingency";
pub const CATEGORY_CAPEX: &str = "Capex";

/// How a waterfall bar is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Bar starting from zero
    Absolute,
    /// Step up or down from the running total
    Relative,
    /// Closing bar showing the running total
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallItem {
    pub category: String,
    pub value: f64,
    pub measure: Measure,
}

impl WaterfallItem {
    fn new(category: &str, value: f64, measure: Measure) -> Self {
        Self {
            category: category.to_string(),
            value,
            measure,
        }
    }
}

/// Waterfall from total revenue down to total profit
///
/// Order is part of the contract: revenue first, then the non-zero outflow
/// categories from most negative to least, then the closing profit total.
/// Categories with equal values keep the order OPEX, Taxes, Contingency, Capex.
pub fn waterfall(totals: &ColumnTotals) -> Vec<WaterfallItem> {
    let mut outflows: Vec<WaterfallItem> = [
        (CATEGORY_OPEX, totals.expense_subtotal),
        (CATEGORY_TAXES, totals.taxes),
        (CATEGORY_CONTINGENCY, totals.contingency),
        (CATEGORY_CAPEX, totals.capex),
    ]
    .into_iter()
    .map(|(category, total)| WaterfallItem::new(category, -total, Measure::Relative))
    .filter(|item| item.value != 0.0)
    .collect();

    // sort_by is stable, so ties keep declaration order
    outflows.sort_by(|a, b| a.value.total_cmp(&b.value));

    let mut items = Vec::with_capacity(outflows.len() + 2);
    items.push(WaterfallItem::new(TOTAL_REVENUE_LABEL, totals.total_revenue, Measure::Absolute));
    items.extend(outflows);
    items.push(WaterfallItem::new(TOTAL_PROFIT_LABEL, totals.operating_profit, Measure::Total));
    items
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// Per-expense totals with a positive value, in expense list order
pub fn pie_slices(totals: &ColumnTotals) -> Vec<PieSlice> {
    totals
        .expenses
        .iter()
        .filter(|(_, total)| *total > 0.0)
        .map(|(name, total)| PieSlice {
            name: name.clone(),
            value: *total,
        })
        .collect()
}

/// One point of the revenue / outflow / cumulative line chart
///
/// Outflow is negated so it plots below the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub revenue: f64,
    pub outflow: f64,
    pub cumulative_profit: f64,
}

pub fn trend_points(series: &MonthlySeries) -> Vec<TrendPoint> {
    series
        .iter()
        .map(|r| TrendPoint {
            date: r.date,
            revenue: r.total_revenue,
            outflow: -r.total_outflow,
            cumulative_profit: r.cumulative_profit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Config, ExpenseItem, ExpenseList};
    use crate::projection::project;
    use crate::report::summarize;
    use approx::assert_relative_eq;

    fn totals(expense_subtotal: f64, taxes: f64, contingency: f64, capex: f64) -> ColumnTotals {
        let total_revenue = 10_000.0;
        let total_outflow = expense_subtotal + taxes + contingency + capex;
        ColumnTotals {
            revenue_club: total_revenue,
            revenue_non_members: 0.0,
            total_revenue,
            capex,
            expenses: vec![("Rent".to_string(), expense_subtotal)],
            expense_subtotal,
            contingency,
            taxes,
            total_outflow,
            operating_profit: total_revenue - total_outflow,
        }
    }

    fn categories(items: &[WaterfallItem]) -> Vec<&str> {
        items.iter().map(|i| i.category.as_str()).collect()
    }

    #[test]
    fn test_worked_example_waterfall() {
        let config = Config {
            revenue_club: 1000.0,
            revenue_non_members: 500.0,
            months: 3,
            tax_rate: 0.1,
            contingency_rate: 0.05,
            revenue_growth_annual: 0.0,
            capex: 0.0,
        };
        let expenses = ExpenseList::from_items([ExpenseItem::flat("rent", 200.0)]).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let report = summarize(&project(&config, &expenses, start).unwrap());

        let items = &report.waterfall;
        assert_eq!(categories(items), vec!["Total Revenue", "OPEX", "Taxes", "Contingency", "Total Profit"]);
        assert_eq!(items[0].measure, Measure::Absolute);
        assert_relative_eq!(items[0].value, 4500.0);
        assert_relative_eq!(items[1].value, -600.0);
        assert_relative_eq!(items[2].value, -450.0);
        assert_relative_eq!(items[3].value, -30.0);
        assert!(items[1..4].iter().all(|i| i.measure == Measure::Relative));
        assert_eq!(items[4].measure, Measure::Total);
        assert_relative_eq!(items[4].value, 3420.0);
    }

    #[test]
    fn test_largest_outflow_first_and_zero_dropped() {
        let items = waterfall(&totals(500.0, 1500.0, 25.0, 0.0));
        assert_eq!(categories(&items), vec!["Total Revenue", "Taxes", "OPEX", "Contingency", "Total Profit"]);

        let items = waterfall(&totals(500.0, 1500.0, 25.0, 4000.0));
        assert_eq!(
            categories(&items),
            vec!["Total Revenue", "Capex", "Taxes", "OPEX", "Contingency", "Total Profit"]
        );
    }

    #[test]
    fn test_ties_keep_category_order() {
        let items = waterfall(&totals(300.0, 300.0, 0.0, 300.0));
        assert_eq!(categories(&items), vec!["Total Revenue", "OPEX", "Taxes", "Capex", "Total Profit"]);
    }

    #[test]
    fn test_waterfall_closes_on_profit() {
        let t = totals(500.0, 1500.0, 25.0, 4000.0);
        let items = waterfall(&t);
        let running: f64 = items[..items.len() - 1].iter().map(|i| i.value).sum();
        assert_relative_eq!(running, items.last().unwrap().value);
    }

    #[test]
    fn test_pie_skips_non_positive_totals() {
        let mut t = totals(500.0, 0.0, 0.0, 0.0);
        t.expenses = vec![
            ("Rent".to_string(), 300.0),
            ("Waived fee".to_string(), 0.0),
            ("Refund".to_string(), -20.0),
            ("Software".to_string(), 220.0),
        ];

        let slices = pie_slices(&t);
        let names: Vec<_> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Software"]);
    }

    #[test]
    fn test_trend_negates_outflow() {
        let config = Config {
            revenue_club: 1000.0,
            months: 2,
            capex: 100.0,
            ..Default::default()
        };
        let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let series = project(&config, &ExpenseList::new(), start).unwrap();

        let points = trend_points(&series);
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].outflow, -(150.0 + 100.0));
        assert_relative_eq!(points[1].outflow, -150.0);
        assert_relative_eq!(points[1].cumulative_profit, 750.0 + 850.0);
    }
}
