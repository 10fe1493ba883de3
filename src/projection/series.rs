//! Projection output: one record per month plus the column schema used for display

use chrono::NaiveDate;
use serde::Serialize;

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecord {
    // Timing
    pub month_index: usize,
    pub date: NaiveDate,

    // Revenue
    pub revenue_club: f64,
    pub revenue_non_members: f64,
    pub total_revenue: f64,

    // One-time investment
    pub capex: f64,

    // Grown expense amounts, aligned with `MonthlySeries::expense_names`
    pub expenses: Vec<f64>,

    // Outflows
    pub expense_subtotal: f64,
    pub contingency: f64,
    pub taxes: f64,
    pub total_outflow: f64,

    // Summary
    pub operating_profit: f64,
    pub cumulative_profit: f64,
}

impl MonthlyRecord {
    /// Create a new record with zeroed amounts
    pub fn new(month_index: usize, date: NaiveDate, expense_count: usize) -> Self {
        Self {
            month_index,
            date,
            revenue_club: 0.0,
            revenue_non_members: 0.0,
            total_revenue: 0.0,
            capex: 0.0,
            expenses: Vec::with_capacity(expense_count),
            expense_subtotal: 0.0,
            contingency: 0.0,
            taxes: 0.0,
            total_outflow: 0.0,
            operating_profit: 0.0,
            cumulative_profit: 0.0,
        }
    }

    /// Value of a schema column for this month
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::ClubRevenue => self.revenue_club,
            Column::NonMemberRevenue => self.revenue_non_members,
            Column::TotalRevenue => self.total_revenue,
            Column::Capex => self.capex,
            Column::Expense(idx) => self.expenses.get(idx).copied().unwrap_or(0.0),
            Column::ExpenseSubtotal => self.expense_subtotal,
            Column::Contingency => self.contingency,
            Column::Taxes => self.taxes,
            Column::TotalOutflow => self.total_outflow,
            Column::OperatingProfit => self.operating_profit,
            Column::CumulativeProfit => self.cumulative_profit,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        [
            self.revenue_club,
            self.revenue_non_members,
            self.total_revenue,
            self.capex,
            self.expense_subtotal,
            self.contingency,
            self.taxes,
            self.total_outflow,
            self.operating_profit,
            self.cumulative_profit,
        ]
        .iter()
        .chain(self.expenses.iter())
        .all(|v| v.is_finite())
    }
}

/// Fixed column schema of a series
///
/// Labels are display metadata resolved against the series, so the tax column
/// stays `Column::Taxes` whatever rate its label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    ClubRevenue,
    NonMemberRevenue,
    TotalRevenue,
    Capex,
    /// Expense item by position in the expense list
    Expense(usize),
    ExpenseSubtotal,
    Contingency,
    Taxes,
    TotalOutflow,
    OperatingProfit,
    CumulativeProfit,
}

/// Leading column of every table and export
pub const MONTH_LABEL: &str = "Month";

/// Labels of the fixed (non-expense) columns, tax column excluded
pub const FIXED_LABELS: [&str; 9] = [
    "Club Revenue",
    "Non-Member Revenue",
    "Total Revenue",
    "Capex",
    "OPEX Total",
    "Contingency",
    "Total Outflow",
    "Operating Profit",
    "Cumulative Cash Flow",
];

const TAX_LABEL_PREFIX: &str = "Taxes (";

/// True when `name` would collide with the month column, a fixed column or
/// any tax column label
pub fn is_reserved_label(name: &str) -> bool {
    let name = name.trim();
    name == MONTH_LABEL || FIXED_LABELS.contains(&name) || name.starts_with(TAX_LABEL_PREFIX)
}

/// Label for the tax column, e.g. `Taxes (15%)`
pub fn tax_label(tax_rate: f64) -> String {
    let pct = tax_rate * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{TAX_LABEL_PREFIX}{}%)", pct.round() as i64)
    } else {
        let text = format!("{pct:.2}");
        format!("{TAX_LABEL_PREFIX}{}%)", text.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// One month flattened to ordered `(label, value)` pairs for tables and exports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRecord {
    pub date: NaiveDate,
    pub fields: Vec<(String, f64)>,
}

impl FlatRecord {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| *value)
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    /// Date of month 0
    start: NaiveDate,

    /// Tax rate the series was projected with
    tax_rate: f64,

    /// Expense names in list order
    expense_names: Vec<String>,

    /// Monthly records, never empty
    records: Vec<MonthlyRecord>,
}

impl MonthlySeries {
    pub(crate) fn new(start: NaiveDate, tax_rate: f64, expense_names: Vec<String>, capacity: usize) -> Self {
        Self {
            start,
            tax_rate,
            expense_names,
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn add_record(&mut self, record: MonthlyRecord) {
        self.records.push(record);
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn expense_names(&self) -> &[String] {
        &self.expense_names
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthlyRecord> {
        self.records.iter()
    }

    /// Columns in display order: revenue, capex, expense items, outflows, profit
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![
            Column::ClubRevenue,
            Column::NonMemberRevenue,
            Column::TotalRevenue,
            Column::Capex,
        ];
        columns.extend((0..self.expense_names.len()).map(Column::Expense));
        columns.extend([
            Column::ExpenseSubtotal,
            Column::Contingency,
            Column::Taxes,
            Column::TotalOutflow,
            Column::OperatingProfit,
            Column::CumulativeProfit,
        ]);
        columns
    }

    /// Display label of a column
    pub fn label(&self, column: Column) -> String {
        let fixed = match column {
            Column::ClubRevenue => FIXED_LABELS[0],
            Column::NonMemberRevenue => FIXED_LABELS[1],
            Column::TotalRevenue => FIXED_LABELS[2],
            Column::Capex => FIXED_LABELS[3],
            Column::ExpenseSubtotal => FIXED_LABELS[4],
            Column::Contingency => FIXED_LABELS[5],
            Column::TotalOutflow => FIXED_LABELS[6],
            Column::OperatingProfit => FIXED_LABELS[7],
            Column::CumulativeProfit => FIXED_LABELS[8],
            Column::Taxes => return tax_label(self.tax_rate),
            Column::Expense(idx) => {
                return self
                    .expense_names
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("Expense {}", idx + 1))
            }
        };
        fixed.to_string()
    }

    /// Values of one column across all months
    pub fn column_values(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| r.value(column)).collect()
    }

    /// Every month flattened to labelled fields, in column order
    pub fn rows(&self) -> Vec<FlatRecord> {
        let columns = self.columns();
        let labels: Vec<String> = columns.iter().map(|&c| self.label(c)).collect();

        self.records
            .iter()
            .map(|record| FlatRecord {
                date: record.date,
                fields: labels
                    .iter()
                    .zip(&columns)
                    .map(|(label, &column)| (label.clone(), record.value(column)))
                    .collect(),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a MonthlySeries {
    type Item = &'a MonthlyRecord;
    type IntoIter = std::slice::Iter<'a, MonthlyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
