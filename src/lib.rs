//! Cash-flow projection - monthly cash-flow statements from business assumptions
//!
//! This library provides:
//! - Monthly projection of segmented revenue, growing expenses, taxes, contingency and capex
//! - KPIs: totals, margins, best/worst month and payback month
//! - Waterfall, pie and trend aggregates for charting
//! - JSON persistence of assumptions and CSV/spreadsheet/JSON export
//! - Parallel scenario batches

pub mod assumptions;
pub mod error;
pub mod export;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Config, ExpenseItem, ExpenseList};
pub use error::{StoreError, ValidationError};
pub use projection::{project, MonthlyRecord, MonthlySeries, ProjectionEngine};
pub use report::{summarize, Payback, Report};
pub use scenario::ScenarioRunner;
