//! Projection engine turning assumptions into a monthly cash-flow series

mod engine;
pub mod growth;
mod series;
mod state;

pub use engine::{project, ProjectionEngine};
pub use series::{
    is_reserved_label, tax_label, Column, FlatRecord, MonthlyRecord, MonthlySeries, FIXED_LABELS, MONTH_LABEL,
};
pub use state::{month_offset, ProjectionState};
