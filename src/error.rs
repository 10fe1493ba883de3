//! Error types for projection inputs and document storage

use chrono::NaiveDate;
use thiserror::Error;

/// Rejected projection input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("projection months must be positive, got {0}")]
    NonPositiveMonths(i64),

    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("growth rate for {subject} must be greater than -100%, got {rate}")]
    ImpossibleGrowthRate { subject: String, rate: f64 },

    #[error("{months} months from {start} run past the supported calendar range")]
    DateOutOfRange { start: NaiveDate, months: usize },

    #[error("{field} must be a finite number")]
    NonFinite { field: String },

    #[error("expense name must not be empty")]
    EmptyExpenseName,

    #[error("expense name {0:?} collides with a projection column label")]
    ReservedExpenseName(String),

    #[error("duplicate expense name: {0}")]
    DuplicateExpenseName(String),

    #[error("unknown expense: {0}")]
    UnknownExpense(String),
}

/// Failure reading or writing a persisted document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document IO failed")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON document")]
    Serde(#[from] serde_json::Error),

    #[error("invalid document")]
    Invalid(#[from] ValidationError),
}
