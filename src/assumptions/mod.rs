//! Business assumptions driving a projection: revenue, rates, capex and expense items

mod expenses;
pub mod loader;

pub use expenses::{ExpenseItem, ExpenseList};
pub use loader::{
    load_config, load_config_or_default, load_expenses, load_split_expenses, save_config,
    save_expenses, save_split_expenses,
};

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Default number of months projected when no configuration is supplied
pub const DEFAULT_MONTHS: i64 = 12;

/// Default tax rate (15% of revenue)
pub const DEFAULT_TAX_RATE: f64 = 0.15;

/// Default contingency rate (5% of the OPEX subtotal)
pub const DEFAULT_CONTINGENCY_RATE: f64 = 0.05;

/// Configuration for a projection run
///
/// Older saved documents used different key names; those are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Monthly revenue from club members at month 0
    #[serde(alias = "receita_clube")]
    pub revenue_club: f64,

    /// Monthly revenue from non-members at month 0
    #[serde(alias = "receita_nao_membros")]
    pub revenue_non_members: f64,

    /// Number of months to project
    #[serde(alias = "meses")]
    pub months: i64,

    /// Fraction of revenue paid as tax
    #[serde(alias = "impostos_pct")]
    pub tax_rate: f64,

    /// Fraction of the OPEX subtotal held as contingency
    #[serde(alias = "contingencia_pct")]
    pub contingency_rate: f64,

    /// Annual revenue growth, compounded monthly
    #[serde(default, alias = "growth_receita")]
    pub revenue_growth_annual: f64,

    /// One-time capital expenditure booked in month 0
    #[serde(default)]
    pub capex: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            revenue_club: 0.0,
            revenue_non_members: 0.0,
            months: DEFAULT_MONTHS,
            tax_rate: DEFAULT_TAX_RATE,
            contingency_rate: DEFAULT_CONTINGENCY_RATE,
            revenue_growth_annual: 0.0,
            capex: 0.0,
        }
    }
}

impl Config {
    /// Check every field against the projection invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.months <= 0 {
            return Err(ValidationError::NonPositiveMonths(self.months));
        }

        require_finite("revenue_club", self.revenue_club)?;
        require_finite("revenue_non_members", self.revenue_non_members)?;
        require_finite("capex", self.capex)?;
        require_fraction("tax_rate", self.tax_rate)?;
        require_fraction("contingency_rate", self.contingency_rate)?;
        validate_growth_rate("revenue", self.revenue_growth_annual)?;

        if self.revenue_club < 0.0 || self.revenue_non_members < 0.0 {
            log::warn!(
                "negative revenue segment (club={}, non-members={})",
                self.revenue_club,
                self.revenue_non_members
            );
        }

        Ok(())
    }

    /// Combined month-0 revenue across both segments
    pub fn base_revenue(&self) -> f64 {
        self.revenue_club + self.revenue_non_members
    }
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field: field.to_string() })
    }
}

fn require_fraction(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RateOutOfRange { field, value })
    }
}

/// Annual growth must be finite and above -100%, otherwise the monthly
/// factor is undefined or wipes out the base amount
pub(crate) fn validate_growth_rate(subject: &str, rate: f64) -> Result<(), ValidationError> {
    require_finite(&format!("{subject} growth rate"), rate)?;
    if rate <= -1.0 {
        return Err(ValidationError::ImpossibleGrowthRate {
            subject: subject.to_string(),
            rate,
        });
    }
    Ok(())
}
