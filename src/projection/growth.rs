//! Compound growth helpers
//!
//! Annual rates are converted to the equivalent monthly rate so that twelve
//! monthly steps compound to exactly one year of growth.

/// Monthly rate equivalent to an annual rate: `(1 + annual)^(1/12) - 1`
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Amount after `months` steps of monthly compounding at `monthly_rate`
pub fn grown_amount(base: f64, monthly_rate: f64, months: usize) -> f64 {
    // powi takes i32; month counts never approach that range in practice
    let exponent = i32::try_from(months).unwrap_or(i32::MAX);
    base * (1.0 + monthly_rate).powi(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_twelve_months_compound_to_annual_rate() {
        let rate = monthly_rate(0.12);
        assert_relative_eq!(grown_amount(100.0, rate, 12), 112.0, epsilon = 1e-9);
        assert_relative_eq!(grown_amount(100.0, rate, 24), 125.44, epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_rate_is_not_linear_split() {
        // 12% a year is less than 1% a month once compounded
        let rate = monthly_rate(0.12);
        assert!(rate < 0.01);
        assert_relative_eq!(rate, 0.009488792934583046, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_growth_keeps_base() {
        let rate = monthly_rate(0.0);
        assert_eq!(rate, 0.0);
        assert_eq!(grown_amount(350.0, rate, 7), 350.0);
    }

    #[test]
    fn test_negative_growth_shrinks() {
        let rate = monthly_rate(-0.5);
        assert_relative_eq!(grown_amount(1000.0, rate, 12), 500.0, epsilon = 1e-9);
    }
}
