//! Lender rate derivation and annual-to-monthly conversion

use crate::error::FinancingError;
use crate::lenders::{LenderConfig, LenderProfile};

/// Nominal annual rate (percent) a lender charges: reference index plus spread
pub fn resolve_annual_rate(config: &LenderConfig, lender: &LenderProfile) -> f64 {
    config.reference_index() + lender.spread
}

/// Convert an annual rate in percent to the equivalent effective monthly rate.
///
/// Uses compound equivalence, `(1 + a/100)^(1/12) - 1`, and returns a fraction
/// (0.0093 for 0.93% a month). No rounding: every payment downstream is
/// computed from this value.
///
/// # Errors
/// `InvalidRate` when `annual_rate_percent <= -100`, where the base of the
/// power would be zero or negative.
pub fn annual_to_monthly(annual_rate_percent: f64) -> Result<f64, FinancingError> {
    // Also rejects NaN
    if !(annual_rate_percent > -100.0) {
        return Err(FinancingError::InvalidRate {
            annual_rate: annual_rate_percent,
        });
    }

    Ok((1.0 + annual_rate_percent / 100.0).powf(1.0 / 12.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate() {
        assert_eq!(annual_to_monthly(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_known_conversion() {
        let monthly = annual_to_monthly(11.69).unwrap();
        assert!((monthly - 0.0092557).abs() < 1e-6, "got {}", monthly);

        // 12.6825% a year compounds from exactly 1% a month
        let monthly = annual_to_monthly(12.682503013196972).unwrap();
        assert_relative_eq!(monthly, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_compounds_back_to_annual() {
        let monthly = annual_to_monthly(10.99).unwrap();
        assert_relative_eq!((1.0 + monthly).powi(12) - 1.0, 0.1099, epsilon = 1e-12);
    }

    #[test]
    fn test_monotonic() {
        let rates = [-50.0, -5.0, 0.0, 0.5, 4.5, 8.66, 11.69, 25.0, 100.0];
        let monthly: Vec<f64> = rates.iter().map(|&r| annual_to_monthly(r).unwrap()).collect();

        for pair in monthly.windows(2) {
            assert!(pair[1] > pair[0], "{} should exceed {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_invalid_rate() {
        assert_eq!(
            annual_to_monthly(-100.0),
            Err(FinancingError::InvalidRate { annual_rate: -100.0 })
        );
        assert!(annual_to_monthly(-150.0).is_err());
        assert!(annual_to_monthly(f64::NAN).is_err());
        assert!(annual_to_monthly(-99.9).is_ok());
    }

    #[test]
    fn test_resolve_annual_rate() {
        let config = LenderConfig::default_market();

        let bradesco = config.get(1).unwrap();
        assert_relative_eq!(resolve_annual_rate(&config, bradesco), 11.69, epsilon = 1e-9);

        let caixa = config.get(2).unwrap();
        assert_relative_eq!(resolve_annual_rate(&config, caixa), 10.99, epsilon = 1e-9);

        let shifted = config.with_reference_index(12.0).unwrap();
        assert_relative_eq!(resolve_annual_rate(&shifted, caixa), 12.24, epsilon = 1e-9);
    }
}
