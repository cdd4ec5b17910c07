//! Subsidized housing program eligibility
//!
//! Qualification depends on the property price cap for its condition; the
//! subsidized rate then depends on household income. Caps, income bands and
//! rates are program policy, not derived values.

use serde::{Deserialize, Serialize};

/// Annual rate (percent) for households inside the income band
pub const SUBSIDIZED_RATE_LOW_INCOME: f64 = 4.50;

/// Annual rate (percent) for qualifying households above the income band
pub const SUBSIDIZED_RATE_HIGH_INCOME: f64 = 8.66;

/// Price cap and income band for one property condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramTier {
    /// Highest qualifying property value
    pub max_property_value: f64,

    /// Highest monthly income that still gets the low rate
    pub low_income_limit: f64,
}

/// Tier for newly built properties
pub const NEW_PROPERTY_TIER: ProgramTier = ProgramTier {
    max_property_value: 350_000.0,
    low_income_limit: 4_500.0,
};

/// Tier for used properties
pub const USED_PROPERTY_TIER: ProgramTier = ProgramTier {
    max_property_value: 264_000.0,
    low_income_limit: 4_400.0,
};

/// Program qualification and, when qualified, the subsidized annual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub qualifies: bool,
    pub rate: Option<f64>,
}

impl EligibilityResult {
    fn qualified(rate: f64) -> Self {
        Self {
            qualifies: true,
            rate: Some(rate),
        }
    }

    fn not_qualified() -> Self {
        Self {
            qualifies: false,
            rate: None,
        }
    }
}

/// Check a household against the program tables
pub fn check_subsidy_eligibility(
    property_value: f64,
    monthly_income: f64,
    is_new_property: bool,
) -> EligibilityResult {
    let tier = if is_new_property {
        NEW_PROPERTY_TIER
    } else {
        USED_PROPERTY_TIER
    };

    // Written so a NaN value fails the cap
    if !(property_value <= tier.max_property_value) {
        return EligibilityResult::not_qualified();
    }

    if monthly_income <= tier.low_income_limit {
        EligibilityResult::qualified(SUBSIDIZED_RATE_LOW_INCOME)
    } else {
        EligibilityResult::qualified(SUBSIDIZED_RATE_HIGH_INCOME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_property() {
        assert_eq!(
            check_subsidy_eligibility(300_000.0, 4_000.0, true),
            EligibilityResult { qualifies: true, rate: Some(4.50) }
        );
        assert_eq!(
            check_subsidy_eligibility(300_000.0, 5_000.0, true),
            EligibilityResult { qualifies: true, rate: Some(8.66) }
        );
        assert_eq!(
            check_subsidy_eligibility(400_000.0, 4_000.0, true),
            EligibilityResult { qualifies: false, rate: None }
        );
    }

    #[test]
    fn test_used_property() {
        assert_eq!(check_subsidy_eligibility(264_000.0, 4_400.0, false).rate, Some(4.50));
        assert_eq!(check_subsidy_eligibility(264_000.0, 4_400.01, false).rate, Some(8.66));
        assert!(!check_subsidy_eligibility(264_000.01, 1_000.0, false).qualifies);

        // Same house qualifies only when new
        assert!(!check_subsidy_eligibility(300_000.0, 4_000.0, false).qualifies);
    }

    #[test]
    fn test_nan_property_value_not_qualified() {
        assert_eq!(
            check_subsidy_eligibility(f64::NAN, 1_000.0, true),
            EligibilityResult { qualifies: false, rate: None }
        );
        assert!(!check_subsidy_eligibility(f64::NAN, 1_000.0, false).qualifies);
    }

    #[test]
    fn test_boundaries_inclusive() {
        assert_eq!(check_subsidy_eligibility(350_000.0, 4_500.0, true).rate, Some(4.50));
        assert_eq!(check_subsidy_eligibility(350_000.0, 4_500.5, true).rate, Some(8.66));
        assert_eq!(check_subsidy_eligibility(350_000.01, 0.0, true).rate, None);
    }
}
