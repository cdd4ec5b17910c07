//! Loan request value object

use super::AmortizationSystem;
use serde::{Deserialize, Serialize};

/// What the buyer asks to finance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Purchase price of the property
    pub property_value: f64,

    /// Total down payment, subsidy fund included
    pub down_payment: f64,

    /// Portion of the down payment drawn from a subsidy fund
    #[serde(default)]
    pub subsidy_fund: f64,

    /// Requested term in months
    pub term_months: u32,

    /// Requested amortization system
    pub system: AmortizationSystem,
}

impl LoanRequest {
    pub fn new(
        property_value: f64,
        down_payment: f64,
        term_months: u32,
        system: AmortizationSystem,
    ) -> Self {
        Self {
            property_value,
            down_payment,
            subsidy_fund: 0.0,
            term_months,
            system,
        }
    }

    /// Request whose down payment combines cash with a subsidy fund draw
    pub fn with_subsidy_fund(
        property_value: f64,
        cash_down_payment: f64,
        subsidy_fund: f64,
        term_months: u32,
        system: AmortizationSystem,
    ) -> Self {
        Self {
            property_value,
            down_payment: cash_down_payment + subsidy_fund,
            subsidy_fund,
            term_months,
            system,
        }
    }

    /// Principal to be financed; negative when the down payment exceeds the price
    pub fn loan_amount(&self) -> f64 {
        self.property_value - self.down_payment
    }

    pub fn cash_down_payment(&self) -> f64 {
        self.down_payment - self.subsidy_fund
    }
}
