//! Error types for the financing engine and lender configuration

use crate::lenders::LenderId;
use thiserror::Error;

/// Input validation failures raised by the financing engine.
///
/// These are deterministic: retrying with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinancingError {
    #[error("Invalid rate: annual rate {annual_rate}% gives a non-positive compounding base")]
    InvalidRate { annual_rate: f64 },

    #[error("Invalid term: {term_months} months (must be at least 1)")]
    InvalidTerm { term_months: u32 },

    #[error("Unknown lender: {lender_id}")]
    UnknownLender { lender_id: LenderId },

    #[error("Invalid amounts: property value {property_value} and down payment {down_payment} must be finite")]
    NonFiniteAmount { property_value: f64, down_payment: f64 },

    #[error("Negative loan amount: down payment {down_payment:.2} exceeds property value {property_value:.2}")]
    NegativeLoanAmount { property_value: f64, down_payment: f64 },
}

/// Failures while building a [`LenderConfig`](crate::lenders::LenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid lender {lender_id}: {field}: {reason}")]
    InvalidLender {
        lender_id: LenderId,
        field: &'static str,
        reason: String,
    },

    #[error("Duplicate lender id: {0}")]
    DuplicateLender(LenderId),

    #[error("Invalid reference index: {0}")]
    InvalidReferenceIndex(f64),
}
