//! Mortgage Simulator - financing engine for property purchases
//!
//! This library provides:
//! - Lender rate derivation from a reference index plus spread
//! - PRICE and SAC amortization schedules
//! - Multi-lender offer comparison and best-offer selection
//! - Subsidized housing program eligibility

pub mod error;
pub mod lenders;
pub mod rates;
pub mod amortization;
pub mod eligibility;

// Re-export commonly used types
pub use error::{ConfigError, FinancingError};
pub use lenders::{LenderConfig, LenderId, LenderProfile};
pub use amortization::{
    AmortizationSystem, FinancingEngine, FinancingResult, Installment, LoanRequest, OfferComparison,
    select_best_offer,
};
pub use eligibility::{check_subsidy_eligibility, EligibilityResult};
