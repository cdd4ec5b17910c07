//! Amortization schedules, lender offers and offer comparison

mod request;
mod schedule;
mod results;
mod engine;
pub mod export;

pub use request::LoanRequest;
pub use schedule::{
    AmortizationSystem, Installment, STANDARD_TERMS,
    compute_price_payment, compute_schedule, round_cents,
};
pub use results::{FinancingResult, OfferComparison, OfferOutcome, OfferSummary};
pub use engine::{FinancingEngine, select_best_offer};
