//! Financing output structures

use super::{AmortizationSystem, Installment, LoanRequest};
use crate::error::FinancingError;
use crate::lenders::LenderId;
use serde::{Deserialize, Serialize};

/// One lender's offer for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub lender_id: LenderId,
    pub lender_name: String,

    /// Request this offer prices
    pub request: LoanRequest,

    /// Nominal annual rate in percent
    pub annual_rate: f64,

    /// Effective monthly rate as a fraction
    pub monthly_rate: f64,

    /// Principal financed
    pub loan_amount: f64,

    /// Schedule rows, ordered by installment number
    pub installments: Vec<Installment>,

    /// Sum of every installment value
    pub total_paid: f64,

    /// Total paid less the principal
    pub total_interest: f64,
}

impl FinancingResult {
    /// Value of the first installment, the figure offers are ranked by
    pub fn first_installment(&self) -> f64 {
        self.installments.first().map(|i| i.value).unwrap_or(0.0)
    }

    pub fn last_installment(&self) -> f64 {
        self.installments.last().map(|i| i.value).unwrap_or(0.0)
    }

    pub fn monthly_rate_percent(&self) -> f64 {
        self.monthly_rate * 100.0
    }

    pub fn system(&self) -> AmortizationSystem {
        self.request.system
    }

    pub fn term_months(&self) -> u32 {
        self.request.term_months
    }

    /// Headline figures for a comparison table
    pub fn summary(&self) -> OfferSummary {
        OfferSummary {
            lender_id: self.lender_id,
            lender_name: self.lender_name.clone(),
            property_value: self.request.property_value,
            down_payment: self.request.down_payment,
            loan_amount: self.loan_amount,
            term_months: self.request.term_months,
            system: self.request.system,
            first_installment: self.first_installment(),
            last_installment: self.last_installment(),
            annual_rate: self.annual_rate,
            monthly_rate_percent: self.monthly_rate_percent(),
            total_paid: self.total_paid,
            total_interest: self.total_interest,
        }
    }
}

/// Headline figures of an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    pub lender_id: LenderId,
    pub lender_name: String,
    pub property_value: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub term_months: u32,
    pub system: AmortizationSystem,
    pub first_installment: f64,
    pub last_installment: f64,
    pub annual_rate: f64,
    pub monthly_rate_percent: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Outcome of pricing one lender inside a batch
#[derive(Debug, Clone, PartialEq)]
pub struct OfferOutcome {
    pub lender_id: LenderId,
    pub result: Result<FinancingResult, FinancingError>,
}

impl OfferOutcome {
    pub fn offer(&self) -> Option<&FinancingResult> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&FinancingError> {
        self.result.as_ref().err()
    }
}

/// Per-lender outcomes of a batch comparison, in request order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferComparison {
    outcomes: Vec<OfferOutcome>,
}

impl OfferComparison {
    pub fn new(outcomes: Vec<OfferOutcome>) -> Self {
        Self { outcomes }
    }

    /// Successful offer for a lender; `None` if it failed or was not requested
    pub fn get(&self, lender_id: LenderId) -> Option<&FinancingResult> {
        self.outcome(lender_id).and_then(OfferOutcome::offer)
    }

    pub fn outcome(&self, lender_id: LenderId) -> Option<&OfferOutcome> {
        self.outcomes.iter().find(|o| o.lender_id == lender_id)
    }

    pub fn outcomes(&self) -> &[OfferOutcome] {
        &self.outcomes
    }

    /// Successful offers in request order
    pub fn offers(&self) -> impl Iterator<Item = &FinancingResult> {
        self.outcomes.iter().filter_map(OfferOutcome::offer)
    }

    /// Failed lenders with their errors
    pub fn failures(&self) -> impl Iterator<Item = (LenderId, &FinancingError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error().map(|e| (o.lender_id, e)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Lender with the lowest first installment
    pub fn best_offer(&self) -> Option<LenderId> {
        super::select_best_offer(self)
    }
}
