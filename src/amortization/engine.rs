//! Financing engine: prices loan requests against the configured lenders

use super::results::{FinancingResult, OfferComparison, OfferOutcome};
use super::schedule::compute_schedule;
use super::LoanRequest;
use crate::error::FinancingError;
use crate::lenders::{LenderConfig, LenderId, LimitBreach};
use crate::rates::{annual_to_monthly, resolve_annual_rate};
use rayon::prelude::*;

/// Main financing engine
#[derive(Debug, Clone)]
pub struct FinancingEngine {
    config: LenderConfig,
}

impl FinancingEngine {
    /// Create an engine over a fixed lender configuration
    pub fn new(config: LenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LenderConfig {
        &self.config
    }

    /// Price a request with a single lender
    ///
    /// # Errors
    /// - `UnknownLender` if `lender_id` is not configured
    /// - `NonFiniteAmount` if the property value or down payment is NaN or infinite
    /// - `NegativeLoanAmount` if the down payment exceeds the property value
    /// - `InvalidRate` / `InvalidTerm` from the rate and schedule calculations
    pub fn calculate_financing(
        &self,
        request: &LoanRequest,
        lender_id: LenderId,
    ) -> Result<FinancingResult, FinancingError> {
        let lender = self
            .config
            .get(lender_id)
            .ok_or(FinancingError::UnknownLender { lender_id })?;

        let loan_amount = request.loan_amount();
        if !loan_amount.is_finite() {
            return Err(FinancingError::NonFiniteAmount {
                property_value: request.property_value,
                down_payment: request.down_payment,
            });
        }
        if loan_amount < 0.0 {
            return Err(FinancingError::NegativeLoanAmount {
                property_value: request.property_value,
                down_payment: request.down_payment,
            });
        }

        let annual_rate = resolve_annual_rate(&self.config, lender);
        let monthly_rate = annual_to_monthly(annual_rate)?;
        let installments = compute_schedule(loan_amount, monthly_rate, request.term_months, request.system)?;

        let total_paid: f64 = installments.iter().map(|i| i.value).sum();
        let total_interest = total_paid - loan_amount;

        log::debug!(
            "{} ({}): {:.2} over {} months {} at {:.2}% a year",
            lender.name,
            lender_id,
            loan_amount,
            request.term_months,
            request.system,
            annual_rate
        );

        Ok(FinancingResult {
            lender_id,
            lender_name: lender.name.clone(),
            request: *request,
            annual_rate,
            monthly_rate,
            loan_amount,
            installments,
            total_paid,
            total_interest,
        })
    }

    /// Price a request with every listed lender.
    ///
    /// Lenders are evaluated in parallel; a failure is recorded against its
    /// lender and never stops the rest of the batch. Outcomes keep the order
    /// of `lender_ids`.
    pub fn compare_offers(&self, request: &LoanRequest, lender_ids: &[LenderId]) -> OfferComparison {
        let outcomes: Vec<OfferOutcome> = lender_ids
            .par_iter()
            .map(|&lender_id| OfferOutcome {
                lender_id,
                result: self.calculate_financing(request, lender_id),
            })
            .collect();

        for outcome in &outcomes {
            if let Some(err) = outcome.error() {
                log::warn!("Lender {} skipped: {}", outcome.lender_id, err);
            }
        }

        OfferComparison::new(outcomes)
    }

    /// Price a request with every configured lender
    pub fn compare_all(&self, request: &LoanRequest) -> OfferComparison {
        self.compare_offers(request, &self.config.lender_ids())
    }

    /// Product limits the request breaches for a lender
    pub fn limit_breaches(
        &self,
        request: &LoanRequest,
        lender_id: LenderId,
    ) -> Result<Vec<LimitBreach>, FinancingError> {
        self.config
            .get(lender_id)
            .map(|lender| lender.check_limits(request))
            .ok_or(FinancingError::UnknownLender { lender_id })
    }
}

impl Default for FinancingEngine {
    fn default() -> Self {
        Self::new(LenderConfig::default_market())
    }
}

/// Lender whose offer has the smallest first installment.
///
/// Ties go to the lender listed first; `None` when no lender produced an offer.
pub fn select_best_offer(comparison: &OfferComparison) -> Option<LenderId> {
    let mut best: Option<(LenderId, f64)> = None;

    for offer in comparison.offers() {
        let first = offer.first_installment();
        match best {
            Some((_, lowest)) if first >= lowest => {}
            _ => best = Some((offer.lender_id, first)),
        }
    }

    best.map(|(lender_id, _)| lender_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{AmortizationSystem, Installment};
    use crate::lenders::LenderProfile;
    use approx::assert_abs_diff_eq;

    fn reference_request(system: AmortizationSystem) -> LoanRequest {
        LoanRequest::new(2_000_000.0, 450_000.0, 360, system)
    }

    fn offer(lender_id: LenderId, first_value: f64) -> FinancingResult {
        FinancingResult {
            lender_id,
            lender_name: format!("Lender {}", lender_id),
            request: reference_request(AmortizationSystem::Price),
            annual_rate: 10.0,
            monthly_rate: 0.008,
            loan_amount: first_value,
            installments: vec![Installment {
                number: 1,
                value: first_value,
                amortization: first_value,
                interest: 0.0,
                balance: 0.0,
            }],
            total_paid: first_value,
            total_interest: 0.0,
        }
    }

    #[test]
    fn test_calculate_financing() {
        let engine = FinancingEngine::default();
        let request = reference_request(AmortizationSystem::Price);

        let result = engine.calculate_financing(&request, 1).unwrap();

        assert_eq!(result.lender_name, "Bradesco");
        assert_abs_diff_eq!(result.annual_rate, 11.69, epsilon = 1e-9);
        assert_abs_diff_eq!(result.monthly_rate, 0.0092557, epsilon = 1e-6);
        assert_eq!(result.loan_amount, 1_550_000.0);
        assert_eq!(result.installments.len(), 360);
        assert_eq!(result.first_installment(), 14886.22);

        let total: f64 = result.installments.iter().map(|i| i.value).sum();
        assert_abs_diff_eq!(result.total_paid, total, epsilon = 1e-6);
        assert_abs_diff_eq!(result.total_interest, total - 1_550_000.0, epsilon = 1e-6);
        assert!(result.total_interest > 0.0);
    }

    #[test]
    fn test_sac_offer_summary() {
        let engine = FinancingEngine::default();
        let request = reference_request(AmortizationSystem::Sac);

        let summary = engine.calculate_financing(&request, 2).unwrap().summary();

        assert_eq!(summary.lender_name, "Caixa");
        assert_eq!(summary.system, AmortizationSystem::Sac);
        assert_eq!(summary.term_months, 360);
        assert!(summary.first_installment > summary.last_installment);
        assert_abs_diff_eq!(summary.annual_rate, 10.99, epsilon = 1e-9);
        assert!((summary.monthly_rate_percent - 0.8725).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_lender() {
        let engine = FinancingEngine::default();
        let request = reference_request(AmortizationSystem::Price);

        assert_eq!(
            engine.calculate_financing(&request, 99),
            Err(FinancingError::UnknownLender { lender_id: 99 })
        );
    }

    #[test]
    fn test_negative_loan_amount() {
        let engine = FinancingEngine::default();
        let request = LoanRequest::with_subsidy_fund(300_000.0, 280_000.0, 40_000.0, 360, AmortizationSystem::Sac);

        assert_eq!(
            engine.calculate_financing(&request, 1),
            Err(FinancingError::NegativeLoanAmount {
                property_value: 300_000.0,
                down_payment: 320_000.0,
            })
        );
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let engine = FinancingEngine::default();

        let request = LoanRequest::new(f64::NAN, 0.0, 12, AmortizationSystem::Price);
        assert!(matches!(
            engine.calculate_financing(&request, 1),
            Err(FinancingError::NonFiniteAmount { down_payment, .. }) if down_payment == 0.0
        ));

        let request = LoanRequest::new(f64::INFINITY, 100_000.0, 12, AmortizationSystem::Sac);
        assert!(matches!(
            engine.calculate_financing(&request, 1),
            Err(FinancingError::NonFiniteAmount { .. })
        ));

        let comparison = engine.compare_all(&request);
        assert_eq!(comparison.offers().count(), 0);
        assert_eq!(comparison.best_offer(), None);
    }

    #[test]
    fn test_invalid_term_propagates() {
        let engine = FinancingEngine::default();
        let request = LoanRequest::new(300_000.0, 60_000.0, 0, AmortizationSystem::Price);

        assert_eq!(
            engine.calculate_financing(&request, 1),
            Err(FinancingError::InvalidTerm { term_months: 0 })
        );
    }

    #[test]
    fn test_invalid_rate_propagates() {
        let config = LenderConfig::new(-90.0, vec![LenderProfile::new(1, "Broken", -15.0, 0.2, 420)]).unwrap();
        let engine = FinancingEngine::new(config);
        let request = reference_request(AmortizationSystem::Price);

        assert!(matches!(
            engine.calculate_financing(&request, 1),
            Err(FinancingError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_compare_offers_partial_failure() {
        let engine = FinancingEngine::default();
        let request = reference_request(AmortizationSystem::Price);

        let comparison = engine.compare_offers(&request, &[1, 2, 3, 4, 5]);

        assert_eq!(comparison.len(), 5);
        assert_eq!(comparison.offers().count(), 4);
        assert!(comparison.get(5).is_none());

        let failures: Vec<_> = comparison.failures().collect();
        assert_eq!(failures, vec![(5, &FinancingError::UnknownLender { lender_id: 5 })]);

        let order: Vec<LenderId> = comparison.outcomes().iter().map(|o| o.lender_id).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_compare_matches_sequential() {
        let engine = FinancingEngine::default();
        let request = reference_request(AmortizationSystem::Sac);

        let comparison = engine.compare_all(&request);

        for id in engine.config().lender_ids() {
            let sequential = engine.calculate_financing(&request, id).unwrap();
            assert_eq!(comparison.get(id), Some(&sequential));
        }
    }

    #[test]
    fn test_best_offer_default_market() {
        let engine = FinancingEngine::default();
        let request = reference_request(AmortizationSystem::Price);

        // Caixa carries the smallest spread
        assert_eq!(engine.compare_all(&request).best_offer(), Some(2));
    }

    #[test]
    fn test_select_best_offer() {
        let comparison = OfferComparison::new(vec![
            OfferOutcome { lender_id: 1, result: Ok(offer(1, 15_000.0)) },
            OfferOutcome { lender_id: 2, result: Err(FinancingError::UnknownLender { lender_id: 2 }) },
            OfferOutcome { lender_id: 3, result: Ok(offer(3, 13_419.46)) },
            OfferOutcome { lender_id: 4, result: Ok(offer(4, 14_000.0)) },
        ]);

        assert_eq!(select_best_offer(&comparison), Some(3));
    }

    #[test]
    fn test_select_best_offer_tie_goes_to_first() {
        let comparison = OfferComparison::new(vec![
            OfferOutcome { lender_id: 7, result: Ok(offer(7, 12_000.0)) },
            OfferOutcome { lender_id: 3, result: Ok(offer(3, 12_000.0)) },
        ]);

        assert_eq!(select_best_offer(&comparison), Some(7));
    }

    #[test]
    fn test_select_best_offer_all_failed() {
        let comparison = OfferComparison::new(vec![
            OfferOutcome { lender_id: 1, result: Err(FinancingError::InvalidTerm { term_months: 0 }) },
            OfferOutcome { lender_id: 2, result: Err(FinancingError::InvalidTerm { term_months: 0 }) },
        ]);

        assert_eq!(select_best_offer(&comparison), None);
        assert_eq!(select_best_offer(&OfferComparison::default()), None);
    }

    #[test]
    fn test_limit_breaches() {
        let engine = FinancingEngine::default();
        let request = LoanRequest::new(500_000.0, 150_000.0, 420, AmortizationSystem::Price);

        assert!(engine.limit_breaches(&request, 1).unwrap().is_empty());
        assert_eq!(engine.limit_breaches(&request, 3).unwrap().len(), 1);
        assert!(engine.limit_breaches(&request, 9).is_err());
    }
}
