//! Period-by-period amortization schedules for the PRICE and SAC systems

use crate::error::FinancingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Term choices offered by the simulator, in months
pub const STANDARD_TERMS: [u32; 3] = [420, 360, 300];

/// Amortization system for a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AmortizationSystem {
    /// Constant total installment (French / Price table)
    Price,
    /// Constant amortization portion; installments fall as interest shrinks
    Sac,
}

impl AmortizationSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationSystem::Price => "PRICE",
            AmortizationSystem::Sac => "SAC",
        }
    }
}

impl fmt::Display for AmortizationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmortizationSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRICE" => Ok(AmortizationSystem::Price),
            "SAC" => Ok(AmortizationSystem::Sac),
            other => Err(format!("Unknown amortization system: {} (expected PRICE or SAC)", other)),
        }
    }
}

/// One row of an amortization schedule. Amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Period number (1-indexed)
    pub number: u32,

    /// Total payment due this period
    pub value: f64,

    /// Principal repaid this period
    pub amortization: f64,

    /// Interest charged on the opening balance
    pub interest: f64,

    /// Outstanding balance after the payment
    pub balance: f64,
}

/// Round a monetary amount to 2 decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Fixed installment for the PRICE system.
///
/// `loan * r / (1 - (1+r)^-n)`, the overflow-free form of
/// `loan * r * (1+r)^n / ((1+r)^n - 1)`, falling back to `loan / n` at a zero
/// rate where the denominator vanishes.
pub fn compute_price_payment(
    loan_amount: f64,
    monthly_rate: f64,
    term_months: u32,
) -> Result<f64, FinancingError> {
    if term_months == 0 {
        return Err(FinancingError::InvalidTerm { term_months });
    }

    if monthly_rate == 0.0 {
        return Ok(loan_amount / term_months as f64);
    }

    let discount = (1.0 + monthly_rate).powf(-(term_months as f64));
    Ok(loan_amount * monthly_rate / (1.0 - discount))
}

/// Principal still owed on a PRICE loan with `periods_left` payments to go
fn remaining_principal(payment: f64, monthly_rate: f64, periods_left: u32) -> f64 {
    payment * (1.0 - (1.0 + monthly_rate).powf(-(periods_left as f64))) / monthly_rate
}

/// Build the full schedule of `term_months` installments.
///
/// The running balance is carried at full precision between periods and only
/// the reported figures are rounded, so the balance closes at zero in the
/// final period. It is clamped at zero to absorb floating residue.
///
/// A PRICE balance is re-derived each period as the present value of the
/// payments still due rather than accumulated by subtraction, so very long
/// terms still amortize to zero.
pub fn compute_schedule(
    loan_amount: f64,
    monthly_rate: f64,
    term_months: u32,
    system: AmortizationSystem,
) -> Result<Vec<Installment>, FinancingError> {
    if term_months == 0 {
        return Err(FinancingError::InvalidTerm { term_months });
    }

    let fixed_component = match system {
        AmortizationSystem::Price => compute_price_payment(loan_amount, monthly_rate, term_months)?,
        AmortizationSystem::Sac => loan_amount / term_months as f64,
    };

    let mut installments = Vec::with_capacity(term_months as usize);
    let mut balance = loan_amount;

    for number in 1..=term_months {
        let interest = balance * monthly_rate;

        let (value, amortization) = match system {
            AmortizationSystem::Price => (fixed_component, fixed_component - interest),
            AmortizationSystem::Sac => (fixed_component + interest, fixed_component),
        };

        balance = match system {
            AmortizationSystem::Price if monthly_rate != 0.0 => {
                remaining_principal(fixed_component, monthly_rate, term_months - number)
            }
            _ => balance - amortization,
        }
        .max(0.0);

        installments.push(Installment {
            number,
            value: round_cents(value),
            amortization: round_cents(amortization),
            interest: round_cents(interest),
            balance: round_cents(balance),
        });
    }

    Ok(installments)
}
