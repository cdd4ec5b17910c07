//! Lender profiles and the lender configuration shared by every simulation

use crate::amortization::LoanRequest;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Opaque lender identifier
pub type LenderId = u32;

/// Benchmark annual rate (percent) the default market is priced from
pub const DEFAULT_REFERENCE_INDEX: f64 = 10.75;

/// A single lender's pricing and product limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderProfile {
    /// Unique lender identifier
    pub id: LenderId,

    /// Display name
    pub name: String,

    /// Percentage points above the reference index
    pub spread: f64,

    /// Minimum down payment as a fraction of the property value (0.20 = 20%)
    pub min_down_payment: f64,

    /// Longest term offered, in months
    pub max_term_months: u32,
}

impl LenderProfile {
    pub fn new(
        id: LenderId,
        name: impl Into<String>,
        spread: f64,
        min_down_payment: f64,
        max_term_months: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            spread,
            min_down_payment,
            max_term_months,
        }
    }

    /// Report where a request falls outside this lender's product limits.
    ///
    /// Advisory only: the engine still prices a request that breaches limits,
    /// so callers decide whether to flag or drop the offer.
    pub fn check_limits(&self, request: &LoanRequest) -> Vec<LimitBreach> {
        let mut breaches = Vec::new();

        if request.property_value > 0.0 {
            let fraction = request.down_payment / request.property_value;
            if fraction < self.min_down_payment {
                breaches.push(LimitBreach::DownPaymentBelowMinimum {
                    required: self.min_down_payment,
                    actual: fraction,
                });
            }
        }

        if request.term_months > self.max_term_months {
            breaches.push(LimitBreach::TermAboveMaximum {
                max_term_months: self.max_term_months,
                term_months: request.term_months,
            });
        }

        breaches
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.spread.is_finite() {
            return Err(self.invalid("spread", format!("{} is not a finite number", self.spread)));
        }
        if !(0.0..=1.0).contains(&self.min_down_payment) {
            return Err(self.invalid(
                "min_down_payment",
                format!("{} is outside [0, 1]", self.min_down_payment),
            ));
        }
        if self.max_term_months == 0 {
            return Err(self.invalid("max_term_months", "must be at least 1".to_string()));
        }
        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: String) -> ConfigError {
        ConfigError::InvalidLender {
            lender_id: self.id,
            field,
            reason,
        }
    }
}

/// A request outside a lender's stated limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LimitBreach {
    /// Down payment fraction is below the lender's minimum
    DownPaymentBelowMinimum { required: f64, actual: f64 },
    /// Requested term is longer than the lender offers
    TermAboveMaximum { max_term_months: u32, term_months: u32 },
}

impl std::fmt::Display for LimitBreach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitBreach::DownPaymentBelowMinimum { required, actual } => write!(
                f,
                "down payment {:.2}% is below the minimum {:.2}%",
                actual * 100.0,
                required * 100.0
            ),
            LimitBreach::TermAboveMaximum { max_term_months, term_months } => write!(
                f,
                "term {} months exceeds the maximum {} months",
                term_months, max_term_months
            ),
        }
    }
}

/// Reference index plus the ordered lender table.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct LenderConfig {
    /// Benchmark annual rate in percent
    reference_index: f64,

    /// Lenders in presentation order
    lenders: Vec<LenderProfile>,
}

impl LenderConfig {
    /// Validate and build a configuration
    pub fn new(reference_index: f64, lenders: Vec<LenderProfile>) -> Result<Self, ConfigError> {
        if !reference_index.is_finite() {
            return Err(ConfigError::InvalidReferenceIndex(reference_index));
        }

        for (i, lender) in lenders.iter().enumerate() {
            lender.validate()?;
            if lenders[..i].iter().any(|other| other.id == lender.id) {
                return Err(ConfigError::DuplicateLender(lender.id));
            }
        }

        Ok(Self {
            reference_index,
            lenders,
        })
    }

    /// The four-bank market the simulator ships with
    pub fn default_market() -> Self {
        Self {
            reference_index: DEFAULT_REFERENCE_INDEX,
            lenders: vec![
                LenderProfile::new(1, "Bradesco", 0.94, 0.20, 420),  // 11.69%
                LenderProfile::new(2, "Caixa", 0.24, 0.20, 420),     // 10.99%
                LenderProfile::new(3, "Itaú", 0.94, 0.20, 360),      // 11.69%
                LenderProfile::new(4, "Santander", 1.24, 0.20, 420), // 11.99%
            ],
        }
    }

    pub fn reference_index(&self) -> f64 {
        self.reference_index
    }

    /// Same lenders priced off a different benchmark
    pub fn with_reference_index(&self, reference_index: f64) -> Result<Self, ConfigError> {
        Self::new(reference_index, self.lenders.clone())
    }

    pub fn lenders(&self) -> &[LenderProfile] {
        &self.lenders
    }

    /// Configured ids in presentation order
    pub fn lender_ids(&self) -> Vec<LenderId> {
        self.lenders.iter().map(|l| l.id).collect()
    }

    pub fn get(&self, id: LenderId) -> Option<&LenderProfile> {
        self.lenders.iter().find(|l| l.id == id)
    }
}

impl Default for LenderConfig {
    fn default() -> Self {
        Self::default_market()
    }
}
