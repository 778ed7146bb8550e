use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, Duration};

use crate::core::{
    config::LendingConfig,
    range::{AmountRange, RangeError},
};

/// Principal preselected on the loan setup screen.
pub const DEFAULT_PRINCIPAL: u64 = 5_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LoanTerm {
    Days30,
    Days90,
    Days180,
    Days365,
}

impl LoanTerm {
    pub const ALL: [LoanTerm; 4] = [
        LoanTerm::Days30,
        LoanTerm::Days90,
        LoanTerm::Days180,
        LoanTerm::Days365,
    ];

    pub fn days(self) -> u32 {
        match self {
            LoanTerm::Days30 => 30,
            LoanTerm::Days90 => 90,
            LoanTerm::Days180 => 180,
            LoanTerm::Days365 => 365,
        }
    }
}

impl Default for LoanTerm {
    fn default() -> Self {
        LoanTerm::Days180
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.days())
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unsupported loan term of {0} days (expected 30, 90, 180 or 365)")]
pub struct UnsupportedTerm(pub u32);

impl TryFrom<u32> for LoanTerm {
    type Error = UnsupportedTerm;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        LoanTerm::ALL
            .into_iter()
            .find(|t| t.days() == days)
            .ok_or(UnsupportedTerm(days))
    }
}

impl From<LoanTerm> for u32 {
    fn from(term: LoanTerm) -> Self {
        term.days()
    }
}

/// `round(principal * rate * days / 365)`, rounding halves up.
///
/// The multiplication order is fixed (`principal * rate`, then the day fraction)
/// so the figures match the amounts quoted to users to the unit.
pub fn interest_for(principal: u64, annual_rate: f64, days: u32) -> u64 {
    let exact = principal as f64 * annual_rate * (days as f64 / 365.0);
    (exact + 0.5).floor().max(0.0) as u64
}

/// Derived figures of a loan, recomputed whenever the principal or term changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub principal: u64,
    pub term: LoanTerm,
    pub annual_rate: f64,
    /// Interest withheld up front.
    pub interest: u64,
    /// Amount actually paid out: principal minus interest.
    pub net_disbursed: u64,
}

impl LoanQuote {
    pub fn new(principal: u64, term: LoanTerm, annual_rate: f64) -> Self {
        let interest = interest_for(principal, annual_rate, term.days());
        Self {
            principal,
            term,
            annual_rate,
            interest,
            net_disbursed: principal.saturating_sub(interest),
        }
    }

    pub fn due_date(&self, start: Date) -> Date {
        start.saturating_add(Duration::days(i64::from(self.term.days())))
    }
}

/// Loan terms available against one appraised asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanCalculator {
    valuation: u64,
    max_ltv: f64,
    annual_rate: f64,
    range: AmountRange,
}

impl LoanCalculator {
    pub fn new(valuation: u64, lending: &LendingConfig) -> Result<Self, RangeError> {
        Self::with_max_ltv(valuation, lending.loan_max_ltv, lending)
    }

    pub fn with_max_ltv(
        valuation: u64,
        max_ltv: f64,
        lending: &LendingConfig,
    ) -> Result<Self, RangeError> {
        let range = AmountRange::capped(valuation, max_ltv, lending.min_amount, lending.amount_step)?;
        Ok(Self {
            valuation,
            max_ltv,
            annual_rate: lending.annual_rate,
            range,
        })
    }

    pub fn valuation(&self) -> u64 {
        self.valuation
    }

    pub fn max_ltv(&self) -> f64 {
        self.max_ltv
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    pub fn max_principal(&self) -> u64 {
        self.range.max()
    }

    pub fn range(&self) -> AmountRange {
        self.range
    }

    /// Quote for `principal` snapped onto the slider range.
    pub fn quote(&self, principal: u64, term: LoanTerm) -> LoanQuote {
        LoanQuote::new(self.range.snap(principal), term, self.annual_rate)
    }

    pub fn default_quote(&self) -> LoanQuote {
        self.quote(DEFAULT_PRINCIPAL, LoanTerm::default())
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LoanError {
    #[error("Please confirm that you have read and agree to the loan terms")]
    NotAgreed,
}

/// The explicit agreement required on the loan confirmation screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Agreement {
    agreed: bool,
}

impl Agreement {
    pub fn set(&mut self, agreed: bool) {
        self.agreed = agreed;
    }

    pub fn is_agreed(&self) -> bool {
        self.agreed
    }

    pub fn confirm(&self) -> Result<(), LoanError> {
        if self.agreed {
            Ok(())
        } else {
            Err(LoanError::NotAgreed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn reference_quote_matches_rounding() {
        let quote = LoanQuote::new(5_000_000, LoanTerm::Days180, 0.05);
        assert_eq!(quote.interest, 123_288);
        assert_eq!(quote.net_disbursed, 4_876_712);
    }

    #[test]
    fn full_year_interest() {
        assert_eq!(interest_for(1_000_000, 0.05, 365), 50_000);
        assert_eq!(interest_for(100_000, 0.05, 30), 411);
    }

    #[test]
    fn term_parsing() {
        assert_eq!(LoanTerm::try_from(90), Ok(LoanTerm::Days90));
        assert_eq!(LoanTerm::try_from(60), Err(UnsupportedTerm(60)));
    }

    #[test]
    fn calculator_caps_by_ltv_and_snaps() {
        let calc = LoanCalculator::new(15_000_000, &LendingConfig::default()).unwrap();
        assert_eq!(calc.max_principal(), 9_000_000);
        assert_eq!(calc.quote(20_000_000, LoanTerm::Days30).principal, 9_000_000);
        assert_eq!(calc.quote(1_234_567, LoanTerm::Days30).principal, 1_200_000);
        assert_eq!(calc.default_quote().principal, DEFAULT_PRINCIPAL);
    }

    #[test]
    fn low_valuation_is_not_eligible() {
        let err = LoanCalculator::new(100_000, &LendingConfig::default()).unwrap_err();
        assert_eq!(err, RangeError::Empty { min: 100_000, max: 60_000 });
    }

    #[test]
    fn due_date_adds_term() {
        let quote = LoanQuote::new(5_000_000, LoanTerm::Days180, 0.05);
        assert_eq!(quote.due_date(date!(2025 - 10 - 28)), date!(2026 - 04 - 26));
    }

    #[test]
    fn agreement_gates_confirmation() {
        let mut agreement = Agreement::default();
        assert_eq!(agreement.confirm(), Err(LoanError::NotAgreed));
        agreement.set(true);
        assert!(agreement.confirm().is_ok());
    }
}
