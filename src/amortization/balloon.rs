use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::projection::BalanceProjector;
use crate::amortization::schedule::{add_months_clamped, monthly_payment};
use crate::decimal::Money;
use crate::errors::{FinanceError, Result};
use crate::types::LoanTerms;

/// A balloon event on a loan: the full payoff falls due before the loan
/// would otherwise amortize to zero. Always derived from exactly one set of
/// loan terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalloonPayment {
    /// months into the loan at which the balloon falls due
    pub term_months: u32,
    /// `start_date + term_months` months, day clamped to 28
    pub due_date: NaiveDate,
    /// payoff amount due at the balloon date
    pub amount: Money,
    /// level payments made before the balloon: `payment * term_months`
    pub total_payments_before_balloon: Money,
}

impl BalloonPayment {
    /// derive the balloon event; the payoff amount is the remaining balance
    /// at `balloon_term_months`
    pub fn derive(terms: &LoanTerms, balloon_term_months: u32) -> Result<Self> {
        Self::check_term(terms, balloon_term_months)?;
        let amount = BalanceProjector::remaining_balance(terms, balloon_term_months)?;
        Ok(Self::assemble(terms, balloon_term_months, amount))
    }

    /// derive the balloon event with an explicitly agreed payoff amount
    pub fn derive_with_amount(
        terms: &LoanTerms,
        balloon_term_months: u32,
        amount: Money,
    ) -> Result<Self> {
        Self::check_term(terms, balloon_term_months)?;
        terms.validate()?;
        Ok(Self::assemble(terms, balloon_term_months, amount))
    }

    fn check_term(terms: &LoanTerms, balloon_term_months: u32) -> Result<()> {
        if balloon_term_months >= terms.term_months() {
            return Err(FinanceError::InvalidBalloonTerm {
                balloon_term_months,
                term_months: terms.term_months(),
            });
        }
        Ok(())
    }

    fn assemble(terms: &LoanTerms, balloon_term_months: u32, amount: Money) -> Self {
        let payment = monthly_payment(terms);
        Self {
            term_months: balloon_term_months,
            due_date: add_months_clamped(terms.start_date(), balloon_term_months),
            amount,
            total_payments_before_balloon: payment * Decimal::from(balloon_term_months),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::AmortizationSchedule;
    use crate::decimal::Percentage;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn balloon_terms() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(144_000),
            Percentage::new(dec!(6)),
            360,
            date(2024, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_balloon_amount_matches_schedule_balance() {
        let terms = balloon_terms();
        let balloon = BalloonPayment::derive(&terms, 60).unwrap();

        let schedule = AmortizationSchedule::generate(&terms).unwrap();
        let diff = (balloon.amount - schedule.balance_after(60)).abs();
        assert!(diff < Money::from_cents(1));

        assert!(balloon.amount.is_positive());
        assert!(balloon.amount < terms.principal());
    }

    #[test]
    fn test_balloon_due_date_and_payment_total() {
        let terms = balloon_terms();
        let balloon = BalloonPayment::derive(&terms, 60).unwrap();

        assert_eq!(balloon.term_months, 60);
        assert_eq!(balloon.due_date, date(2029, 1, 1));

        let payment = monthly_payment(&terms);
        assert_eq!(
            balloon.total_payments_before_balloon,
            payment * dec!(60)
        );
    }

    #[test]
    fn test_balloon_due_date_clamps_day() {
        let terms = LoanTerms::new(
            Money::from_major(144_000),
            Percentage::new(dec!(6)),
            360,
            date(2024, 1, 31),
        )
        .unwrap();

        let balloon = BalloonPayment::derive(&terms, 13).unwrap();
        assert_eq!(balloon.due_date, date(2025, 2, 28));
    }

    #[test]
    fn test_balloon_term_at_or_past_maturity_rejected() {
        let terms = balloon_terms();

        let at_term = BalloonPayment::derive(&terms, 360);
        assert_eq!(
            at_term,
            Err(FinanceError::InvalidBalloonTerm {
                balloon_term_months: 360,
                term_months: 360
            })
        );

        assert!(BalloonPayment::derive(&terms, 400).is_err());
        assert!(BalloonPayment::derive(&terms, 359).is_ok());
    }

    #[test]
    fn test_supplied_amount_overrides_derived_balance() {
        let terms = balloon_terms();
        let agreed = Money::from_major(130_000);
        let balloon = BalloonPayment::derive_with_amount(&terms, 60, agreed).unwrap();
        assert_eq!(balloon.amount, agreed);

        let derived = BalloonPayment::derive(&terms, 60).unwrap();
        assert_eq!(balloon.due_date, derived.due_date);
        assert_ne!(balloon.amount, derived.amount);
    }

    #[test]
    fn test_balloon_is_idempotent() {
        let terms = balloon_terms();
        let a = BalloonPayment::derive(&terms, 60).unwrap();
        let b = BalloonPayment::derive(&terms, 60).unwrap();
        assert_eq!(a, b);
    }
}
