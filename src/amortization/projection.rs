use rust_decimal::Decimal;

use crate::amortization::schedule::{compound_factor, monthly_payment};
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

/// Point-in-time balance queries answered in closed form, without
/// materializing the schedule up to the elapsed period.
pub struct BalanceProjector;

impl BalanceProjector {
    /// Remaining balance after `elapsed_months` payments.
    ///
    /// Standard amortizing: `P(1+r)^k - payment * ((1+r)^k - 1)/r`.
    /// Zero rate: straight-line reduction.
    /// Interest-only: the original principal until maturity, then zero.
    /// Any `elapsed_months >= term` returns zero, never a negative amount.
    ///
    /// For every `k` the result matches the `remaining_balance` of period
    /// `k` of the generated schedule to within one cent.
    pub fn remaining_balance(terms: &LoanTerms, elapsed_months: u32) -> Result<Money> {
        terms.validate()?;

        if elapsed_months >= terms.term_months() {
            return Ok(Money::ZERO);
        }
        if terms.is_interest_only() {
            return Ok(terms.principal());
        }

        let payment = monthly_payment(terms);
        let rate = terms.monthly_rate();

        if rate.is_zero() {
            let paid = payment * Decimal::from(elapsed_months);
            return Ok((terms.principal() - paid).max(Money::ZERO));
        }

        let factor = compound_factor(rate, elapsed_months);
        let grown = terms.principal() * factor;
        let retired = payment * ((factor - Decimal::ONE) / rate);
        Ok((grown - retired).max(Money::ZERO))
    }

    /// principal retired after `elapsed_months` payments
    pub fn principal_paid(terms: &LoanTerms, elapsed_months: u32) -> Result<Money> {
        let balance = Self::remaining_balance(terms, elapsed_months)?;
        Ok(terms.principal() - balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::AmortizationSchedule;
    use crate::decimal::Percentage;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn standard_terms() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(200_000),
            Percentage::new(dec!(4.5)),
            360,
            start(),
        )
        .unwrap()
    }

    fn assert_within_one_cent(a: Money, b: Money) {
        assert!(
            (a - b).abs() < Money::from_cents(1),
            "{} vs {} differ by a cent or more",
            a,
            b
        );
    }

    #[test]
    fn test_projection_matches_schedule() {
        let terms = standard_terms();
        let schedule = AmortizationSchedule::generate(&terms).unwrap();

        for k in [0, 1, 12, 60, 180, 359, 360] {
            let projected = BalanceProjector::remaining_balance(&terms, k).unwrap();
            assert_within_one_cent(projected, schedule.balance_after(k));
        }
    }

    #[test]
    fn test_projection_matches_schedule_at_zero_rate() {
        let terms = LoanTerms::new(Money::from_major(120_000), Percentage::ZERO, 12, start())
            .unwrap();
        let schedule = AmortizationSchedule::generate(&terms).unwrap();

        for k in 0..=12 {
            let projected = BalanceProjector::remaining_balance(&terms, k).unwrap();
            assert_within_one_cent(projected, schedule.balance_after(k));
        }
        assert_eq!(
            BalanceProjector::remaining_balance(&terms, 6).unwrap(),
            Money::from_major(60_000)
        );
    }

    #[test]
    fn test_reference_balance_after_sixty_payments() {
        // $200,000 at 4.5% over 360 months leaves about $182,315.90 after
        // five years of payments
        let balance = BalanceProjector::remaining_balance(&standard_terms(), 60).unwrap();
        let expected = Money::from_str_exact("182315.90").unwrap();
        assert!((balance - expected).abs() < Money::from_major(2));
    }

    #[test]
    fn test_zero_elapsed_is_full_principal() {
        let terms = standard_terms();
        assert_eq!(
            BalanceProjector::remaining_balance(&terms, 0).unwrap(),
            Money::from_major(200_000)
        );
        assert_eq!(
            BalanceProjector::principal_paid(&terms, 0).unwrap(),
            Money::ZERO
        );
    }

    #[test]
    fn test_elapsed_past_term_is_zero_not_negative() {
        let terms = standard_terms();
        assert_eq!(
            BalanceProjector::remaining_balance(&terms, 360).unwrap(),
            Money::ZERO
        );
        assert_eq!(
            BalanceProjector::remaining_balance(&terms, 10_000).unwrap(),
            Money::ZERO
        );
    }

    #[test]
    fn test_interest_only_balance_is_flat_until_maturity() {
        let terms = LoanTerms::new_interest_only(
            Money::from_major(200_000),
            Percentage::new(dec!(4.5)),
            360,
            start(),
        )
        .unwrap();

        for k in [0, 1, 60, 359] {
            assert_eq!(
                BalanceProjector::remaining_balance(&terms, k).unwrap(),
                Money::from_major(200_000)
            );
        }
        assert_eq!(
            BalanceProjector::remaining_balance(&terms, 360).unwrap(),
            Money::ZERO
        );
    }

    #[test]
    fn test_principal_paid_complements_balance() {
        let terms = standard_terms();
        let balance = BalanceProjector::remaining_balance(&terms, 60).unwrap();
        let paid = BalanceProjector::principal_paid(&terms, 60).unwrap();
        assert_eq!(balance + paid, terms.principal());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let terms = standard_terms();
        let first = BalanceProjector::remaining_balance(&terms, 123).unwrap();
        let second = BalanceProjector::remaining_balance(&terms, 123).unwrap();
        assert_eq!(first, second);
    }
}
