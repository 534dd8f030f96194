use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

/// single period of an amortization schedule, 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub period_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
}

/// Level monthly payment for the terms, rounded to cents.
///
/// Standard amortizing: `P * r(1+r)^n / ((1+r)^n - 1)`.
/// Zero rate: straight-line `P / n`.
/// Interest-only: `P * r`.
pub fn monthly_payment(terms: &LoanTerms) -> Money {
    if terms.is_interest_only() {
        return (terms.principal() * terms.monthly_rate()).round_cents();
    }
    (terms.principal() * payment_factor(terms.monthly_rate(), terms.term_months())).round_cents()
}

/// Level payment per unit of principal: `r(1+r)^n / ((1+r)^n - 1)`, or
/// `1/n` at zero rate. Shared with the MAO calculator, which inverts it to
/// size a loan from a debt-service budget.
pub fn payment_factor(monthly_rate: Decimal, term_months: u32) -> Decimal {
    if term_months == 0 {
        return Decimal::ONE;
    }
    if monthly_rate.is_zero() {
        return Decimal::ONE / Decimal::from(term_months);
    }
    let compound = compound_factor(monthly_rate, term_months);
    monthly_rate * compound / (compound - Decimal::ONE)
}

/// `(1 + r)^periods` by iterated multiplication, exact in the decimal domain
pub(crate) fn compound_factor(monthly_rate: Decimal, periods: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    let base = Decimal::ONE + monthly_rate;
    for _ in 0..periods {
        factor *= base;
    }
    factor
}

/// `start + months`, with day-of-month clamped to 28 so every scheduled
/// date is valid in every month
pub(crate) fn add_months_clamped(start: NaiveDate, months: u32) -> NaiveDate {
    let clamped = clamp_day(start);
    clamped
        .checked_add_months(Months::new(months))
        .unwrap_or(clamped)
}

fn clamp_day(date: NaiveDate) -> NaiveDate {
    if date.day() > 28 {
        date.with_day(28).unwrap_or(date)
    } else {
        date
    }
}

/// date of a 1-based period: `start + (period - 1)` months
pub(crate) fn period_date(start: NaiveDate, period_number: u32) -> NaiveDate {
    add_months_clamped(start, period_number.saturating_sub(1))
}

/// Lazily produced, finite sequence of schedule periods. A pure function of
/// the loan terms: restartable by constructing (or cloning) a fresh iterator
/// over the same terms, with no side effects and no shared state.
#[derive(Debug, Clone)]
pub struct SchedulePeriods {
    terms: LoanTerms,
    payment: Money,
    monthly_rate: Decimal,
    next_period: u32,
    balance: Money,
    cumulative_principal: Money,
    cumulative_interest: Money,
}

impl SchedulePeriods {
    pub fn new(terms: &LoanTerms) -> Self {
        Self {
            terms: *terms,
            payment: monthly_payment(terms),
            monthly_rate: terms.monthly_rate(),
            next_period: 1,
            balance: terms.principal(),
            cumulative_principal: Money::ZERO,
            cumulative_interest: Money::ZERO,
        }
    }
}

impl Iterator for SchedulePeriods {
    type Item = AmortizationPeriod;

    fn next(&mut self) -> Option<AmortizationPeriod> {
        if self.next_period > self.terms.term_months() {
            return None;
        }
        let period_number = self.next_period;
        self.next_period += 1;
        let is_final = period_number == self.terms.term_months();
        let beginning = self.balance;

        let (payment, principal, interest) = if self.terms.is_interest_only() {
            let interest = self.payment;
            if is_final {
                // full principal due alongside the last interest payment
                (interest + beginning, beginning, interest)
            } else {
                (interest, Money::ZERO, interest)
            }
        } else {
            let interest = beginning * self.monthly_rate;
            let payoff = beginning + interest;
            if is_final || self.payment >= payoff {
                // principal forced to the remaining balance so the schedule
                // terminates at exactly zero, never below
                (payoff, beginning, interest)
            } else {
                (self.payment, self.payment - interest, interest)
            }
        };

        self.balance = beginning - principal;
        self.cumulative_principal += principal;
        self.cumulative_interest += interest;

        Some(AmortizationPeriod {
            period_number,
            payment_date: period_date(self.terms.start_date(), period_number),
            beginning_balance: beginning,
            payment_amount: payment,
            principal_portion: principal,
            interest_portion: interest,
            remaining_balance: self.balance,
            cumulative_principal: self.cumulative_principal,
            cumulative_interest: self.cumulative_interest,
        })
    }
}

/// collected amortization schedule with roll-ups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub monthly_payment: Money,
    pub periods: Vec<AmortizationPeriod>,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl AmortizationSchedule {
    /// generate the full schedule
    pub fn generate(terms: &LoanTerms) -> Result<Self> {
        Self::generate_capped(terms, terms.term_months())
    }

    /// generate at most the first `max_periods` periods
    pub fn generate_capped(terms: &LoanTerms, max_periods: u32) -> Result<Self> {
        terms.validate()?;

        let periods: Vec<AmortizationPeriod> = SchedulePeriods::new(terms)
            .take(max_periods as usize)
            .collect();

        let total_interest = periods
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_paid = periods
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            terms: *terms,
            monthly_payment: monthly_payment(terms),
            periods,
            total_interest,
            total_paid,
        })
    }

    /// get a period by its 1-based number
    pub fn period(&self, period_number: u32) -> Option<&AmortizationPeriod> {
        if period_number == 0 {
            return None;
        }
        self.periods.get((period_number - 1) as usize)
    }

    /// remaining balance after the given number of payments
    pub fn balance_after(&self, payments_made: u32) -> Money {
        if payments_made == 0 {
            return self.terms.principal();
        }
        self.period(payments_made)
            .map(|p| p.remaining_balance)
            .unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Percentage;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn standard_reference_terms() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(200_000),
            Percentage::new(dec!(4.5)),
            360,
            date(2024, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_standard_reference_payment() {
        let payment = monthly_payment(&standard_reference_terms());
        assert_eq!(payment, Money::from_str_exact("1013.37").unwrap());
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let terms = LoanTerms::new(
            Money::from_major(120_000),
            Percentage::ZERO,
            12,
            date(2024, 1, 1),
        )
        .unwrap();

        let schedule = AmortizationSchedule::generate(&terms).unwrap();
        assert_eq!(schedule.periods.len(), 12);
        assert_eq!(schedule.monthly_payment, Money::from_major(10_000));

        for period in &schedule.periods {
            assert_eq!(period.payment_amount, Money::from_major(10_000));
            assert_eq!(period.principal_portion, Money::from_major(10_000));
            assert_eq!(period.interest_portion, Money::ZERO);
        }

        assert_eq!(schedule.periods[11].remaining_balance, Money::ZERO);
        assert_eq!(schedule.total_interest, Money::ZERO);
        assert_eq!(schedule.total_paid, Money::from_major(120_000));
    }

    #[test]
    fn test_schedule_terminates_at_exactly_zero() {
        let schedule = AmortizationSchedule::generate(&standard_reference_terms()).unwrap();
        assert_eq!(schedule.periods.len(), 360);

        let last = &schedule.periods[359];
        assert_eq!(last.remaining_balance, Money::ZERO);
        assert_eq!(last.cumulative_principal, Money::from_major(200_000));
        assert!(last.principal_portion.is_positive());
    }

    #[test]
    fn test_payment_decomposition_is_exact_every_period() {
        let schedule = AmortizationSchedule::generate(&standard_reference_terms()).unwrap();

        for period in &schedule.periods {
            assert_eq!(
                period.payment_amount,
                period.principal_portion + period.interest_portion,
                "period {} decomposition drifted",
                period.period_number
            );
            assert!(!period.remaining_balance.is_negative());
        }

        // total paid is principal plus total interest, to the last fraction
        assert_eq!(
            schedule.total_paid,
            schedule.terms.principal() + schedule.total_interest
        );
    }

    #[test]
    fn test_interest_only_schedule() {
        let terms = LoanTerms::new_interest_only(
            Money::from_major(200_000),
            Percentage::new(dec!(4.5)),
            360,
            date(2024, 1, 1),
        )
        .unwrap();

        let schedule = AmortizationSchedule::generate(&terms).unwrap();
        assert_eq!(schedule.monthly_payment, Money::from_major(750));

        for period in &schedule.periods[..359] {
            assert_eq!(period.payment_amount, Money::from_major(750));
            assert_eq!(period.principal_portion, Money::ZERO);
            assert_eq!(period.remaining_balance, Money::from_major(200_000));
        }

        let last = &schedule.periods[359];
        assert_eq!(last.payment_amount, Money::from_major(200_750));
        assert_eq!(last.principal_portion, Money::from_major(200_000));
        assert_eq!(last.remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_period_dates_follow_start_with_clamped_day() {
        let terms = LoanTerms::new(
            Money::from_major(12_000),
            Percentage::new(dec!(6)),
            13,
            date(2024, 1, 31),
        )
        .unwrap();

        let schedule = AmortizationSchedule::generate(&terms).unwrap();
        // period 1 falls on the start date, day clamped to 28
        assert_eq!(schedule.periods[0].payment_date, date(2024, 1, 28));
        assert_eq!(schedule.periods[1].payment_date, date(2024, 2, 28));
        assert_eq!(schedule.periods[12].payment_date, date(2025, 1, 28));

        let mid_month = LoanTerms::new(
            Money::from_major(12_000),
            Percentage::new(dec!(6)),
            2,
            date(2024, 3, 15),
        )
        .unwrap();
        let schedule = AmortizationSchedule::generate(&mid_month).unwrap();
        assert_eq!(schedule.periods[0].payment_date, date(2024, 3, 15));
        assert_eq!(schedule.periods[1].payment_date, date(2024, 4, 15));
    }

    #[test]
    fn test_capped_schedule() {
        let schedule =
            AmortizationSchedule::generate_capped(&standard_reference_terms(), 60).unwrap();
        assert_eq!(schedule.periods.len(), 60);
        assert_eq!(schedule.periods[59].period_number, 60);

        // a cap past the term returns the whole schedule
        let schedule =
            AmortizationSchedule::generate_capped(&standard_reference_terms(), 1_000).unwrap();
        assert_eq!(schedule.periods.len(), 360);
    }

    #[test]
    fn test_periods_iterator_is_restartable() {
        let terms = standard_reference_terms();

        let first: Vec<AmortizationPeriod> = SchedulePeriods::new(&terms).take(12).collect();
        let second: Vec<AmortizationPeriod> = SchedulePeriods::new(&terms).take(12).collect();
        assert_eq!(first, second);

        let collected = AmortizationSchedule::generate(&terms).unwrap();
        assert_eq!(&collected.periods[..12], &first[..]);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let terms = standard_reference_terms();
        let a = AmortizationSchedule::generate(&terms).unwrap();
        let b = AmortizationSchedule::generate(&terms).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uneven_straight_line_final_adjustment() {
        // $1,000 over 3 months at 0%: two $333.33 payments, one $333.34
        let terms = LoanTerms::new(
            Money::from_major(1_000),
            Percentage::ZERO,
            3,
            date(2024, 1, 1),
        )
        .unwrap();

        let schedule = AmortizationSchedule::generate(&terms).unwrap();
        assert_eq!(schedule.periods[0].payment_amount, Money::from_cents(33_333));
        assert_eq!(schedule.periods[1].payment_amount, Money::from_cents(33_333));
        assert_eq!(schedule.periods[2].payment_amount, Money::from_cents(33_334));
        assert_eq!(schedule.periods[2].remaining_balance, Money::ZERO);
    }
}
