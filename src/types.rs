use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::errors::{FinanceError, Result};

/// upper bound on loan terms, rejects pathological inputs from callers
pub const MAX_TERM_MONTHS: u32 = 600;

/// upper bound on annual rates, as percentage points
pub const MAX_ANNUAL_RATE: Decimal = dec!(100);

/// Immutable terms of a single loan. Constructed once per calculation
/// request through the validating constructors; every computation takes
/// terms by reference and returns new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    principal: Money,
    annual_rate: Percentage,
    term_months: u32,
    is_interest_only: bool,
    start_date: NaiveDate,
}

impl LoanTerms {
    /// standard amortizing loan
    pub fn new(
        principal: Money,
        annual_rate: Percentage,
        term_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        Self::build(principal, annual_rate, term_months, false, start_date)
    }

    /// interest-only loan, full principal due with the final payment
    pub fn new_interest_only(
        principal: Money,
        annual_rate: Percentage,
        term_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        Self::build(principal, annual_rate, term_months, true, start_date)
    }

    fn build(
        principal: Money,
        annual_rate: Percentage,
        term_months: u32,
        is_interest_only: bool,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate,
            term_months,
            is_interest_only,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Re-checks the construction invariants. The engine calls this on
    /// entry so terms reconstructed across a serialization boundary get the
    /// same validation as constructor-built ones.
    pub fn validate(&self) -> Result<()> {
        if self.term_months == 0 {
            return Err(FinanceError::InvalidLoanTerms {
                message: "term must be at least 1 month".to_string(),
            });
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!(
                    "term of {} months exceeds the {} month maximum",
                    self.term_months, MAX_TERM_MONTHS
                ),
            });
        }
        if self.principal.is_negative() {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!("principal {} is negative", self.principal),
            });
        }
        if self.annual_rate.is_negative() || self.annual_rate.value() > MAX_ANNUAL_RATE {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!("annual rate {} is outside 0%..=100%", self.annual_rate),
            });
        }
        Ok(())
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Percentage {
        self.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn is_interest_only(&self) -> bool {
        self.is_interest_only
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// monthly rate as a fraction of 1 (annual / 12 / 100)
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate.monthly_fraction()
    }
}
