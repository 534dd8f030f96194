use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSchedule;
use crate::decimal::{Money, Percentage};
use crate::errors::{FinanceError, Result};
use crate::types::LoanTerms;

/// derived figures for one loan option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub option_index: usize,
    pub principal: Money,
    pub annual_rate: Percentage,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    /// total interest per unit of principal; zero for a zero-principal loan
    pub interest_to_principal: Decimal,
}

/// Ranked comparison across loan options. Each ranking field holds the
/// index of the winning option; ties go to the first-seen option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub summaries: Vec<LoanSummary>,
    pub lowest_payment: usize,
    pub lowest_total_interest: usize,
    pub shortest_term: usize,
    pub lowest_rate: usize,
    pub lowest_interest_to_principal: usize,
    /// the option appearing most often across the five rankings
    pub recommended: usize,
}

pub struct LoanComparator;

impl LoanComparator {
    /// compare loan options on payment, total interest, term, rate, and
    /// interest-to-principal ratio
    pub fn compare(options: &[LoanTerms]) -> Result<ComparisonReport> {
        if options.is_empty() {
            return Err(FinanceError::NoLoanOptions);
        }

        let mut summaries = Vec::with_capacity(options.len());
        for (option_index, terms) in options.iter().enumerate() {
            let schedule = AmortizationSchedule::generate(terms)?;
            let interest_to_principal = if terms.principal().is_positive() {
                schedule.total_interest.as_decimal() / terms.principal().as_decimal()
            } else {
                Decimal::ZERO
            };

            summaries.push(LoanSummary {
                option_index,
                principal: terms.principal(),
                annual_rate: terms.annual_rate(),
                term_months: terms.term_months(),
                monthly_payment: schedule.monthly_payment,
                total_paid: schedule.total_paid,
                total_interest: schedule.total_interest,
                interest_to_principal,
            });
        }

        let lowest_payment = argmin(&summaries, |s| s.monthly_payment.as_decimal());
        let lowest_total_interest = argmin(&summaries, |s| s.total_interest.as_decimal());
        let shortest_term = argmin(&summaries, |s| Decimal::from(s.term_months));
        let lowest_rate = argmin(&summaries, |s| s.annual_rate.value());
        let lowest_interest_to_principal = argmin(&summaries, |s| s.interest_to_principal);

        let rankings = [
            lowest_payment,
            lowest_total_interest,
            shortest_term,
            lowest_rate,
            lowest_interest_to_principal,
        ];
        let recommended = most_frequent(&rankings, summaries.len());

        Ok(ComparisonReport {
            summaries,
            lowest_payment,
            lowest_total_interest,
            shortest_term,
            lowest_rate,
            lowest_interest_to_principal,
            recommended,
        })
    }
}

fn argmin(summaries: &[LoanSummary], key: impl Fn(&LoanSummary) -> Decimal) -> usize {
    let mut best = 0;
    for i in 1..summaries.len() {
        if key(&summaries[i]) < key(&summaries[best]) {
            best = i;
        }
    }
    best
}

fn most_frequent(rankings: &[usize], option_count: usize) -> usize {
    let mut best = 0;
    let mut best_votes = 0;
    for candidate in 0..option_count {
        let votes = rankings.iter().filter(|&&r| r == candidate).count();
        if votes > best_votes {
            best = candidate;
            best_votes = votes;
        }
    }
    best
}
