use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSchedule;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

const STRONG_BREAK_EVEN_MONTHS: Decimal = dec!(24);
const SLOW_BREAK_EVEN_MONTHS: Decimal = dec!(60);

/// threshold-driven verdict on a refinance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinanceRecommendation {
    /// no monthly savings, or closing costs eat the lifetime savings
    NotRecommended,
    /// break-even within 24 months
    StronglyRecommended,
    Recommended,
    /// break-even beyond 60 months
    ConsiderCarefully,
}

/// refinance outcome, recomputed from the two loans on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub current_payment: Money,
    pub proposed_payment: Money,
    pub monthly_savings: Money,
    pub closing_costs: Money,
    /// months of savings needed to recover closing costs; `None` when
    /// there are no monthly savings to recover them with
    pub break_even_months: Option<Decimal>,
    /// difference of each loan's total interest over its own term
    pub total_interest_savings: Money,
    /// interest savings net of closing costs
    pub total_cost_savings: Money,
    pub recommendation: RefinanceRecommendation,
}

impl RefinanceComparison {
    /// one-line verdict with the figures substituted in
    pub fn summary(&self) -> String {
        match (self.recommendation, self.break_even_months) {
            (RefinanceRecommendation::NotRecommended, _) => format!(
                "not recommended: {} monthly savings and {} total savings after {} closing costs",
                self.monthly_savings, self.total_cost_savings, self.closing_costs
            ),
            (RefinanceRecommendation::StronglyRecommended, Some(break_even)) => format!(
                "strongly recommended: saves {} per month, breaks even in {} months, {} saved over the loan",
                self.monthly_savings, break_even, self.total_cost_savings
            ),
            (RefinanceRecommendation::ConsiderCarefully, Some(break_even)) => format!(
                "consider carefully: {} months to break even on {} closing costs, {} saved over the loan",
                break_even, self.closing_costs, self.total_cost_savings
            ),
            (_, Some(break_even)) => format!(
                "recommended: saves {} per month, breaks even in {} months, {} saved over the loan",
                self.monthly_savings, break_even, self.total_cost_savings
            ),
            // positive recommendations always carry a break-even figure
            (_, None) => format!(
                "not recommended: {} monthly savings",
                self.monthly_savings
            ),
        }
    }
}

pub struct RefinanceAnalyzer;

impl RefinanceAnalyzer {
    /// compare the in-place loan against a proposed replacement
    pub fn refinance_savings(
        current: &LoanTerms,
        proposed: &LoanTerms,
        closing_costs: Money,
    ) -> Result<RefinanceComparison> {
        let current_schedule = AmortizationSchedule::generate(current)?;
        let proposed_schedule = AmortizationSchedule::generate(proposed)?;

        let current_payment = current_schedule.monthly_payment;
        let proposed_payment = proposed_schedule.monthly_payment;
        let monthly_savings = current_payment - proposed_payment;

        let break_even_months = if monthly_savings.is_positive() {
            Some((closing_costs.as_decimal() / monthly_savings.as_decimal()).round_dp(1))
        } else {
            None
        };

        let total_interest_savings =
            current_schedule.total_interest - proposed_schedule.total_interest;
        let total_cost_savings = total_interest_savings - closing_costs;

        let recommendation = match break_even_months {
            None => RefinanceRecommendation::NotRecommended,
            Some(_) if !total_cost_savings.is_positive() => {
                RefinanceRecommendation::NotRecommended
            }
            Some(break_even) if break_even <= STRONG_BREAK_EVEN_MONTHS => {
                RefinanceRecommendation::StronglyRecommended
            }
            Some(break_even) if break_even > SLOW_BREAK_EVEN_MONTHS => {
                RefinanceRecommendation::ConsiderCarefully
            }
            Some(_) => RefinanceRecommendation::Recommended,
        };

        Ok(RefinanceComparison {
            current_payment,
            proposed_payment,
            monthly_savings,
            closing_costs,
            break_even_months,
            total_interest_savings,
            total_cost_savings,
            recommendation,
        })
    }
}
