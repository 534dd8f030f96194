use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::payment_factor;
use crate::decimal::{Money, Percentage};
use crate::errors::{FinanceError, Result};
use crate::types::MAX_TERM_MONTHS;

/// financing assumed behind a long-term-rental offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingAssumptions {
    pub annual_rate: Percentage,
    pub term_months: u32,
    /// down payment as a percentage of purchase price
    pub down_payment: Percentage,
}

impl FinancingAssumptions {
    fn validate(&self) -> Result<()> {
        if self.term_months == 0 || self.term_months > MAX_TERM_MONTHS {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!(
                    "financing term of {} months is outside 1..={}",
                    self.term_months, MAX_TERM_MONTHS
                ),
            });
        }
        if self.annual_rate.is_negative() || self.annual_rate.value() > dec!(100) {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!("financing rate {} is outside 0%..=100%", self.annual_rate),
            });
        }
        if self.down_payment.is_negative() || self.down_payment.value() > dec!(100) {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!("down payment {} is outside 0%..=100%", self.down_payment),
            });
        }
        Ok(())
    }
}

/// maximum allowable offer for a long-term rental acquisition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LtrMao {
    /// the offer ceiling: lesser of the income and financing approaches,
    /// floored at zero
    pub mao: Money,
    pub monthly_noi: Money,
    pub annual_noi: Money,
    /// NOI left for debt service after the target cash flow
    pub monthly_debt_service_budget: Money,
    /// loan the debt-service budget supports at the assumed financing
    pub supportable_loan: Money,
    /// `annual_NOI / cap_rate`; absent at a zero cap rate
    pub income_approach_ceiling: Option<Money>,
    /// purchase price the supportable loan implies; absent for all-cash
    pub financing_approach_ceiling: Option<Money>,
    /// debt service coverage at the offer; `None` means no debt at all
    pub dscr_at_mao: Option<Decimal>,
}

/// maximum allowable offer for a buy-rehab-rent-refinance-repeat deal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrrrrMao {
    /// `ARV * LTV - renovation - closing - holding + max_cash_left`,
    /// floored at zero
    pub mao: Money,
    /// expected refinance proceeds: `ARV * LTV`
    pub refinance_proceeds: Money,
    /// renovation + closing + holding
    pub total_project_costs: Money,
    pub max_cash_left: Money,
}

/// NOI per unit of annual debt service; `None` when there is no debt
/// service to cover (infinite coverage, not a fault)
pub fn debt_service_coverage(annual_noi: Money, annual_debt_service: Money) -> Option<Decimal> {
    if annual_debt_service.is_positive() {
        Some(annual_noi.as_decimal() / annual_debt_service.as_decimal())
    } else {
        None
    }
}

pub struct MaoCalculator;

impl MaoCalculator {
    /// Offer ceiling for a long-term rental: the lesser of the income
    /// approach (`annual_NOI / cap_rate`) and the price whose financed debt
    /// service still leaves the target monthly cash flow. Zero when
    /// expenses meet or exceed income.
    pub fn for_long_term_rental(
        monthly_income: Money,
        monthly_expenses: Money,
        target_monthly_cash_flow: Money,
        target_cap_rate: Percentage,
        financing: &FinancingAssumptions,
    ) -> Result<LtrMao> {
        financing.validate()?;
        if target_cap_rate.is_negative() || target_cap_rate.value() > dec!(100) {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!("cap rate {} is outside 0%..=100%", target_cap_rate),
            });
        }

        let monthly_noi = monthly_income - monthly_expenses;
        let annual_noi = monthly_noi * dec!(12);
        if !monthly_noi.is_positive() {
            return Ok(LtrMao {
                mao: Money::ZERO,
                monthly_noi,
                annual_noi,
                monthly_debt_service_budget: Money::ZERO,
                supportable_loan: Money::ZERO,
                income_approach_ceiling: None,
                financing_approach_ceiling: None,
                dscr_at_mao: None,
            });
        }

        let income_approach_ceiling = if target_cap_rate.is_zero() {
            None
        } else {
            Some(annual_noi / target_cap_rate.fraction())
        };

        let monthly_debt_service_budget =
            (monthly_noi - target_monthly_cash_flow).max(Money::ZERO);
        let factor = payment_factor(
            financing.annual_rate.monthly_fraction(),
            financing.term_months,
        );
        let supportable_loan = monthly_debt_service_budget / factor;

        let financed_fraction = Decimal::ONE - financing.down_payment.fraction();
        let financing_approach_ceiling = if financed_fraction.is_zero() {
            None
        } else {
            Some(supportable_loan / financed_fraction)
        };

        let mao = match (income_approach_ceiling, financing_approach_ceiling) {
            (Some(income), Some(financed)) => income.min(financed),
            (Some(income), None) => income,
            (None, Some(financed)) => financed,
            (None, None) => Money::ZERO,
        }
        .max(Money::ZERO);

        let loan_at_mao = mao * financed_fraction;
        let annual_debt_service = loan_at_mao * factor * dec!(12);
        let dscr_at_mao = debt_service_coverage(annual_noi, annual_debt_service);

        Ok(LtrMao {
            mao,
            monthly_noi,
            annual_noi,
            monthly_debt_service_budget,
            supportable_loan,
            income_approach_ceiling,
            financing_approach_ceiling,
            dscr_at_mao,
        })
    }

    /// Offer ceiling for a BRRRR acquisition: refinance proceeds at the
    /// given LTV must cover every project cost except the cash the
    /// investor is willing to leave in the deal.
    pub fn for_brrrr(
        after_repair_value: Money,
        renovation_costs: Money,
        closing_costs: Money,
        holding_costs: Money,
        refinance_ltv: Percentage,
        max_cash_left: Money,
    ) -> Result<BrrrrMao> {
        if refinance_ltv.is_negative() || refinance_ltv.value() > dec!(100) {
            return Err(FinanceError::InvalidLoanTerms {
                message: format!("refinance LTV {} is outside 0%..=100%", refinance_ltv),
            });
        }

        let refinance_proceeds = after_repair_value * refinance_ltv.fraction();
        let total_project_costs = renovation_costs + closing_costs + holding_costs;
        let mao = (refinance_proceeds - total_project_costs + max_cash_left).max(Money::ZERO);

        Ok(BrrrrMao {
            mao,
            refinance_proceeds,
            total_project_costs,
            max_cash_left,
        })
    }
}
