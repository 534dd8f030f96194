use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// One partner's fractional stake in a property. Share totals across
/// partners are the caller's responsibility; the aggregator only scales
/// what it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityShare {
    pub owner_id: Uuid,
    /// fraction of 1.0 (0.25 for a quarter share)
    pub fraction: Decimal,
}

impl EquityShare {
    pub fn new(owner_id: Uuid, fraction: Decimal) -> Self {
        Self { owner_id, fraction }
    }
}

/// monetary figures for one loan, before proration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoanFigures {
    pub loan_balance: Money,
    pub monthly_principal: Money,
    pub monthly_payment: Money,
    pub monthly_cash_flow: Money,
}

/// an owner's prorated slice of the figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPosition {
    pub owner_id: Uuid,
    pub fraction: Decimal,
    pub loan_balance: Money,
    pub monthly_principal: Money,
    pub monthly_payment: Money,
    pub monthly_cash_flow: Money,
}

pub struct EquityAggregator;

impl EquityAggregator {
    /// scale one loan's figures by an owner's share into a fresh record
    pub fn prorate(figures: &LoanFigures, share: &EquityShare) -> OwnerPosition {
        OwnerPosition {
            owner_id: share.owner_id,
            fraction: share.fraction,
            loan_balance: figures.loan_balance * share.fraction,
            monthly_principal: figures.monthly_principal * share.fraction,
            monthly_payment: figures.monthly_payment * share.fraction,
            monthly_cash_flow: figures.monthly_cash_flow * share.fraction,
        }
    }

    /// sum figures across a portfolio of loans, then scale
    pub fn prorate_portfolio(figures: &[LoanFigures], share: &EquityShare) -> OwnerPosition {
        let combined = figures.iter().fold(LoanFigures::default(), |acc, f| {
            LoanFigures {
                loan_balance: acc.loan_balance + f.loan_balance,
                monthly_principal: acc.monthly_principal + f.monthly_principal,
                monthly_payment: acc.monthly_payment + f.monthly_payment,
                monthly_cash_flow: acc.monthly_cash_flow + f.monthly_cash_flow,
            }
        });
        Self::prorate(&combined, share)
    }

    /// one loan's figures sliced across many owners
    pub fn positions(figures: &LoanFigures, shares: &[EquityShare]) -> Vec<OwnerPosition> {
        shares
            .iter()
            .map(|share| Self::prorate(figures, share))
            .collect()
    }
}
