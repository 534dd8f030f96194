pub mod comparison;
pub mod mao;
pub mod refinance;

pub use comparison::{ComparisonReport, LoanComparator, LoanSummary};
pub use mao::{
    debt_service_coverage, BrrrrMao, FinancingAssumptions, LtrMao, MaoCalculator,
};
pub use refinance::{RefinanceAnalyzer, RefinanceComparison, RefinanceRecommendation};
