pub mod amortization;
pub mod analysis;
pub mod decimal;
pub mod equity;
pub mod errors;
pub mod types;

// re-export key types
pub use decimal::{Money, Percentage};
pub use errors::{FinanceError, Result};
pub use types::{LoanTerms, MAX_TERM_MONTHS};
pub use amortization::{
    monthly_payment, AmortizationPeriod, AmortizationSchedule, BalanceProjector, BalloonPayment,
    SchedulePeriods,
};
pub use analysis::{
    BrrrrMao, ComparisonReport, FinancingAssumptions, LoanComparator, LoanSummary, LtrMao,
    MaoCalculator, RefinanceAnalyzer, RefinanceComparison, RefinanceRecommendation,
};
pub use equity::{EquityAggregator, EquityShare, LoanFigures, OwnerPosition};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
