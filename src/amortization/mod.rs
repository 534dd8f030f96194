pub mod balloon;
pub mod projection;
pub mod schedule;

pub use balloon::BalloonPayment;
pub use projection::BalanceProjector;
pub use schedule::{
    monthly_payment, payment_factor, AmortizationPeriod, AmortizationSchedule, SchedulePeriods,
};
