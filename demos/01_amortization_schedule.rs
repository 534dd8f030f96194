/// full amortization schedule with a balloon payoff
use property_finance_rs::chrono::NaiveDate;
use property_finance_rs::{
    AmortizationSchedule, BalloonPayment, LoanTerms, Money, Percentage,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::new(
        Money::from_major(144_000),
        Percentage::from_percentage(6),
        360,
        NaiveDate::from_ymd_opt(2024, 3, 31).ok_or("bad date")?,
    )?;

    let schedule = AmortizationSchedule::generate(&terms)?;
    println!("payment:        {}", schedule.monthly_payment);
    println!("total interest: {}", schedule.total_interest.round_cents());
    println!("total paid:     {}", schedule.total_paid.round_cents());

    println!("\nfirst year:");
    for period in &schedule.periods[..12] {
        println!(
            "  {:>3}  {}  principal {}  interest {}  balance {}",
            period.period_number,
            period.payment_date,
            period.principal_portion.round_cents(),
            period.interest_portion.round_cents(),
            period.remaining_balance.round_cents(),
        );
    }

    // the same loan sold with a five year balloon
    let balloon = BalloonPayment::derive(&terms, 60)?;
    println!(
        "\nballoon due {} for {} after {} in payments",
        balloon.due_date,
        balloon.amount.round_cents(),
        balloon.total_payments_before_balloon
    );

    println!("\nas json: {}", serde_json::to_string(&balloon)?);

    Ok(())
}
