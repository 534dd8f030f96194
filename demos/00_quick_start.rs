/// quick start - minimal example to get started
use property_finance_rs::chrono::NaiveDate;
use property_finance_rs::{monthly_payment, BalanceProjector, LoanTerms, Money, Percentage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a $200,000 rental property mortgage at 4.5% over 30 years
    let terms = LoanTerms::new(
        Money::from_major(200_000),
        Percentage::from_str_exact("4.5%")?,
        360,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    )?;

    println!("monthly payment: {}", monthly_payment(&terms));

    // balance after five years of payments, without building the schedule
    let balance = BalanceProjector::remaining_balance(&terms, 60)?;
    println!("balance after 60 payments: {}", balance.round_cents());

    Ok(())
}
