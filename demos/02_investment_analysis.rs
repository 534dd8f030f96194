/// investment analysis: refinance, MAO, and partner equity
use property_finance_rs::chrono::NaiveDate;
use property_finance_rs::{
    EquityAggregator, EquityShare, FinancingAssumptions, LoanFigures, LoanTerms, MaoCalculator,
    Money, Percentage, RefinanceAnalyzer, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;

    // should we refinance the 6% note?
    let current = LoanTerms::new(
        Money::from_major(200_000),
        Percentage::new(dec!(6)),
        360,
        start,
    )?;
    let proposed = LoanTerms::new(
        Money::from_major(200_000),
        Percentage::new(dec!(4.5)),
        360,
        start,
    )?;
    let refi =
        RefinanceAnalyzer::refinance_savings(&current, &proposed, Money::from_major(4_000))?;
    println!("{}", refi.summary());

    // what can we offer for the duplex?
    let financing = FinancingAssumptions {
        annual_rate: Percentage::new(dec!(7.5)),
        term_months: 360,
        down_payment: Percentage::new(dec!(20)),
    };
    let mao = MaoCalculator::for_long_term_rental(
        Money::from_major(2_500),
        Money::from_major(1_000),
        Money::from_major(300),
        Percentage::new(dec!(6)),
        &financing,
    )?;
    println!("long-term rental MAO: {}", mao.mao.round_cents());

    let brrrr = MaoCalculator::for_brrrr(
        Money::from_major(200_000),
        Money::from_major(30_000),
        Money::from_major(5_000),
        Money::from_major(5_000),
        Percentage::new(dec!(75)),
        Money::from_major(10_000),
    )?;
    println!("BRRRR MAO:            {}", brrrr.mao);

    // split this month's numbers with a 25% partner
    let partner = EquityShare::new(Uuid::new_v4(), dec!(0.25));
    let figures = LoanFigures {
        loan_balance: Money::from_major(184_000),
        monthly_principal: Money::from_major(260),
        monthly_payment: Money::from_cents(101_337),
        monthly_cash_flow: Money::from_major(450),
    };
    let position = EquityAggregator::prorate(&figures, &partner);
    println!(
        "partner {} holds {} of balance, {} of cash flow",
        position.owner_id,
        position.loan_balance.round_cents(),
        position.monthly_cash_flow.round_cents()
    );

    Ok(())
}
