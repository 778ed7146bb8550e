//! Integration tests for the loan and fractionalization calculators.
//!
//! Tests cover:
//! - Reference loan scenario and invariants across the slider range
//! - Fraction plan figures and LTV caps
//! - Assets worth less than the minimum amount are not eligible

mod common;

use rwa_lend::core::{config::LendingConfig, range::RangeError};
use time::macros::date;

use common::*;

#[test]
fn test_reference_loan_quote() {
    let lending = LendingConfig::default();
    let calculator = LoanCalculator::new(15_000_000, &lending).expect("eligible");

    // 1. Max principal is 60% of the valuation
    assert_eq!(calculator.max_principal(), 9_000_000);

    // 2. 5,000,000 over 180 days at 5%
    let quote = calculator.quote(5_000_000, LoanTerm::Days180);
    assert_eq!(quote.interest, 123_288);
    assert_eq!(quote.net_disbursed, 4_876_712);

    // 3. Due date counts calendar days from the start
    assert_eq!(quote.due_date(date!(2025 - 10 - 28)), date!(2026 - 04 - 26));
}

#[test]
fn test_interest_never_exceeds_principal() {
    let lending = LendingConfig::default();
    let calculator = LoanCalculator::new(15_000_000, &lending).expect("eligible");
    let range = calculator.range();

    for term in LoanTerm::ALL {
        let mut previous = 0;
        for principal in range.values() {
            let quote = calculator.quote(principal, term);
            assert!(quote.interest <= quote.principal);
            assert_eq!(quote.principal - quote.interest, quote.net_disbursed);
            // interest grows with the principal
            assert!(quote.interest >= previous);
            previous = quote.interest;
        }
    }
}

#[test]
fn test_quote_snaps_principal_to_slider() {
    let lending = LendingConfig::default();
    let calculator = LoanCalculator::new(800_000, &lending).expect("eligible");

    assert_eq!(calculator.max_principal(), 480_000);
    assert_eq!(calculator.quote(0, LoanTerm::Days30).principal, 100_000);
    assert_eq!(calculator.quote(149_999, LoanTerm::Days30).principal, 100_000);
    assert_eq!(calculator.quote(150_000, LoanTerm::Days30).principal, 200_000);
    // 480,000 is off the step grid; the last stop is 400,000
    assert_eq!(calculator.quote(470_000, LoanTerm::Days30).principal, 400_000);
    assert_eq!(calculator.quote(10_000_000, LoanTerm::Days30).principal, 400_000);
}

#[test]
fn test_cheap_asset_is_not_eligible() {
    let lending = LendingConfig::default();
    let result = LoanCalculator::new(100_000, &lending);
    assert_eq!(
        result.err(),
        Some(RangeError::Empty {
            min: 100_000,
            max: 60_000
        })
    );
}

#[test]
fn test_term_round_trips_through_days() {
    for term in LoanTerm::ALL {
        assert_eq!(LoanTerm::try_from(term.days()), Ok(term));
    }
    assert!(LoanTerm::try_from(60).is_err());
}

#[test]
fn test_reference_fraction_plan() {
    let lending = LendingConfig::default();
    let calculator = FractionCalculator::new(6_400_000, &lending).expect("eligible");

    // 1. Cap is 80% of the asset value; the slider stops on the last step below it
    assert_eq!(calculator.max_fragment_value(), 5_120_000);
    let top = calculator.plan(5_110_000);
    assert_eq!(top.fragment_value, 5_100_000);
    assert_eq!(top.fragment_count, 255);

    // 2. Default plan: 2,000,000 gives 100 fragments of 20,000
    let plan = calculator.default_plan();
    assert_eq!(plan.fragment_count, 100);
    assert_eq!(plan.value_per_fragment, 20_000.0);
    assert_eq!(plan.remaining_value, 4_400_000);
    assert!((plan.used_percentage() - 31.25).abs() < 1e-9);
    assert!((plan.used_percentage() + plan.remaining_percentage() - 100.0).abs() < 1e-9);
}

#[test]
fn test_fraction_plan_invariants() {
    let lending = LendingConfig::default();
    let calculator = FractionCalculator::new(6_400_000, &lending).expect("eligible");

    for value in calculator.range().values() {
        let plan = calculator.plan(value);
        assert!(plan.fragment_value <= calculator.max_fragment_value());
        assert_eq!(plan.remaining_value, 6_400_000 - plan.fragment_value);
        assert_eq!(
            plan.fragment_count,
            (plan.fragment_value as f64 / 1_000_000.0 * 50.0).floor() as u64
        );
        if plan.fragment_count == 0 {
            assert_eq!(plan.value_per_fragment, 0.0);
        } else {
            let issued = plan.fragment_count as f64 * plan.value_per_fragment;
            assert!((issued - plan.fragment_value as f64).abs() < 1e-6);
        }
    }
}

#[test]
fn test_configured_ltv_changes_the_cap() -> anyhow::Result<()> {
    let config = Config::from_toml_str(
        r#"
        [lending]
        loan_max_ltv = 0.5
        fraction_max_ltv = 0.5
        "#,
    )?;

    let loan = LoanCalculator::new(15_000_000, &config.lending)?;
    let fraction = FractionCalculator::new(6_400_000, &config.lending)?;
    assert_eq!(loan.max_principal(), 7_500_000);
    assert_eq!(fraction.max_fragment_value(), 3_200_000);

    Ok(())
}
