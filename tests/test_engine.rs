//! Integration tests for the allocation engine.

use tokenomics::core::config::TokenomicsConfig;
use tokenomics::core::types::{AllocationInput, Evaluation, NearConstraint, RejectReason};
use tokenomics::engine::{derive, validate, AllocationEngine};

const TOLERANCE: f64 = 1e-9;

fn evaluate(team: f64, public: f64, funds: f64) -> Evaluation {
    let engine = AllocationEngine::default();
    let input = AllocationInput::new(team, public, funds).unwrap();
    engine.evaluate(&input).unwrap()
}

#[test]
fn test_default_sliders_break_fdv_rule() {
    let evaluation = evaluate(10.0, 70.0, 100_000.0);

    match evaluation {
        Evaluation::Invalid(outcome) => {
            assert!(!outcome.valid);
            assert_eq!(outcome.reason, Some(RejectReason::LpFdvBelowIcoFdv));
            assert_eq!(outcome.lp_percent, 20.0);
            assert_eq!(outcome.message(), "LP FDV would drop below ICO FDV");
        }
        Evaluation::Valid(_) => panic!("(10, 70) must be rejected"),
    }
}

#[test]
fn test_no_public_sale() {
    let evaluation = evaluate(0.0, 0.0, 100_000.0);
    let result = evaluation.result().expect("valid");

    assert_eq!(result.lp_percent, 100.0);
    assert_eq!(result.public_tokens, 0.0);
    assert_eq!(result.ico_price, 0.0);
    assert_eq!(result.fdv_ico, 0.0);
    assert_eq!(result.fdv_multiple, 0.0);
    assert_eq!(result.lp_tokens, 1e10);
    assert!((result.lp_price - 2e-6).abs() < 1e-18);
    assert!((result.fdv_lp - 20_000.0).abs() < 1e-6);
}

#[test]
fn test_lp_exactly_at_floor() {
    let evaluation = evaluate(10.0, 89.9, 1_000_000.0);
    let result = evaluation.result().expect("valid");

    assert!((result.lp_percent - 0.1).abs() < 1e-12);
    assert!((result.total_percent() - 100.0).abs() < TOLERANCE);
    assert!((result.lp_tokens - 10_000_000.0).abs() < 1e-3);
    assert!((result.lp_funds - 200_000.0).abs() < 1e-6);
    assert!(result.fdv_lp > result.fdv_ico);
}

#[test]
fn test_lp_zero_rejected() {
    let evaluation = evaluate(10.0, 90.0, 1_000_000.0);
    assert_eq!(evaluation.reason(), Some(RejectReason::LpZeroOrNegative));
    assert_eq!(evaluation.lp_percent(), 0.0);
    assert!(evaluation.result().is_none());
}

#[test]
fn test_free_functions_match_engine() {
    let engine = AllocationEngine::default();
    for (team, public) in [(10.0, 70.0), (0.0, 0.0), (10.0, 89.9), (16.0, 70.0), (30.0, 75.0)] {
        assert_eq!(validate(team, public), engine.validate(team, public));
    }

    let input = AllocationInput::new(16.0, 70.0, 250_000.0).unwrap();
    assert_eq!(derive(&input, 14.0), engine.derive(&input, 14.0));
}

#[test]
fn test_derive_is_idempotent() {
    let input = AllocationInput::new(20.0, 70.0, 1_500_000.0).unwrap();
    let outcome = validate(input.team_percent, input.public_percent);
    assert!(outcome.valid);

    let first = derive(&input, outcome.lp_percent);
    let second = derive(&input, outcome.lp_percent);
    assert_eq!(first, second);
}

#[test]
fn test_valid_allocation_keeps_lp_price_above_ico() {
    for team in 0..=30 {
        for public in 0..=100 {
            let outcome = validate(team as f64, public as f64);
            if outcome.valid && public > 0 {
                let input = AllocationInput::new(team as f64, public as f64, 500_000.0).unwrap();
                let result = derive(&input, outcome.lp_percent);
                assert!(
                    result.lp_price >= result.ico_price * (1.0 - 1e-12),
                    "team={team} public={public}"
                );
                assert!(result.fdv_multiple >= 1.0 - 1e-12);
            }
        }
    }
}

#[test]
fn test_proximity_through_engine() {
    let engine = AllocationEngine::default();

    let hint = engine.proximity(16.0, 70.0, 14.0);
    assert_eq!(hint.constraint, Some(NearConstraint::FdvParity));

    let hint = engine.proximity(10.0, 89.9, 0.1);
    assert_eq!(hint.constraint, Some(NearConstraint::LpFloor));

    let hint = engine.proximity(10.0, 85.0, 5.0);
    assert!(!hint.at_limit);
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config: TokenomicsConfig =
        serde_json::from_str(r#"{ "total_supply": 1000000000.0 }"#).unwrap();
    assert_eq!(config.total_supply, 1e9);
    assert_eq!(config.lp_fund_fraction, 0.2);
    assert_eq!(config.bounds.team_percent.max, 30.0);

    let engine = AllocationEngine::new(config).unwrap();
    let input = AllocationInput::new(0.0, 0.0, 100_000.0).unwrap();
    let result = engine.derive(&input, 100.0);
    assert_eq!(result.lp_tokens, 1e9);
    // FDV does not depend on the supply: fdv_lp = supply * lp_funds / (supply * lp%).
    assert!((result.fdv_lp - 20_000.0).abs() < 1e-6);
}

#[test]
fn test_evaluation_serializes() {
    let evaluation = evaluate(10.0, 70.0, 100_000.0);
    let json = serde_json::to_value(evaluation).unwrap();
    assert_eq!(json["Invalid"]["reason"], "LpFdvBelowIcoFdv");
    assert_eq!(json["Invalid"]["lp_percent"], 20.0);
}
