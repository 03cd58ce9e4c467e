use crate::workflows::underwriting::domain::{DecisionState, RuleRationale};
use crate::workflows::underwriting::evaluation::{decide, DENIAL_THRESHOLD, REFER_THRESHOLD};

#[test]
fn thresholds_are_inclusive() {
    assert_eq!(DecisionState::from_risk_score(0), DecisionState::Approved);
    assert_eq!(DecisionState::from_risk_score(24), DecisionState::Approved);
    assert_eq!(DecisionState::from_risk_score(25), DecisionState::Refer);
    assert_eq!(DecisionState::from_risk_score(49), DecisionState::Refer);
    assert_eq!(DecisionState::from_risk_score(50), DecisionState::Denied);
    assert_eq!(DecisionState::from_risk_score(115), DecisionState::Denied);
    assert_eq!(REFER_THRESHOLD, 25);
    assert_eq!(DENIAL_THRESHOLD, 50);
}

#[test]
fn denial_carries_logic_without_conditions() {
    let outcome = decide(50, &[]);

    assert_eq!(outcome.state, DecisionState::Denied);
    assert!(outcome.conditions.is_empty());
    assert_eq!(
        outcome.rationale,
        RuleRationale::DecisionLogic("Risk score exceeded denial threshold".to_string())
    );
}

#[test]
fn referral_requires_income_verification() {
    let outcome = decide(30, &["Stable employment".to_string()]);

    assert_eq!(outcome.state, DecisionState::Refer);
    assert_eq!(
        outcome.conditions,
        vec!["verify income and employment status"]
    );
    assert_eq!(
        outcome.rationale,
        RuleRationale::DecisionLogic("Moderate risk score - manual review required".to_string())
    );
    assert!(outcome.summary().contains("verify income"));
}

#[test]
fn approval_rationale_lists_accumulated_factors() {
    let factors = vec![
        "Strong credit score".to_string(),
        "Stable employment".to_string(),
    ];
    let outcome = decide(10, &factors);

    assert_eq!(outcome.state, DecisionState::Approved);
    assert!(outcome.conditions.is_empty());
    assert_eq!(outcome.rationale, RuleRationale::ApprovalFactors(factors));
    assert_eq!(
        outcome.summary(),
        "approved: Strong credit score, Stable employment"
    );
}

#[test]
fn rationale_serializes_under_its_variant_key() {
    let logic = RuleRationale::DecisionLogic("Risk score exceeded denial threshold".to_string());
    let factors = RuleRationale::ApprovalFactors(vec!["Strong credit score".to_string()]);

    assert_eq!(
        serde_json::to_value(&logic).expect("serializes"),
        serde_json::json!({ "decision_logic": "Risk score exceeded denial threshold" })
    );
    assert_eq!(
        serde_json::to_value(&factors).expect("serializes"),
        serde_json::json!({ "approval_factors": ["Strong credit score"] })
    );
}
