use crate::workflows::underwriting::domain::RuleRationale;
use crate::workflows::underwriting::evaluation::decide;
use crate::workflows::underwriting::explanation::{ExplanationComposer, FeatureTextRegistry};
use crate::workflows::underwriting::model::{AttributionMap, RiskPrediction};

fn map(entries: &[(&str, f64)]) -> AttributionMap {
    entries.iter().map(|(name, impact)| (*name, *impact)).collect()
}

#[test]
fn ranks_by_descending_absolute_impact() {
    let composer = ExplanationComposer::new(3, FeatureTextRegistry::empty());
    let attributions = map(&[("a", -0.9), ("b", 0.05), ("c", 0.3), ("d", -0.2)]);

    let ranked: Vec<&str> = composer
        .rank(&attributions)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    assert_eq!(ranked, vec!["a", "c", "d"]);
}

#[test]
fn equal_magnitudes_keep_explainer_order() {
    let composer = ExplanationComposer::new(2, FeatureTextRegistry::empty());
    let attributions = map(&[("first", 0.1), ("second", -0.4), ("third", 0.4)]);

    let ranked = composer.rank(&attributions);

    assert_eq!(ranked, vec![("second", -0.4), ("third", 0.4)]);
}

#[test]
fn top_k_larger_than_map_returns_everything() {
    let composer = ExplanationComposer::new(10, FeatureTextRegistry::empty());
    let attributions = map(&[("x", 0.2), ("y", 0.7)]);

    assert_eq!(composer.rank(&attributions).len(), 2);
}

#[test]
fn empty_attributions_produce_empty_summary() {
    let composer = ExplanationComposer::default();

    assert!(composer.summarize(&AttributionMap::new()).is_empty());
}

#[test]
fn registered_features_use_their_sentence_and_others_fall_back() {
    let composer = ExplanationComposer::default();
    let attributions = map(&[
        ("num__credit_score", 1.1),
        ("num__years_at_address", -0.8),
        ("cat__employment_status_employed", -0.3),
    ]);

    let sentences = composer.summarize(&attributions);

    assert_eq!(
        sentences,
        vec![
            "Credit score significantly affected risk.",
            "Feature num__years_at_address had a significant impact on the decision.",
            "Employment status affected risk.",
        ]
    );
}

#[test]
fn registry_accepts_new_features_without_engine_changes() {
    let mut registry = FeatureTextRegistry::standard();
    assert!(!registry.contains("num__reserves_months"));

    let previous = registry.register("num__reserves_months", "Thin cash reserves increased risk.");
    assert!(previous.is_none());
    assert_eq!(
        registry.sentence_for("num__reserves_months"),
        "Thin cash reserves increased risk."
    );

    let replaced = registry.register("num__loan_amount", "Large loan amount increased risk.");
    assert_eq!(replaced.as_deref(), Some("Loan amount affected risk."));
}

#[test]
fn standard_sentences_do_not_claim_a_direction() {
    let registry = FeatureTextRegistry::standard();
    let features = [
        "num__credit_score",
        "num__monthly_debt",
        "num__monthly_income",
        "num__loan_amount",
        "num__property_value",
        "cat__employment_status_unemployed",
        "cat__employment_status_self-employed",
        "cat__employment_status_employed",
    ];

    for feature in features {
        assert!(registry.contains(feature), "{feature} registered");
        let sentence = registry.sentence_for(feature).to_lowercase();
        for word in ["increased", "reduced", "low ", "lower", "high ", "stable"] {
            assert!(
                !sentence.contains(word),
                "{feature} sentence implies a direction: {sentence}"
            );
        }
    }
}

#[test]
fn compose_keeps_rule_and_model_fields_apart() {
    let composer = ExplanationComposer::default();
    let policy = decide(60, &[]);
    let prediction = RiskPrediction {
        predicted_class: 1,
        probability_of_default: 0.734,
    };
    let attributions = map(&[("num__monthly_debt", 0.5), ("num__credit_score", 0.9)]);

    let explanation = composer.compose(&policy, prediction, attributions.clone());

    assert_eq!(
        explanation.rule_engine,
        RuleRationale::DecisionLogic("Risk score exceeded denial threshold".to_string())
    );
    let model = explanation.model.expect("model fields attached");
    assert_eq!(model.ml_default_probability, 0.734);
    assert_eq!(model.ml_predicted_risk_class, 1);
    assert_eq!(model.shap_explanation, attributions);
    assert_eq!(
        model.explanation_text,
        vec![
            "Credit score significantly affected risk.",
            "Monthly debt level affected default probability.",
        ]
    );
}

#[test]
fn rules_only_explanation_has_no_model_fields() {
    let composer = ExplanationComposer::default();
    let policy = decide(0, &["Strong credit score".to_string()]);

    let explanation = composer.rules_only(&policy);

    assert!(explanation.model.is_none());
    let json = serde_json::to_value(&explanation).expect("serializes");
    assert_eq!(
        json,
        serde_json::json!({ "rule_engine": { "approval_factors": ["Strong credit score"] } })
    );
}
