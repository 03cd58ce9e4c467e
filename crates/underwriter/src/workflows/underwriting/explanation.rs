//! Merges rule rationale with model output into one explanation document.

use std::collections::HashMap;

use super::domain::{Explanation, ModelExplanation};
use super::evaluation::{PolicyOutcome, DEFAULT_EXPLANATION_TOP_K};
use super::model::{AttributionMap, RiskPrediction};

/// Phrasing for model feature names. Features without an entry fall back to a generic
/// sentence naming the raw feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTextRegistry {
    sentences: HashMap<String, String>,
}

impl FeatureTextRegistry {
    pub fn empty() -> Self {
        Self {
            sentences: HashMap::new(),
        }
    }

    /// Sentences for the features emitted by the reference logistic model.
    pub fn standard() -> Self {
        Self::empty()
            .with("num__credit_score", "Credit score significantly affected risk.")
            .with(
                "num__monthly_debt",
                "Monthly debt level affected default probability.",
            )
            .with("num__monthly_income", "Income level affected risk.")
            .with("num__loan_amount", "Loan amount affected risk.")
            .with(
                "num__property_value",
                "Property value relative to the loan affected risk.",
            )
            .with(
                "cat__employment_status_unemployed",
                "Unemployment status affected risk.",
            )
            .with(
                "cat__employment_status_self-employed",
                "Self-employment status affected risk.",
            )
            .with(
                "cat__employment_status_employed",
                "Employment status affected risk.",
            )
    }

    pub fn with(mut self, feature: impl Into<String>, sentence: impl Into<String>) -> Self {
        self.register(feature, sentence);
        self
    }

    /// Register or replace the sentence for a feature, returning the previous one.
    pub fn register(
        &mut self,
        feature: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Option<String> {
        self.sentences.insert(feature.into(), sentence.into())
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.sentences.contains_key(feature)
    }

    pub fn sentence_for(&self, feature: &str) -> String {
        match self.sentences.get(feature) {
            Some(sentence) => sentence.clone(),
            None => format!("Feature {feature} had a significant impact on the decision."),
        }
    }
}

impl Default for FeatureTextRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builds explanation documents from policy output and collaborator results.
#[derive(Debug, Clone)]
pub struct ExplanationComposer {
    top_k: usize,
    registry: FeatureTextRegistry,
}

impl Default for ExplanationComposer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLANATION_TOP_K, FeatureTextRegistry::standard())
    }
}

impl ExplanationComposer {
    pub fn new(top_k: usize, registry: FeatureTextRegistry) -> Self {
        Self { top_k, registry }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn registry(&self) -> &FeatureTextRegistry {
        &self.registry
    }

    /// Top-k attributions by descending absolute impact. The sort is stable, so equal
    /// magnitudes keep the explainer's order.
    pub fn rank<'a>(&self, attributions: &'a AttributionMap) -> Vec<(&'a str, f64)> {
        let mut ranked: Vec<(&str, f64)> = attributions.iter().collect();
        ranked.sort_by(|(_, left), (_, right)| right.abs().total_cmp(&left.abs()));
        ranked.truncate(self.top_k);
        ranked
    }

    /// Human readable sentences for the top-ranked features. Empty when there is nothing
    /// to rank.
    pub fn summarize(&self, attributions: &AttributionMap) -> Vec<String> {
        self.rank(attributions)
            .into_iter()
            .map(|(feature, _)| self.registry.sentence_for(feature))
            .collect()
    }

    /// Explanation carrying only the rule-derived rationale.
    pub fn rules_only(&self, policy: &PolicyOutcome) -> Explanation {
        Explanation {
            rule_engine: policy.rationale.clone(),
            model: None,
        }
    }

    pub fn compose(
        &self,
        policy: &PolicyOutcome,
        prediction: RiskPrediction,
        attributions: AttributionMap,
    ) -> Explanation {
        let explanation_text = self.summarize(&attributions);
        Explanation {
            rule_engine: policy.rationale.clone(),
            model: Some(ModelExplanation {
                ml_default_probability: prediction.probability_of_default,
                ml_predicted_risk_class: prediction.predicted_class,
                shap_explanation: attributions,
                explanation_text,
            }),
        }
    }
}
