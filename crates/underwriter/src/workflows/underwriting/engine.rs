use tracing::debug;

use super::domain::{Application, Decision, Explanation};
use super::evaluation::{EvaluationConfig, EvaluationOutcome};
use super::explanation::{ExplanationComposer, FeatureTextRegistry};
use super::model::{
    AttributionExplainer, ExplainerError, ModelFeatures, PredictorError, RiskPredictor,
};
use super::validation::{ApplicationGuard, InvalidApplicationError};

/// Errors surfaced by an evaluation. No decision is produced when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingError {
    #[error(transparent)]
    InvalidApplication(#[from] InvalidApplicationError),
    #[error(transparent)]
    Predictor(#[from] PredictorError),
    #[error(transparent)]
    Explainer(#[from] ExplainerError),
}

/// Stateless entry point composing validation, rule scoring, policy, and explanation.
///
/// The decision state and risk score always come from the rules. Model output is attached
/// to the explanation and never consulted when choosing the decision.
#[derive(Debug, Clone, Default)]
pub struct UnderwritingEngine {
    guard: ApplicationGuard,
    composer: ExplanationComposer,
}

impl UnderwritingEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_composer(ExplanationComposer::new(
            config.explanation_top_k,
            FeatureTextRegistry::standard(),
        ))
    }

    pub fn with_composer(composer: ExplanationComposer) -> Self {
        Self {
            guard: ApplicationGuard,
            composer,
        }
    }

    pub fn composer(&self) -> &ExplanationComposer {
        &self.composer
    }

    /// Validate then score. Rejected applications are never partially scored.
    pub fn assess(
        &self,
        application: &Application,
    ) -> Result<EvaluationOutcome, InvalidApplicationError> {
        self.guard.validate(application)?;
        let outcome = EvaluationOutcome::from_application(application);
        debug!(
            risk_score = outcome.score.risk_score,
            decision = outcome.policy.state.label(),
            loan_to_value = outcome.score.signals.loan_to_value,
            debt_to_income = outcome.score.signals.debt_to_income,
            "application scored"
        );
        Ok(outcome)
    }

    /// Rules-only profile: the explanation carries the rule rationale alone.
    pub fn evaluate_rules_only(
        &self,
        application: &Application,
    ) -> Result<Decision, UnderwritingError> {
        let outcome = self.assess(application)?;
        let explanation = self.composer.rules_only(&outcome.policy);
        Ok(build_decision(outcome, explanation, None))
    }

    /// Rules plus model profile. Collaborator failures propagate unchanged.
    pub fn evaluate<P, E>(
        &self,
        application: &Application,
        predictor: &P,
        explainer: &E,
    ) -> Result<Decision, UnderwritingError>
    where
        P: RiskPredictor + ?Sized,
        E: AttributionExplainer + ?Sized,
    {
        let outcome = self.assess(application)?;
        let features = ModelFeatures::from(application);

        let prediction = predictor.predict(&features)?.validated()?;
        let attributions = explainer.explain(&features)?;
        attributions.check_finite()?;

        let explanation = self
            .composer
            .compose(&outcome.policy, prediction, attributions);
        Ok(build_decision(
            outcome,
            explanation,
            Some(prediction.probability_of_default),
        ))
    }
}

fn build_decision(
    outcome: EvaluationOutcome,
    explanation: Explanation,
    ml_risk_score: Option<f64>,
) -> Decision {
    let EvaluationOutcome { score, policy } = outcome;
    Decision {
        decision: policy.state,
        risk_score: score.risk_score,
        reasons: score.reasons,
        conditions: policy.conditions,
        explanation,
        ml_risk_score,
    }
}
