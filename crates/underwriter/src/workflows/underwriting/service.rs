use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{Application, Decision};
use super::engine::{UnderwritingEngine, UnderwritingError};
use super::evaluation::EvaluationConfig;
use super::model::{AttributionExplainer, RiskPredictor};

/// Orchestration mode. Both profiles produce the same decision, score, and reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationProfile {
    #[serde(rename = "rules_only")]
    RulesOnly,
    #[serde(rename = "rules_ml")]
    RulesWithModel,
}

impl EvaluationProfile {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationProfile::RulesOnly => "rules_only",
            EvaluationProfile::RulesWithModel => "rules_ml",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rules_only" | "rules-only" | "rules" => Some(Self::RulesOnly),
            "rules_ml" | "rules-ml" | "ml" => Some(Self::RulesWithModel),
            _ => None,
        }
    }
}

impl fmt::Display for EvaluationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Service pairing the engine with host-provided model collaborators.
pub struct UnderwritingService<P, E> {
    engine: Arc<UnderwritingEngine>,
    profile: EvaluationProfile,
    predictor: Arc<P>,
    explainer: Arc<E>,
}

impl<P, E> UnderwritingService<P, E>
where
    P: RiskPredictor + 'static,
    E: AttributionExplainer + 'static,
{
    pub fn new(
        config: EvaluationConfig,
        profile: EvaluationProfile,
        predictor: Arc<P>,
        explainer: Arc<E>,
    ) -> Self {
        Self::with_engine(
            Arc::new(UnderwritingEngine::new(config)),
            profile,
            predictor,
            explainer,
        )
    }

    pub fn with_engine(
        engine: Arc<UnderwritingEngine>,
        profile: EvaluationProfile,
        predictor: Arc<P>,
        explainer: Arc<E>,
    ) -> Self {
        Self {
            engine,
            profile,
            predictor,
            explainer,
        }
    }

    pub fn profile(&self) -> EvaluationProfile {
        self.profile
    }

    pub fn engine(&self) -> &UnderwritingEngine {
        &self.engine
    }

    /// Underwrite with the configured profile.
    pub fn underwrite(&self, application: &Application) -> Result<Decision, UnderwritingError> {
        self.underwrite_with(application, self.profile)
    }

    /// Underwrite with an explicit profile, e.g. when a caller degrades to rules only.
    pub fn underwrite_with(
        &self,
        application: &Application,
        profile: EvaluationProfile,
    ) -> Result<Decision, UnderwritingError> {
        let result = match profile {
            EvaluationProfile::RulesOnly => self.engine.evaluate_rules_only(application),
            EvaluationProfile::RulesWithModel => self.engine.evaluate(
                application,
                self.predictor.as_ref(),
                self.explainer.as_ref(),
            ),
        };

        match &result {
            Ok(decision) => info!(
                %profile,
                decision = decision.decision.label(),
                risk_score = decision.risk_score,
                ml_default_probability = decision.ml_risk_score,
                "application underwritten"
            ),
            Err(UnderwritingError::InvalidApplication(error)) => {
                warn!(%profile, %error, "application rejected by validation")
            }
            Err(error) => warn!(%profile, %error, "risk model collaborator failed"),
        }

        result
    }
}
