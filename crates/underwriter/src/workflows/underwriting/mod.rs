//! Mortgage underwriting: validation, rule scoring, decision policy, and explanation.
//!
//! Data flows one way: an [`Application`] is validated, scored by the rule table, mapped
//! to a [`DecisionState`], and then optionally joined with risk model output before the
//! final [`Decision`] is assembled. Nothing is retained between calls.

pub mod batch;
pub mod domain;
pub mod engine;
pub mod evaluation;
pub mod explanation;
pub mod logistic;
pub mod model;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use batch::{BatchError, BatchSummary, BatchUnderwriter};
pub use domain::{
    Application, Decision, DecisionState, EmploymentStatus, Explanation, ModelExplanation,
    RuleRationale, ScoreResult, ScoreSignals,
};
pub use engine::{UnderwritingEngine, UnderwritingError};
pub use evaluation::{EvaluationConfig, EvaluationOutcome, PolicyOutcome};
pub use explanation::{ExplanationComposer, FeatureTextRegistry};
pub use logistic::{LogisticRiskModel, ModelLoadError};
pub use model::{
    AttributionExplainer, AttributionMap, ExplainerError, ModelFeatures, PredictorError,
    RiskPrediction, RiskPredictor,
};
pub use router::underwriting_router;
pub use service::{EvaluationProfile, UnderwritingService};
pub use validation::{ApplicationGuard, InvalidApplicationError};
