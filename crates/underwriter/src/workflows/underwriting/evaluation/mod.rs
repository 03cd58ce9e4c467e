mod config;
mod policy;
mod rules;

pub use config::{EvaluationConfig, DEFAULT_EXPLANATION_TOP_K};
pub use policy::{PolicyOutcome, DENIAL_THRESHOLD, REFER_THRESHOLD};

use super::domain::{Application, ScoreResult};
use serde::{Deserialize, Serialize};

/// Run the rule table against an application. Total over validated input.
pub fn score(application: &Application) -> ScoreResult {
    rules::score_application(application)
}

/// Map a risk score onto a decision; approval factors become the approved rationale.
pub fn decide(risk_score: u32, approval_factors: &[String]) -> PolicyOutcome {
    policy::decide_outcome(risk_score, approval_factors)
}

/// Rule score and the policy decision derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub score: ScoreResult,
    pub policy: PolicyOutcome,
}

impl EvaluationOutcome {
    pub fn from_application(application: &Application) -> Self {
        let score = score(application);
        let policy = decide(score.risk_score, &score.approval_factors);
        Self { score, policy }
    }
}
