use serde::{Deserialize, Serialize};

use super::super::domain::{DecisionState, RuleRationale};

/// Scores at or above this value are referred for manual review.
pub const REFER_THRESHOLD: u32 = 25;
/// Scores at or above this value are denied.
pub const DENIAL_THRESHOLD: u32 = 50;

const DENIAL_LOGIC: &str = "Risk score exceeded denial threshold";
const REFER_LOGIC: &str = "Moderate risk score - manual review required";
const REFER_CONDITION: &str = "verify income and employment status";

impl DecisionState {
    /// Threshold mapping; both boundaries are inclusive on the riskier side.
    pub const fn from_risk_score(risk_score: u32) -> Self {
        if risk_score >= DENIAL_THRESHOLD {
            DecisionState::Denied
        } else if risk_score >= REFER_THRESHOLD {
            DecisionState::Refer
        } else {
            DecisionState::Approved
        }
    }
}

/// Decision state plus the metadata attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyOutcome {
    pub state: DecisionState,
    pub conditions: Vec<String>,
    pub rationale: RuleRationale,
}

impl PolicyOutcome {
    pub fn summary(&self) -> String {
        if self.conditions.is_empty() {
            format!("{}: {}", self.state.label(), self.rationale.summary())
        } else {
            format!(
                "{}: {} (conditions: {})",
                self.state.label(),
                self.rationale.summary(),
                self.conditions.join(", ")
            )
        }
    }
}

pub(crate) fn decide_outcome(risk_score: u32, approval_factors: &[String]) -> PolicyOutcome {
    match DecisionState::from_risk_score(risk_score) {
        DecisionState::Denied => PolicyOutcome {
            state: DecisionState::Denied,
            conditions: Vec::new(),
            rationale: RuleRationale::DecisionLogic(DENIAL_LOGIC.to_string()),
        },
        DecisionState::Refer => PolicyOutcome {
            state: DecisionState::Refer,
            conditions: vec![REFER_CONDITION.to_string()],
            rationale: RuleRationale::DecisionLogic(REFER_LOGIC.to_string()),
        },
        DecisionState::Approved => PolicyOutcome {
            state: DecisionState::Approved,
            conditions: Vec::new(),
            rationale: RuleRationale::ApprovalFactors(approval_factors.to_vec()),
        },
    }
}
