use serde::{Deserialize, Serialize};

use super::model::AttributionMap;

/// Mortgage application as submitted by the borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub annual_income: f64,
    pub credit_score: u16,
    pub monthly_debt: f64,
    pub loan_amount: f64,
    pub property_value: f64,
    pub employment_status: EmploymentStatus,
}

impl Application {
    pub fn monthly_income(&self) -> f64 {
        self.annual_income / 12.0
    }
}

/// Employment categories accepted at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    SelfEmployed,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::SelfEmployed => "self-employed",
        }
    }
}

/// Final underwriting outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionState {
    Approved,
    Refer,
    Denied,
}

impl DecisionState {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionState::Approved => "approved",
            DecisionState::Refer => "refer",
            DecisionState::Denied => "denied",
        }
    }
}

/// Ratios derived once per application and shared by every rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSignals {
    pub loan_to_value: f64,
    pub debt_to_income: f64,
    pub down_payment: f64,
}

/// Output of the rule table: accumulated score plus the observations that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub risk_score: u32,
    pub reasons: Vec<String>,
    pub approval_factors: Vec<String>,
    pub signals: ScoreSignals,
}

/// Rule-derived half of the explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleRationale {
    DecisionLogic(String),
    ApprovalFactors(Vec<String>),
}

impl RuleRationale {
    pub fn summary(&self) -> String {
        match self {
            RuleRationale::DecisionLogic(logic) => logic.clone(),
            RuleRationale::ApprovalFactors(factors) if factors.is_empty() => {
                "no approval factors recorded".to_string()
            }
            RuleRationale::ApprovalFactors(factors) => factors.join(", "),
        }
    }
}

/// Model-derived half of the explanation. Values are embedded exactly as the collaborators
/// returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelExplanation {
    pub ml_default_probability: f64,
    pub ml_predicted_risk_class: u8,
    pub shap_explanation: AttributionMap,
    pub explanation_text: Vec<String>,
}

/// Explanation document. `rule_engine` is always present; the model fields are flattened
/// alongside it only when a model took part in the evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub rule_engine: RuleRationale,
    #[serde(flatten)]
    pub model: Option<ModelExplanation>,
}

/// Underwriting response returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub decision: DecisionState,
    pub risk_score: u32,
    pub reasons: Vec<String>,
    pub conditions: Vec<String>,
    pub explanation: Explanation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_risk_score: Option<f64>,
}
