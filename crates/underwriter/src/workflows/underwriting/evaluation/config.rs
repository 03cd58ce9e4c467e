use serde::{Deserialize, Serialize};

/// Number of attribution entries summarized when no override is configured.
pub const DEFAULT_EXPLANATION_TOP_K: usize = 3;

/// Tunables for an evaluation. Score thresholds are fixed by policy and are not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub explanation_top_k: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            explanation_top_k: DEFAULT_EXPLANATION_TOP_K,
        }
    }
}
