//! Reference risk model: standardized numeric features plus one-hot employment status
//! feeding a logistic regression.
//!
//! Attributions are exact for a linear model: each feature contributes
//! `weight * (x - background)` in log-odds space, measured against a fixed background
//! applicant. Contributions therefore sum to `logit(x) - logit(background)`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::EmploymentStatus;
use super::model::{
    AttributionExplainer, AttributionMap, ExplainerError, ModelFeatures, PredictorError,
    RiskPrediction, RiskPredictor,
};

/// Numeric inputs of the model feature row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericFeature {
    CreditScore,
    LoanAmount,
    PropertyValue,
    MonthlyIncome,
    MonthlyDebt,
}

impl NumericFeature {
    pub const fn name(self) -> &'static str {
        match self {
            NumericFeature::CreditScore => "credit_score",
            NumericFeature::LoanAmount => "loan_amount",
            NumericFeature::PropertyValue => "property_value",
            NumericFeature::MonthlyIncome => "monthly_income",
            NumericFeature::MonthlyDebt => "monthly_debt",
        }
    }

    fn value(self, features: &ModelFeatures) -> f64 {
        match self {
            NumericFeature::CreditScore => features.credit_score,
            NumericFeature::LoanAmount => features.loan_amount,
            NumericFeature::PropertyValue => features.property_value,
            NumericFeature::MonthlyIncome => features.monthly_income,
            NumericFeature::MonthlyDebt => features.monthly_debt,
        }
    }
}

/// Standard-scaled numeric term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub feature: NumericFeature,
    pub mean: f64,
    pub scale: f64,
    pub weight: f64,
}

impl NumericTerm {
    fn standardized(&self, features: &ModelFeatures) -> f64 {
        (self.feature.value(features) - self.mean) / self.scale
    }
}

/// One-hot weights for employment status, in encoder category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentWeights {
    pub employed: f64,
    pub self_employed: f64,
    pub unemployed: f64,
}

impl EmploymentWeights {
    const CATEGORIES: [EmploymentStatus; 3] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
    ];

    fn weight(&self, status: EmploymentStatus) -> f64 {
        match status {
            EmploymentStatus::Employed => self.employed,
            EmploymentStatus::SelfEmployed => self.self_employed,
            EmploymentStatus::Unemployed => self.unemployed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model parameters: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model parameters: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scale for '{feature}' must be a positive finite number")]
    InvalidScale { feature: &'static str },
    #[error("model parameter '{parameter}' must be finite")]
    NonFinite { parameter: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRiskModel {
    pub intercept: f64,
    pub numeric: Vec<NumericTerm>,
    pub employment: EmploymentWeights,
    pub background: ModelFeatures,
}

impl LogisticRiskModel {
    /// Built-in parameters fitted on the synthetic underwriting population; used when the
    /// host does not supply its own.
    pub fn reference() -> Self {
        Self {
            intercept: -0.35,
            numeric: vec![
                NumericTerm {
                    feature: NumericFeature::CreditScore,
                    mean: 575.0,
                    scale: 159.0,
                    weight: -1.42,
                },
                NumericTerm {
                    feature: NumericFeature::LoanAmount,
                    mean: 350_000.0,
                    scale: 86_600.0,
                    weight: 0.61,
                },
                NumericTerm {
                    feature: NumericFeature::PropertyValue,
                    mean: 1_375_000.0,
                    scale: 580_000.0,
                    weight: -1.08,
                },
                NumericTerm {
                    feature: NumericFeature::MonthlyIncome,
                    mean: 7_500.0,
                    scale: 1_443.0,
                    weight: -0.47,
                },
                NumericTerm {
                    feature: NumericFeature::MonthlyDebt,
                    mean: 25_000.0,
                    scale: 14_434.0,
                    weight: 2.18,
                },
            ],
            employment: EmploymentWeights {
                employed: -0.92,
                self_employed: 0.05,
                unemployed: 0.87,
            },
            background: ModelFeatures {
                credit_score: 700.0,
                loan_amount: 250_000.0,
                property_value: 400_000.0,
                monthly_income: 6_000.0,
                monthly_debt: 1_200.0,
                employment_status: EmploymentStatus::Employed,
            },
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModelLoadError> {
        let model: Self = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ModelLoadError> {
        let finite = |parameter: &str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ModelLoadError::NonFinite {
                    parameter: parameter.to_string(),
                })
            }
        };

        finite("intercept", self.intercept)?;
        for term in &self.numeric {
            if !(term.scale.is_finite() && term.scale > 0.0) {
                return Err(ModelLoadError::InvalidScale {
                    feature: term.feature.name(),
                });
            }
            finite(term.feature.name(), term.mean)?;
            finite(term.feature.name(), term.weight)?;
        }
        finite("employment.employed", self.employment.employed)?;
        finite("employment.self_employed", self.employment.self_employed)?;
        finite("employment.unemployed", self.employment.unemployed)
    }

    /// Log-odds of default for a feature row.
    pub fn logit(&self, features: &ModelFeatures) -> f64 {
        let numeric: f64 = self
            .numeric
            .iter()
            .map(|term| term.weight * term.standardized(features))
            .sum();
        self.intercept + numeric + self.employment.weight(features.employment_status)
    }
}

impl Default for LogisticRiskModel {
    fn default() -> Self {
        Self::reference()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Folds `-0.0` into `0.0` so unchanged features serialise without a sign.
fn unsigned_zero(value: f64) -> f64 {
    value + 0.0
}

impl RiskPredictor for LogisticRiskModel {
    fn predict(&self, features: &ModelFeatures) -> Result<RiskPrediction, PredictorError> {
        let z = self.logit(features);
        if !z.is_finite() {
            return Err(PredictorError::Unavailable(
                "model produced a non-finite log-odds".to_string(),
            ));
        }

        Ok(RiskPrediction {
            predicted_class: u8::from(z > 0.0),
            probability_of_default: sigmoid(z),
        })
    }
}

impl AttributionExplainer for LogisticRiskModel {
    fn explain(&self, features: &ModelFeatures) -> Result<AttributionMap, ExplainerError> {
        let mut attributions = AttributionMap::new();

        for term in &self.numeric {
            let delta = term.standardized(features) - term.standardized(&self.background);
            attributions.insert(
                format!("num__{}", term.feature.name()),
                unsigned_zero(term.weight * delta),
            );
        }

        for category in EmploymentWeights::CATEGORIES {
            let active = f64::from(u8::from(features.employment_status == category));
            let baseline = f64::from(u8::from(self.background.employment_status == category));
            attributions.insert(
                format!("cat__employment_status_{}", category.label()),
                unsigned_zero(self.employment.weight(category) * (active - baseline)),
            );
        }

        attributions.check_finite()?;
        Ok(attributions)
    }
}
