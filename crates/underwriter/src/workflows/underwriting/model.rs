//! Boundary with the probabilistic risk model.
//!
//! The engine only ever sees a `(class, probability)` pair and a feature attribution map.
//! Whatever produces them (a local linear model, a remote scoring service, a test stub)
//! is wired in by the host through [`RiskPredictor`] and [`AttributionExplainer`].

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::domain::{Application, EmploymentStatus};

/// Feature row handed to the risk model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFeatures {
    pub credit_score: f64,
    pub loan_amount: f64,
    pub property_value: f64,
    pub monthly_income: f64,
    pub monthly_debt: f64,
    pub employment_status: EmploymentStatus,
}

impl From<&Application> for ModelFeatures {
    fn from(application: &Application) -> Self {
        Self {
            credit_score: f64::from(application.credit_score),
            loan_amount: application.loan_amount,
            property_value: application.property_value,
            monthly_income: application.monthly_income(),
            monthly_debt: application.monthly_debt,
            employment_status: application.employment_status,
        }
    }
}

/// Predicted default class and probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub predicted_class: u8,
    pub probability_of_default: f64,
}

impl RiskPrediction {
    /// Reject predictions outside the binary class / unit interval contract.
    pub fn validated(self) -> Result<Self, PredictorError> {
        if self.predicted_class > 1 {
            return Err(PredictorError::InvalidClass(self.predicted_class));
        }
        if !(0.0..=1.0).contains(&self.probability_of_default) {
            return Err(PredictorError::ProbabilityOutOfRange(
                self.probability_of_default,
            ));
        }
        Ok(self)
    }
}

/// Capability producing a default-risk prediction for one feature row.
pub trait RiskPredictor: Send + Sync {
    fn predict(&self, features: &ModelFeatures) -> Result<RiskPrediction, PredictorError>;
}

/// Capability producing signed per-feature contributions for one feature row.
pub trait AttributionExplainer: Send + Sync {
    fn explain(&self, features: &ModelFeatures) -> Result<AttributionMap, ExplainerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("risk predictor unavailable: {0}")]
    Unavailable(String),
    #[error("risk predictor returned class {0}, expected 0 or 1")]
    InvalidClass(u8),
    #[error("risk predictor returned probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum ExplainerError {
    #[error("attribution explainer unavailable: {0}")]
    Unavailable(String),
    #[error("attribution explainer returned a non-finite impact for '{feature}'")]
    NonFiniteImpact { feature: String },
}

/// Feature name to signed impact, kept in the order the explainer produced it.
///
/// Insertion order is part of the contract: ranking ties are resolved by it and the map
/// serializes as a JSON object in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributionMap {
    entries: Vec<(String, f64)>,
}

impl AttributionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an impact. Overwriting keeps the original position.
    pub fn insert(&mut self, feature: impl Into<String>, impact: f64) -> Option<f64> {
        let feature = feature.into();
        match self.entries.iter_mut().find(|(name, _)| *name == feature) {
            Some((_, existing)) => Some(std::mem::replace(existing, impact)),
            None => {
                self.entries.push((feature, impact));
                None
            }
        }
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == feature)
            .map(|(_, impact)| *impact)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|(name, impact)| (name.as_str(), *impact))
    }

    pub(crate) fn check_finite(&self) -> Result<(), ExplainerError> {
        match self.iter().find(|(_, impact)| !impact.is_finite()) {
            Some((feature, _)) => Err(ExplainerError::NonFiniteImpact {
                feature: feature.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for AttributionMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = AttributionMap::new();
        for (feature, impact) in iter {
            map.insert(feature, impact);
        }
        map
    }
}

impl Serialize for AttributionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (feature, impact) in &self.entries {
            map.serialize_entry(feature, impact)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributionVisitor;

        impl<'de> Visitor<'de> for AttributionVisitor {
            type Value = AttributionMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature names to numeric impacts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AttributionMap::new();
                while let Some((feature, impact)) = access.next_entry::<String, f64>()? {
                    map.insert(feature, impact);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AttributionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribution_map_keeps_insertion_order_on_overwrite() {
        let mut map = AttributionMap::new();
        map.insert("b", 1.0);
        map.insert("a", 2.0);
        assert_eq!(map.insert("b", 3.0), Some(1.0));

        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(3.0));
    }

    #[test]
    fn attribution_map_serializes_in_insertion_order() {
        let map: AttributionMap = vec![("zeta", 0.5), ("alpha", -0.25)].into_iter().collect();
        let json = serde_json::to_string(&map).expect("serializes");
        assert_eq!(json, r#"{"zeta":0.5,"alpha":-0.25}"#);

        let parsed: AttributionMap = serde_json::from_str(&json).expect("parses");
        assert_eq!(parsed, map);
    }

    #[test]
    fn prediction_validation_rejects_out_of_range_values() {
        let bad_class = RiskPrediction {
            predicted_class: 2,
            probability_of_default: 0.4,
        };
        assert!(matches!(
            bad_class.validated(),
            Err(PredictorError::InvalidClass(2))
        ));

        let bad_probability = RiskPrediction {
            predicted_class: 1,
            probability_of_default: 1.2,
        };
        assert!(matches!(
            bad_probability.validated(),
            Err(PredictorError::ProbabilityOutOfRange(_))
        ));

        let nan_probability = RiskPrediction {
            predicted_class: 0,
            probability_of_default: f64::NAN,
        };
        assert!(nan_probability.validated().is_err());
    }
}
