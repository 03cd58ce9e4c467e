use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::underwriting::domain::{Application, EmploymentStatus};
use crate::workflows::underwriting::model::{
    AttributionExplainer, AttributionMap, ExplainerError, ModelFeatures, PredictorError,
    RiskPrediction, RiskPredictor,
};
use crate::workflows::underwriting::{
    underwriting_router, EvaluationConfig, EvaluationProfile, UnderwritingEngine,
    UnderwritingService,
};

pub(super) fn application(
    credit_score: u16,
    loan_amount: f64,
    property_value: f64,
    annual_income: f64,
    monthly_debt: f64,
    employment_status: EmploymentStatus,
) -> Application {
    Application {
        annual_income,
        credit_score,
        monthly_debt,
        loan_amount,
        property_value,
        employment_status,
    }
}

/// Subprime, highly leveraged, unemployed borrower scoring 115.
pub(super) fn high_risk_application() -> Application {
    application(
        550,
        900_000.0,
        1_000_000.0,
        60_000.0,
        3_000.0,
        EmploymentStatus::Unemployed,
    )
}

/// Prime borrower with a large down payment scoring 0.
pub(super) fn prime_application() -> Application {
    application(
        750,
        400_000.0,
        600_000.0,
        120_000.0,
        1_000.0,
        EmploymentStatus::Employed,
    )
}

/// Mid-tier credit with a thin down payment: 20 + 10 = 30.
pub(super) fn referral_application() -> Application {
    application(
        650,
        70_000.0,
        88_000.0,
        90_000.0,
        1_500.0,
        EmploymentStatus::Employed,
    )
}

pub(super) fn engine() -> UnderwritingEngine {
    UnderwritingEngine::new(EvaluationConfig::default())
}

pub(super) fn sample_attributions() -> AttributionMap {
    vec![
        ("num__credit_score", 1.25),
        ("num__loan_amount", 0.1),
        ("num__monthly_debt", -0.6),
        ("cat__employment_status_unemployed", 0.9),
    ]
    .into_iter()
    .collect()
}

/// Predictor returning a fixed prediction and counting invocations.
#[derive(Default)]
pub(super) struct StubPredictor {
    pub(super) prediction: Option<RiskPrediction>,
    pub(super) calls: AtomicUsize,
}

impl StubPredictor {
    pub(super) fn returning(predicted_class: u8, probability_of_default: f64) -> Self {
        Self {
            prediction: Some(RiskPrediction {
                predicted_class,
                probability_of_default,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RiskPredictor for StubPredictor {
    fn predict(&self, _features: &ModelFeatures) -> Result<RiskPrediction, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prediction
            .ok_or_else(|| PredictorError::Unavailable("model offline".to_string()))
    }
}

/// Explainer returning a fixed attribution map, or failing when none is configured.
#[derive(Default)]
pub(super) struct StubExplainer {
    pub(super) attributions: Option<AttributionMap>,
}

impl StubExplainer {
    pub(super) fn returning(attributions: AttributionMap) -> Self {
        Self {
            attributions: Some(attributions),
        }
    }
}

impl AttributionExplainer for StubExplainer {
    fn explain(&self, _features: &ModelFeatures) -> Result<AttributionMap, ExplainerError> {
        self.attributions
            .clone()
            .ok_or_else(|| ExplainerError::Unavailable("explainer offline".to_string()))
    }
}

pub(super) fn build_service(
    profile: EvaluationProfile,
    predictor: StubPredictor,
    explainer: StubExplainer,
) -> UnderwritingService<StubPredictor, StubExplainer> {
    UnderwritingService::new(
        EvaluationConfig::default(),
        profile,
        Arc::new(predictor),
        Arc::new(explainer),
    )
}

pub(super) fn default_service(
    profile: EvaluationProfile,
) -> UnderwritingService<StubPredictor, StubExplainer> {
    build_service(
        profile,
        StubPredictor::returning(1, 0.82),
        StubExplainer::returning(sample_attributions()),
    )
}

pub(super) fn router_with_service(
    service: UnderwritingService<StubPredictor, StubExplainer>,
) -> axum::Router {
    underwriting_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
