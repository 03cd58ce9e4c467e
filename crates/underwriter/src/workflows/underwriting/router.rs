use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::Application;
use super::engine::UnderwritingError;
use super::model::{AttributionExplainer, RiskPredictor};
use super::service::UnderwritingService;

/// Router exposing the underwriting endpoint at both its legacy and versioned paths.
pub fn underwriting_router<P, E>(service: Arc<UnderwritingService<P, E>>) -> Router
where
    P: RiskPredictor + 'static,
    E: AttributionExplainer + 'static,
{
    Router::new()
        .route("/underwrite", post(underwrite_handler::<P, E>))
        .route("/api/v1/underwrite", post(underwrite_handler::<P, E>))
        .with_state(service)
}

pub(crate) async fn underwrite_handler<P, E>(
    State(service): State<Arc<UnderwritingService<P, E>>>,
    axum::Json(application): axum::Json<Application>,
) -> Response
where
    P: RiskPredictor + 'static,
    E: AttributionExplainer + 'static,
{
    match service.underwrite(&application) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(UnderwritingError::InvalidApplication(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
