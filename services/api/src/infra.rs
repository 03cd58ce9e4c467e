use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use underwriter::config::UnderwritingConfig;
use underwriter::error::AppError;
use underwriter::workflows::underwriting::{LogisticRiskModel, UnderwritingService};

pub(crate) type ModelBackedService = UnderwritingService<LogisticRiskModel, LogisticRiskModel>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the configured model parameters, falling back to the built-in reference model.
pub(crate) fn load_risk_model(config: &UnderwritingConfig) -> Result<LogisticRiskModel, AppError> {
    match &config.model_path {
        Some(path) => {
            let model = LogisticRiskModel::from_path(path)?;
            info!(path = %path.display(), "loaded risk model parameters");
            Ok(model)
        }
        None => Ok(LogisticRiskModel::reference()),
    }
}

/// The same model instance serves as predictor and explainer.
pub(crate) fn build_underwriting_service(
    config: &UnderwritingConfig,
) -> Result<ModelBackedService, AppError> {
    let model = Arc::new(load_risk_model(config)?);
    Ok(UnderwritingService::new(
        config.evaluation_config(),
        config.profile,
        model.clone(),
        model,
    ))
}
