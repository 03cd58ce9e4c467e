use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::underwriting::evaluation::{EvaluationConfig, DEFAULT_EXPLANATION_TOP_K};
use crate::workflows::underwriting::EvaluationProfile;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the underwriting service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub underwriting: UnderwritingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            underwriting: UnderwritingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Engine profile, explanation depth, and optional model parameter file.
#[derive(Debug, Clone)]
pub struct UnderwritingConfig {
    pub profile: EvaluationProfile,
    pub explanation_top_k: usize,
    pub model_path: Option<PathBuf>,
}

impl UnderwritingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let profile = match env::var("UNDERWRITING_PROFILE") {
            Ok(raw) => {
                EvaluationProfile::parse(&raw).ok_or(ConfigError::InvalidProfile { value: raw })?
            }
            Err(_) => EvaluationProfile::RulesWithModel,
        };

        let explanation_top_k = match env::var("UNDERWRITING_TOP_K") {
            Ok(raw) => {
                let parsed = raw.trim().parse::<usize>();
                match parsed {
                    Ok(value) if value > 0 => value,
                    _ => return Err(ConfigError::InvalidTopK { value: raw }),
                }
            }
            Err(_) => DEFAULT_EXPLANATION_TOP_K,
        };

        let model_path = env::var("UNDERWRITING_MODEL_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            profile,
            explanation_top_k,
            model_path,
        })
    }

    pub fn evaluation_config(&self) -> EvaluationConfig {
        EvaluationConfig {
            explanation_top_k: self.explanation_top_k,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("UNDERWRITING_PROFILE must be 'rules_only' or 'rules_ml' (found '{value}')")]
    InvalidProfile { value: String },
    #[error("UNDERWRITING_TOP_K must be a positive integer (found '{value}')")]
    InvalidTopK { value: String },
}
