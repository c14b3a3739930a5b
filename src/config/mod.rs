#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::domain::ports::{ConfigProvider, LogFormat};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_origin, validate_path, validate_range, Validate,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MODEL_PATH: &str = "tuned_lr_adult_aq10.json";
pub const DEFAULT_FEATURES_PATH: &str = "adult_features_aq10.json";

/// Server settings after the CLI or TOML source has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub features_path: Option<String>,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl ServerSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            host: config.host().to_string(),
            port: config.port(),
            model_path: config.model_path().to_string(),
            features_path: config.features_path().map(str::to_string),
            cors_origins: config.cors_origins().to_vec(),
            log_format: config.log_format(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            features_path: Some(DEFAULT_FEATURES_PATH.to_string()),
            cors_origins: Vec::new(),
            log_format: LogFormat::Compact,
        }
    }
}

impl ConfigProvider for ServerSettings {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn features_path(&self) -> Option<&str> {
        self.features_path.as_deref()
    }

    fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_range("server.port", self.port, 1, u16::MAX)?;
        validate_path("model.path", &self.model_path)?;
        if let Some(features_path) = &self.features_path {
            validate_path("model.features_path", features_path)?;
        }
        for origin in &self.cors_origins {
            validate_origin("cors.allowed_origins", origin.trim())?;
        }
        Ok(())
    }
}
