use crate::config::{DEFAULT_FEATURES_PATH, DEFAULT_HOST, DEFAULT_MODEL_PATH, DEFAULT_PORT};
use crate::domain::ports::{ConfigProvider, LogFormat};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "aq10-server")]
#[command(about = "HTTP API for AQ-10 autism screening with a pre-trained classifier")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path to the JSON model artifact
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model: String,

    /// Path to the JSON feature-name list; pass an empty value to skip
    #[arg(long, default_value = DEFAULT_FEATURES_PATH)]
    pub features: String,

    /// Allowed CORS origins; any origin when empty
    #[arg(long, value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn model_path(&self) -> &str {
        &self.model
    }

    fn features_path(&self) -> Option<&str> {
        if self.features.is_empty() {
            None
        } else {
            Some(&self.features)
        }
    }

    fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    fn log_format(&self) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::config::ServerSettings::from_provider(self).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["aq10-server"]);
        assert_eq!(config.bind_address(), "0.0.0.0:5001");
        assert_eq!(config.model_path(), DEFAULT_MODEL_PATH);
        assert_eq!(config.features_path(), Some(DEFAULT_FEATURES_PATH));
        assert!(config.cors_origins().is_empty());
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "aq10-server",
            "--port",
            "8080",
            "--model",
            "models/example_lr_adult_aq10.json",
            "--features",
            "",
            "--cors-origins",
            "http://localhost:5500,http://127.0.0.1:5500",
            "--json-logs",
        ]);
        assert_eq!(config.port(), 8080);
        assert_eq!(config.features_path(), None);
        assert_eq!(config.cors_origins().len(), 2);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }
}
