use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreeningError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Model artifact error: {message}")]
    ModelArtifact { message: String },

    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("{message}")]
    InvalidRequest { message: String },

    #[error("Inference error: {message}")]
    Inference { message: String },
}

pub type Result<T> = std::result::Result<T, ScreeningError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 請求內容有誤，由呼叫端修正
    Client,
    /// 模型檔案或推論失敗
    Model,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScreeningError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScreeningError::InvalidRequest { .. } => ErrorCategory::Client,
            ScreeningError::ModelArtifact { .. }
            | ScreeningError::FeatureMismatch { .. }
            | ScreeningError::ModelNotLoaded
            | ScreeningError::Inference { .. } => ErrorCategory::Model,
            ScreeningError::ConfigError { .. }
            | ScreeningError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScreeningError::IoError(_) | ScreeningError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client => ErrorSeverity::Low,
            ErrorCategory::Model => match self {
                ScreeningError::Inference { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScreeningError::IoError(e) => format!("Could not read a required file: {}", e),
            ScreeningError::SerializationError(e) => format!("File is not valid JSON: {}", e),
            ScreeningError::ConfigError { message } => format!("Configuration problem: {}", message),
            ScreeningError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ScreeningError::ModelArtifact { message } => {
                format!("The model file could not be used: {}", message)
            }
            ScreeningError::FeatureMismatch { expected, actual } => format!(
                "The model expects {} features but {} were provided",
                expected, actual
            ),
            ScreeningError::ModelNotLoaded => "The screening model is not available".to_string(),
            ScreeningError::InvalidRequest { message } => message.clone(),
            ScreeningError::Inference { message } => {
                format!("The model could not score this questionnaire: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScreeningError::IoError(_) => "Check that the file path exists and is readable",
            ScreeningError::SerializationError(_) => {
                "Re-export the model artifact as JSON with coef, intercept and classes"
            }
            ScreeningError::ConfigError { .. }
            | ScreeningError::InvalidConfigValueError { .. } => {
                "Fix the command line arguments or the TOML configuration file"
            }
            ScreeningError::ModelArtifact { .. } => {
                "Make sure the artifact was exported from a fitted binary LogisticRegression"
            }
            ScreeningError::FeatureMismatch { .. } => {
                "Use the AQ-10 model trained on the ten A1-A10 answer features"
            }
            ScreeningError::ModelNotLoaded => "Restart the server with a valid --model path",
            ScreeningError::InvalidRequest { .. } => {
                "Send a JSON body of the form {\"responses\": {\"q1\": \"definitely-agree\", ...}}"
            }
            ScreeningError::Inference { .. } => "Check the server logs for the inference failure",
        }
    }
}
