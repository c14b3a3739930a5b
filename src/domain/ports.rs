use crate::domain::model::{ClassProbabilities, FeatureVector, PredictedClass};
use crate::utils::error::Result;

/// Opaque access to a trained binary classifier.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<PredictedClass>;
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities>;

    /// Human-readable model family, e.g. `LogisticRegression`.
    fn model_type(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn model_path(&self) -> &str;
    fn features_path(&self) -> Option<&str>;
    /// Empty slice means any origin.
    fn cors_origins(&self) -> &[String];
    fn log_format(&self) -> LogFormat;

    fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }
}
