use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::model::{ClassProbabilities, FeatureVector, PredictedClass, QUESTION_COUNT};
use crate::domain::ports::Classifier;
use crate::utils::error::{Result, ScreeningError};

/// JSON export of a fitted binary `LogisticRegression`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default = "default_classes")]
    pub classes: Vec<u8>,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
}

fn default_model_type() -> String {
    "LogisticRegression".to_string()
}

fn default_classes() -> Vec<u8> {
    vec![0, 1]
}

impl ModelArtifact {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(content)?;
        artifact.check_shape()?;
        Ok(artifact)
    }

    /// Coefficients of the single decision function.
    pub fn coefficients(&self) -> &[f64] {
        self.coef.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn intercept(&self) -> f64 {
        self.intercept.first().copied().unwrap_or_default()
    }

    pub fn feature_count(&self) -> usize {
        self.coefficients().len()
    }

    /// `(classes[0], classes[1])`; `classes[1]` is the class the sigmoid scores.
    pub fn class_order(&self) -> Result<(PredictedClass, PredictedClass)> {
        match self.classes.as_slice() {
            [0, 1] => Ok((PredictedClass::Negative, PredictedClass::Positive)),
            [1, 0] => Ok((PredictedClass::Positive, PredictedClass::Negative)),
            other => Err(ScreeningError::ModelArtifact {
                message: format!("expected classes [0, 1] or [1, 0], found {:?}", other),
            }),
        }
    }

    fn check_shape(&self) -> Result<()> {
        let artifact_error = |message: String| ScreeningError::ModelArtifact { message };

        if self.coef.len() != 1 {
            return Err(artifact_error(format!(
                "expected one coefficient row for a binary model, found {}",
                self.coef.len()
            )));
        }
        if self.coefficients().is_empty() {
            return Err(artifact_error("coefficient row is empty".to_string()));
        }
        if self.intercept.len() != 1 {
            return Err(artifact_error(format!(
                "expected one intercept, found {}",
                self.intercept.len()
            )));
        }
        self.class_order()?;
        if let Some(names) = &self.feature_names_in {
            if names.len() != self.feature_count() {
                return Err(ScreeningError::FeatureMismatch {
                    expected: self.feature_count(),
                    actual: names.len(),
                });
            }
        }
        Ok(())
    }
}

/// Reads a JSON array of feature names, e.g. `["A1_Score", ..., "A10_Score"]`.
pub fn load_feature_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(&path)?;
    let names: Vec<String> = serde_json::from_str(&content)?;
    Ok(names)
}

/// Feature names as reported by `inspect-model`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureNames {
    /// Read from a separate `--features` file.
    FromFile(Vec<String>),
    /// `feature_names_in` saved inside the artifact.
    Stored(Vec<String>),
    NotStored { count: usize },
}

impl FeatureNames {
    /// A features file takes precedence over names stored in the artifact.
    pub fn resolve(artifact: &ModelArtifact, features_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = features_path {
            return Ok(FeatureNames::FromFile(load_feature_names(path)?));
        }
        Ok(match &artifact.feature_names_in {
            Some(names) => FeatureNames::Stored(names.clone()),
            None => FeatureNames::NotStored {
                count: artifact.feature_count(),
            },
        })
    }

    pub fn names(&self) -> Option<&[String]> {
        match self {
            FeatureNames::FromFile(names) | FeatureNames::Stored(names) => Some(names),
            FeatureNames::NotStored { .. } => None,
        }
    }
}

impl std::fmt::Display for FeatureNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureNames::FromFile(names) | FeatureNames::Stored(names) => {
                write!(f, "Feature names: {:?}", names)
            }
            FeatureNames::NotStored { count } => {
                writeln!(f, "Feature names not stored in model")?;
                write!(f, "Number of features: {}", count)
            }
        }
    }
}

/// Logistic regression over the AQ-10 feature vector.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    model_type: String,
    weights: [f64; QUESTION_COUNT],
    bias: f64,
    negative_class: PredictedClass,
    positive_class: PredictedClass,
    feature_names: Option<Vec<String>>,
}

impl LogisticModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.check_shape()?;

        let weights: [f64; QUESTION_COUNT] =
            artifact.coefficients().try_into().map_err(|_| {
                ScreeningError::FeatureMismatch {
                    expected: QUESTION_COUNT,
                    actual: artifact.feature_count(),
                }
            })?;

        let (negative_class, positive_class) = artifact.class_order()?;

        Ok(Self {
            model_type: artifact.model_type.clone(),
            weights,
            bias: artifact.intercept(),
            negative_class,
            positive_class,
            feature_names: artifact.feature_names_in,
        })
    }

    /// 載入模型，並可選擇搭配獨立的特徵名稱檔
    pub fn load<P: AsRef<Path>>(model_path: P, features_path: Option<&Path>) -> Result<Self> {
        let mut model = Self::from_artifact(ModelArtifact::from_file(model_path)?)?;

        if let Some(path) = features_path {
            let names = load_feature_names(path)?;
            if names.len() != QUESTION_COUNT {
                return Err(ScreeningError::FeatureMismatch {
                    expected: QUESTION_COUNT,
                    actual: names.len(),
                });
            }
            model.feature_names = Some(names);
        }

        Ok(model)
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.bias
            + self
                .weights
                .iter()
                .zip(features.iter_f64())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<PredictedClass> {
        let decision = self.decision_function(features);
        if !decision.is_finite() {
            return Err(ScreeningError::Inference {
                message: format!("decision function is not finite: {}", decision),
            });
        }
        Ok(if decision > 0.0 {
            self.positive_class
        } else {
            self.negative_class
        })
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        let positive = sigmoid(self.decision_function(features));
        if positive.is_nan() {
            return Err(ScreeningError::Inference {
                message: "probability is NaN".to_string(),
            });
        }
        // classes[1] 的機率對應 sigmoid 輸出
        Ok(match self.positive_class {
            PredictedClass::Positive => ClassProbabilities::from_positive(positive),
            PredictedClass::Negative => ClassProbabilities::from_positive(1.0 - positive),
        })
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
