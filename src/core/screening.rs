use std::sync::Arc;

use crate::core::interpretation::interpret;
use crate::core::scoring::{score_from_vector, to_feature_vector};
use crate::domain::model::{
    FeatureVector, PredictionResult, QuestionnaireResponse, ScreeningReport,
};
use crate::domain::ports::Classifier;
use crate::utils::error::{Result, ScreeningError};

/// Runs one questionnaire through scoring, the classifier and interpretation.
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct ScreeningEngine {
    classifier: Arc<dyn Classifier>,
}

impl ScreeningEngine {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn screen(&self, responses: &QuestionnaireResponse) -> Result<ScreeningReport> {
        let feature_vector = to_feature_vector(responses);
        let aq10_score = score_from_vector(&feature_vector);

        let prediction = self.predict(&feature_vector)?;
        tracing::debug!(
            "Screened questionnaire: aq10_score={}, model_prediction={}, autism_probability={:.3}",
            aq10_score.value(),
            prediction.label.label(),
            prediction.probabilities.autism
        );

        Ok(ScreeningReport {
            aq10_score,
            model_prediction: prediction.label,
            model_probabilities: prediction.probabilities,
            feature_vector,
            interpretation: interpret(aq10_score, prediction.label, &prediction.probabilities),
        })
    }

    fn predict(&self, feature_vector: &FeatureVector) -> Result<PredictionResult> {
        let label = self
            .classifier
            .predict(feature_vector)
            .map_err(into_inference_error)?;
        let probabilities = self
            .classifier
            .predict_proba(feature_vector)
            .map_err(into_inference_error)?;

        Ok(PredictionResult {
            label,
            probabilities,
        })
    }
}

fn into_inference_error(err: ScreeningError) -> ScreeningError {
    match err {
        ScreeningError::Inference { .. } => err,
        other => ScreeningError::Inference {
            message: other.to_string(),
        },
    }
}
