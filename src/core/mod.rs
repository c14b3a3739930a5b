pub mod interpretation;
pub mod scoring;
pub mod screening;

pub use crate::domain::model::{
    Answer, Aq10Score, ClassProbabilities, FeatureVector, InterpretationSummary, PredictedClass,
    PredictionResult, QuestionnaireResponse, ScreeningReport,
};
pub use crate::domain::ports::{Classifier, ConfigProvider};
pub use crate::utils::error::Result;
