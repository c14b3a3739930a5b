use serde::{Deserialize, Serialize};

/// Number of AQ-10 items, and therefore the length of every feature vector.
pub const QUESTION_COUNT: usize = 10;

/// A single questionnaire answer.
///
/// Labels outside the four-point scale, non-string values and missing
/// answers all become [`Answer::Unscored`], which never contributes to the
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Answer {
    DefinitelyAgree,
    SlightlyAgree,
    SlightlyDisagree,
    DefinitelyDisagree,
    #[default]
    Unscored,
}

impl Answer {
    pub fn from_label(label: &str) -> Self {
        match label {
            "definitely-agree" => Answer::DefinitelyAgree,
            "slightly-agree" => Answer::SlightlyAgree,
            "slightly-disagree" => Answer::SlightlyDisagree,
            "definitely-disagree" => Answer::DefinitelyDisagree,
            _ => Answer::Unscored,
        }
    }

    pub fn from_value(value: &serde_json::Value) -> Self {
        value.as_str().map(Answer::from_label).unwrap_or_default()
    }

    pub fn is_agree(self) -> bool {
        matches!(self, Answer::DefinitelyAgree | Answer::SlightlyAgree)
    }

    pub fn is_disagree(self) -> bool {
        matches!(self, Answer::DefinitelyDisagree | Answer::SlightlyDisagree)
    }
}

/// Answers to the ten AQ-10 items, indexed by question number minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestionnaireResponse {
    answers: [Answer; QUESTION_COUNT],
}

impl QuestionnaireResponse {
    pub fn new(answers: [Answer; QUESTION_COUNT]) -> Self {
        Self { answers }
    }

    /// Builds a response from the raw `{"q1": "...", ...}` mapping.
    /// Keys other than `q1`..`q10` are ignored.
    pub fn from_map(raw: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut answers = [Answer::Unscored; QUESTION_COUNT];
        for (index, answer) in answers.iter_mut().enumerate() {
            if let Some(value) = raw.get(&question_key(index + 1)) {
                *answer = Answer::from_value(value);
            }
        }
        Self { answers }
    }

    /// `question` is 1-based, as on the questionnaire.
    pub fn answer(&self, question: usize) -> Answer {
        question
            .checked_sub(1)
            .and_then(|index| self.answers.get(index))
            .copied()
            .unwrap_or_default()
    }

    pub fn answers(&self) -> &[Answer; QUESTION_COUNT] {
        &self.answers
    }
}

pub fn question_key(question: usize) -> String {
    format!("q{}", question)
}

/// Fixed-order binary encoding of the ten answers; position `i` is question `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([u8; QUESTION_COUNT]);

impl FeatureVector {
    pub fn from_flags(flags: [bool; QUESTION_COUNT]) -> Self {
        Self(flags.map(u8::from))
    }

    pub fn values(&self) -> &[u8; QUESTION_COUNT] {
        &self.0
    }

    pub fn sum(&self) -> u8 {
        self.0.iter().sum()
    }

    pub fn iter_f64(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|&value| f64::from(value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Traditional AQ-10 point score in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aq10Score(u8);

impl Aq10Score {
    /// Standard AQ-10 referral cutoff.
    pub const REFERRAL_THRESHOLD: u8 = 6;

    pub fn new(value: u8) -> Self {
        Self(value.min(QUESTION_COUNT as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_high_likelihood(self) -> bool {
        self.0 >= Self::REFERRAL_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictedClass {
    Negative,
    Positive,
}

impl PredictedClass {
    pub fn label(self) -> u8 {
        match self {
            PredictedClass::Negative => 0,
            PredictedClass::Positive => 1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == PredictedClass::Positive
    }
}

impl Serialize for PredictedClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub no_autism: f64,
    pub autism: f64,
}

impl ClassProbabilities {
    pub fn from_positive(autism: f64) -> Self {
        Self {
            no_autism: 1.0 - autism,
            autism,
        }
    }

    pub fn max(&self) -> f64 {
        self.no_autism.max(self.autism)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: PredictedClass,
    pub probabilities: ClassProbabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretationSummary {
    pub aq10_interpretation: &'static str,
    pub aq10_threshold: &'static str,
    pub model_interpretation: &'static str,
    pub confidence: String,
    pub agreement: &'static str,
}

/// Payload returned by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningReport {
    pub aq10_score: Aq10Score,
    pub model_prediction: PredictedClass,
    pub model_probabilities: ClassProbabilities,
    pub feature_vector: FeatureVector,
    pub interpretation: InterpretationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_labels() {
        assert_eq!(Answer::from_label("definitely-agree"), Answer::DefinitelyAgree);
        assert_eq!(Answer::from_label("slightly-agree"), Answer::SlightlyAgree);
        assert_eq!(Answer::from_label("slightly-disagree"), Answer::SlightlyDisagree);
        assert_eq!(Answer::from_label("definitely-disagree"), Answer::DefinitelyDisagree);
        assert_eq!(Answer::from_label("Definitely-Agree"), Answer::Unscored);
        assert_eq!(Answer::from_label(""), Answer::Unscored);
        assert_eq!(Answer::from_value(&json!(1)), Answer::Unscored);
        assert_eq!(Answer::from_value(&json!(null)), Answer::Unscored);
    }

    #[test]
    fn test_response_ignores_unknown_keys() {
        let raw = json!({"q1": "slightly-agree", "q11": "definitely-agree", "name": "x"});
        let response = QuestionnaireResponse::from_map(raw.as_object().unwrap());

        assert_eq!(response.answer(1), Answer::SlightlyAgree);
        assert_eq!(response.answer(2), Answer::Unscored);
        assert_eq!(response.answer(0), Answer::Unscored);
        assert_eq!(response.answer(11), Answer::Unscored);
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = ScreeningReport {
            aq10_score: Aq10Score::new(3),
            model_prediction: PredictedClass::Negative,
            model_probabilities: ClassProbabilities::from_positive(0.25),
            feature_vector: FeatureVector::from_flags([
                true, false, true, false, false, false, true, false, false, false,
            ]),
            interpretation: InterpretationSummary {
                aq10_interpretation: "Low likelihood",
                aq10_threshold: "6 or above suggests referral for assessment",
                model_interpretation: "Negative screening",
                confidence: "75.0%".to_string(),
                agreement: "Results agree",
            },
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["aq10_score"], json!(3));
        assert_eq!(value["model_prediction"], json!(0));
        assert_eq!(value["model_probabilities"]["autism"], json!(0.25));
        assert_eq!(value["feature_vector"], json!([1, 0, 1, 0, 0, 0, 1, 0, 0, 0]));
        assert_eq!(value["interpretation"]["confidence"], json!("75.0%"));
    }
}
