use crate::domain::model::{Aq10Score, ClassProbabilities, InterpretationSummary, PredictedClass};

pub const HIGH_LIKELIHOOD: &str = "High likelihood";
pub const LOW_LIKELIHOOD: &str = "Low likelihood";
pub const THRESHOLD_NOTE: &str = "6 or above suggests referral for assessment";
pub const POSITIVE_SCREENING: &str = "Positive screening";
pub const NEGATIVE_SCREENING: &str = "Negative screening";
pub const RESULTS_AGREE: &str = "Results agree";
pub const RESULTS_DIFFER: &str = "Results differ";

pub fn interpret(
    score: Aq10Score,
    label: PredictedClass,
    probabilities: &ClassProbabilities,
) -> InterpretationSummary {
    let high = score.is_high_likelihood();
    let positive = label.is_positive();

    InterpretationSummary {
        aq10_interpretation: if high { HIGH_LIKELIHOOD } else { LOW_LIKELIHOOD },
        aq10_threshold: THRESHOLD_NOTE,
        model_interpretation: if positive {
            POSITIVE_SCREENING
        } else {
            NEGATIVE_SCREENING
        },
        confidence: format_confidence(probabilities),
        agreement: if high == positive {
            RESULTS_AGREE
        } else {
            RESULTS_DIFFER
        },
    }
}

/// Larger of the two class probabilities as a percentage, one decimal place.
pub fn format_confidence(probabilities: &ClassProbabilities) -> String {
    format!("{:.1}%", probabilities.max() * 100.0)
}
