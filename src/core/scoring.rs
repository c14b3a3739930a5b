use crate::domain::model::{
    Answer, Aq10Score, FeatureVector, QuestionnaireResponse, QUESTION_COUNT,
};

/// Which side of the four-point scale earns the point for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringDirection {
    Agree,
    Disagree,
}

impl ScoringDirection {
    pub fn scores(self, answer: Answer) -> bool {
        match self {
            ScoringDirection::Agree => answer.is_agree(),
            ScoringDirection::Disagree => answer.is_disagree(),
        }
    }
}

/// Scoring key for questions 1..=10 in order.
/// Items 1, 7, 8 and 10 score on agreement; 2, 3, 4, 5, 6 and 9 on disagreement.
pub const SCORING_KEY: [ScoringDirection; QUESTION_COUNT] = [
    ScoringDirection::Agree,    // q1
    ScoringDirection::Disagree, // q2
    ScoringDirection::Disagree, // q3
    ScoringDirection::Disagree, // q4
    ScoringDirection::Disagree, // q5
    ScoringDirection::Disagree, // q6
    ScoringDirection::Agree,    // q7
    ScoringDirection::Agree,    // q8
    ScoringDirection::Disagree, // q9
    ScoringDirection::Agree,    // q10
];

pub fn to_feature_vector(responses: &QuestionnaireResponse) -> FeatureVector {
    let mut flags = [false; QUESTION_COUNT];
    for ((flag, direction), answer) in flags
        .iter_mut()
        .zip(SCORING_KEY.iter())
        .zip(responses.answers().iter())
    {
        *flag = direction.scores(*answer);
    }
    FeatureVector::from_flags(flags)
}

/// Always equal to the sum of [`to_feature_vector`], since it is computed from it.
pub fn calculate_score(responses: &QuestionnaireResponse) -> Aq10Score {
    score_from_vector(&to_feature_vector(responses))
}

pub fn score_from_vector(vector: &FeatureVector) -> Aq10Score {
    Aq10Score::new(vector.sum())
}
