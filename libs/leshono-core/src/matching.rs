//! Answer matching and exercise grading.

use crate::normalize::normalize;
use crate::types::Exercise;
use serde::{Deserialize, Serialize};

/// Label shown for a true statement.
pub const TRUE_LABEL: &str = "šrolo";
/// Label shown for a false statement.
pub const FALSE_LABEL: &str = "ġalṭo";

/// Whether `input` matches `expected` or any alternate after normalization.
pub fn matches<S: AsRef<str>>(input: &str, expected: &str, alternates: &[S]) -> bool {
    let typed = normalize(input);
    if typed == normalize(expected) {
        return true;
    }
    alternates
        .iter()
        .any(|alternate| normalize(alternate.as_ref()) == typed)
}

/// Result of comparing a typed answer to the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Compare a typed answer and keep the normalized forms for feedback.
pub fn compare_answers<S: AsRef<str>>(
    input: &str,
    expected: &str,
    alternates: &[S],
) -> MatchResult {
    MatchResult {
        is_correct: matches(input, expected, alternates),
        typed_normalized: normalize(input),
        expected_normalized: normalize(expected),
    }
}

/// A learner's response to one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExerciseResponse {
    /// Chosen option of a select exercise.
    Choice(String),
    /// True/false judgement.
    Boolean(bool),
    /// Typed text for type and fill exercises.
    Text(String),
    /// Tokens picked from an arrange word bank, in order.
    Tokens(Vec<String>),
    /// One attempted pairing of a match exercise.
    Pair { left: String, right: String },
}

/// Outcome of grading a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    /// Answer to show after a miss. Empty for match exercises.
    pub expected: String,
    /// Normalized forms for typed and arranged answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<MatchResult>,
}

/// Grade a response against an exercise.
///
/// A response of the wrong shape for the exercise is incorrect.
pub fn grade(exercise: &Exercise, response: &ExerciseResponse) -> Verdict {
    let mut comparison = None;
    let correct = match (exercise, response) {
        (
            Exercise::Select {
                answer, alternates, ..
            },
            ExerciseResponse::Choice(choice),
        ) => choice == answer || matches(choice, answer, alternates),
        (Exercise::TrueFalse { answer, .. }, ExerciseResponse::Boolean(value)) => value == answer,
        (
            Exercise::Type {
                answer, alternates, ..
            }
            | Exercise::Fill {
                answer, alternates, ..
            },
            ExerciseResponse::Text(text),
        ) => {
            let result = compare_answers(text, answer, alternates);
            let correct = result.is_correct;
            comparison = Some(result);
            correct
        }
        (
            Exercise::Arrange {
                answer, alternates, ..
            },
            ExerciseResponse::Tokens(tokens),
        ) => {
            let result = compare_answers(&tokens.join(" "), answer, alternates);
            let correct = !tokens.is_empty() && result.is_correct;
            comparison = Some(result);
            correct
        }
        (Exercise::Match { pairs }, ExerciseResponse::Pair { left, right }) => pairs
            .iter()
            .any(|(l, r)| l == left && r == right),
        _ => false,
    };

    Verdict {
        correct,
        expected: expected_answer(exercise),
        comparison,
    }
}

/// Display form of an exercise's answer.
pub fn expected_answer(exercise: &Exercise) -> String {
    match exercise {
        Exercise::Match { .. } => String::new(),
        Exercise::TrueFalse { answer, .. } => {
            let label = if *answer { TRUE_LABEL } else { FALSE_LABEL };
            label.to_string()
        }
        Exercise::Select { answer, .. }
        | Exercise::Type { answer, .. }
        | Exercise::Fill { answer, .. }
        | Exercise::Arrange { answer, .. } => answer.clone(),
    }
}
