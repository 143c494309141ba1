//! Answer checking for the fill-in-the-blank drill.
//!
//! Pass/fail is plain string equality after trimming, case-insensitive unless
//! strict mode is on. Similarity only feeds the "almost" feedback.

use crate::games::ValidationResult;
use crate::text::similarity;

use super::BlankQuestion;

/// Default similarity at which a wrong answer counts as a near miss.
pub const DEFAULT_NEAR_MISS_THRESHOLD: f64 = 0.8;

/// Compare an expected answer with a given one.
///
/// Both sides are trimmed. Strict mode compares case-sensitively.
pub fn answers_match(expected: &str, given: &str, strict: bool) -> bool {
    let expected = expected.trim();
    let given = given.trim();
    if strict {
        expected == given
    } else {
        expected.to_lowercase() == given.to_lowercase()
    }
}

/// Whether `given` matches any accepted answer for the question.
pub fn check_answer(question: &BlankQuestion, given: &str, strict: bool) -> bool {
    question
        .accepted_answers()
        .any(|expected| answers_match(expected, given, strict))
}

/// Whether a wrong answer is close enough to deserve "almost" feedback.
pub fn is_near_miss(expected: &str, given: &str, threshold: f64) -> bool {
    if given.trim().is_empty() {
        return false;
    }
    similarity(expected, given) >= threshold
}

/// Full judgment of a typed answer, with feedback text.
///
/// The score is 100 for an accepted answer, otherwise the best similarity to
/// any accepted answer scaled to 0-100.
pub fn validate_blank(
    question: &BlankQuestion,
    given: &str,
    strict: bool,
    near_miss_threshold: f64,
) -> ValidationResult {
    if check_answer(question, given, strict) {
        return ValidationResult::correct(1, "Correct!");
    }

    let best = question
        .accepted_answers()
        .map(|expected| similarity(expected, given))
        .fold(0.0f64, f64::max);
    let score = (best * 100.0) as u32;

    let message = if question
        .accepted_answers()
        .any(|expected| is_near_miss(expected, given, near_miss_threshold))
    {
        format!("Almost! The answer is \"{}\".", question.answer)
    } else {
        format!("The answer is \"{}\".", question.answer)
    };

    ValidationResult {
        total_count: 1,
        ..ValidationResult::incorrect(score, message)
    }
}
