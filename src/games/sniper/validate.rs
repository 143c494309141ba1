//! Answer checking for the timed grammar-correction mode.

use crate::games::ValidationResult;
use crate::text::{normalize, similarity};

use super::SniperTarget;

/// Judge a learner's corrected sentence.
///
/// Sentences are compared in normalized form (re-tokenized, lowercased), so
/// spacing and case do not matter. A miss scores the best similarity to any
/// accepted correction, scaled to 0-100.
pub fn validate_correction(target: &SniperTarget, answer: &str) -> ValidationResult {
    let given = normalize(answer);
    let accepted: Vec<String> = std::iter::once(&target.correction)
        .chain(target.alternatives.iter())
        .map(|s| normalize(s))
        .collect();

    let explanation = target.explanation.clone().unwrap_or_default();

    if accepted.iter().any(|candidate| *candidate == given) {
        let message = if explanation.is_empty() {
            "Target neutralized.".to_string()
        } else {
            format!("Target neutralized. {}", explanation)
        };
        return ValidationResult::correct(1, message);
    }

    let best = accepted
        .iter()
        .map(|candidate| similarity(candidate, &given))
        .fold(0.0f64, f64::max);

    let mut message = format!("Missed. Correct: \"{}\"", target.correction);
    if !explanation.is_empty() {
        message.push(' ');
        message.push_str(&explanation);
    }

    ValidationResult {
        total_count: 1,
        ..ValidationResult::incorrect((best * 100.0) as u32, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> SniperTarget {
        let mut t = SniperTarget::new("t1", "He don't like it.", "He doesn't like it.")
            .with_alternative("He does not like it.");
        t.explanation = Some("Third person singular takes \"doesn't\".".to_string());
        t
    }

    #[test]
    fn test_exact_correction() {
        let result = validate_correction(&target(), "He doesn't like it.");
        assert!(result.is_correct);
        assert!(result.message.contains("Third person"));
    }

    #[test]
    fn test_spacing_and_case_ignored() {
        let result = validate_correction(&target(), "  he DOESN'T like it . ");
        assert!(result.is_correct);
    }

    #[test]
    fn test_alternative_accepted() {
        assert!(validate_correction(&target(), "He does not like it.").is_correct);
    }

    #[test]
    fn test_uncorrected_sentence_misses_with_partial_score() {
        let result = validate_correction(&target(), "He don't like it.");
        assert!(!result.is_correct);
        assert!(result.score > 50 && result.score < 100);
        assert!(result.message.starts_with("Missed."));
    }

    #[test]
    fn test_empty_answer_scores_zero() {
        let result = validate_correction(&target(), "");
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
    }
}
