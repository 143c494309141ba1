//! Answer validation for the sentence-reordering mode.

use crate::games::ValidationResult;
use crate::text::{detokenize, normalize, tokenize, tokens_match};

use super::ReorderExercise;

/// Judge a learner's arrangement against an exercise.
///
/// The arrangement is joined into a sentence and compared case-insensitively
/// with the canonical sentence, then with each accepted alternative. A match
/// scores 100. Otherwise each position is compared with the canonical
/// tokenization for partial credit (`correct * 100 / total`, integer division)
/// and per-token flags for highlighting.
pub fn validate_reorder<S: AsRef<str>>(exercise: &ReorderExercise, placed: &[S]) -> ValidationResult {
    let canonical = tokenize(&exercise.sentence);
    let answer = normalize(&detokenize(placed));

    let accepted = std::iter::once(&exercise.sentence).chain(exercise.accepted_alternatives.iter());
    for candidate in accepted {
        if answer == normalize(candidate) {
            return ValidationResult {
                is_correct: true,
                score: 100,
                correct_count: canonical.len(),
                total_count: canonical.len(),
                token_results: vec![true; placed.len()],
                message: "Perfect!".to_string(),
            };
        }
    }

    let token_results: Vec<bool> = placed
        .iter()
        .enumerate()
        .map(|(i, token)| {
            canonical
                .get(i)
                .is_some_and(|expected| tokens_match(token.as_ref(), expected))
        })
        .collect();

    let total = canonical.len();
    let correct = token_results.iter().filter(|&&ok| ok).count();
    let score = if total == 0 {
        0
    } else {
        (correct * 100 / total) as u32
    };

    ValidationResult {
        is_correct: false,
        score,
        correct_count: correct,
        total_count: total,
        token_results,
        message: format!("{} of {} words in the right place", correct, total),
    }
}

/// Word indices that spell out the canonical sentence.
///
/// Each canonical token takes the first unused word that matches exactly,
/// falling back to a case-insensitive match. Words left over (inconsistent
/// content) are appended in scrambled order.
pub fn canonical_order(exercise: &ReorderExercise) -> Vec<usize> {
    let mut used = vec![false; exercise.words.len()];
    let mut order = Vec::with_capacity(exercise.words.len());

    for token in tokenize(&exercise.sentence) {
        let exact = (0..exercise.words.len()).find(|&i| !used[i] && exercise.words[i] == token);
        let found = exact.or_else(|| {
            (0..exercise.words.len()).find(|&i| !used[i] && tokens_match(&exercise.words[i], &token))
        });
        if let Some(i) = found {
            used[i] = true;
            order.push(i);
        }
    }

    order.extend((0..exercise.words.len()).filter(|&i| !used[i]));
    order
}
