//! Answer judgments shared by all modes.
//!
//! Validators produce a [`ValidationResult`]; the host wraps it in a
//! "validated" or "submit" event. An external grader's verdict converts into
//! the same shape, so reducers treat both sources identically.

use serde::{Deserialize, Serialize};

/// Outcome of judging one submitted answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationResult {
    /// Whether the answer is accepted.
    pub is_correct: bool,
    /// Score from 0 to 100.
    pub score: u32,
    /// Tokens in the right place (reordering) or 1/0 for typed answers.
    pub correct_count: usize,
    /// Tokens or items judged.
    pub total_count: usize,
    /// Per-token correctness, aligned with the learner's answer.
    pub token_results: Vec<bool>,
    /// Feedback for the learner.
    pub message: String,
}

impl ValidationResult {
    /// A fully correct result.
    pub fn correct(count: usize, message: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            score: 100,
            correct_count: count,
            total_count: count,
            token_results: vec![true; count],
            message: message.into(),
        }
    }

    /// An incorrect result with partial credit.
    pub fn incorrect(score: u32, message: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            score: score.min(100),
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Verdict from an external answer-grading service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraderVerdict {
    /// Whether the grader accepts the answer.
    pub is_valid: bool,
    /// Quality score from 0 to 100.
    pub quality: u32,
    /// Feedback text.
    #[serde(default)]
    pub feedback: String,
}

impl From<GraderVerdict> for ValidationResult {
    fn from(verdict: GraderVerdict) -> Self {
        let count = usize::from(verdict.is_valid);
        Self {
            is_correct: verdict.is_valid,
            score: verdict.quality.min(100),
            correct_count: count,
            total_count: 1,
            token_results: Vec::new(),
            message: verdict.feedback,
        }
    }
}
