//! State and event types for the sentence-reordering mode.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::economy::{DrillRank, ProficiencyLevel};
use crate::games::ValidationResult;
use crate::text::is_punctuation;

/// A sentence to rebuild from scrambled tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReorderExercise {
    /// Content identifier.
    pub id: String,
    /// The canonical sentence, e.g. `"I often go to the park."`.
    pub sentence: String,
    /// The sentence's tokens in scrambled order, punctuation included.
    pub words: Vec<String>,
    /// Other word orders that are also accepted.
    #[serde(default)]
    pub accepted_alternatives: Vec<String>,
    /// Content tier.
    #[serde(default)]
    pub level: ProficiencyLevel,
    /// Optional translation shown as a prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl ReorderExercise {
    /// Create an exercise from a sentence and its scrambled tokens.
    pub fn new(id: impl Into<String>, sentence: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            id: id.into(),
            sentence: sentence.into(),
            words,
            accepted_alternatives: Vec::new(),
            level: ProficiencyLevel::default(),
            translation: None,
        }
    }

    /// Add an accepted alternative ordering.
    pub fn with_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.accepted_alternatives.push(alternative.into());
        self
    }

    /// Set the content tier.
    pub fn with_level(mut self, level: ProficiencyLevel) -> Self {
        self.level = level;
        self
    }

    /// Number of word tokens, punctuation excluded.
    pub fn word_count(&self) -> usize {
        self.words.iter().filter(|w| !is_punctuation(w)).count()
    }
}

/// Phase of a reordering session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReorderPhase {
    /// Session created, exercise not yet shown.
    #[default]
    Setup,
    /// Learner is arranging words.
    Playing,
    /// Answer submitted, waiting for the host's validation.
    Validating,
    /// Validation result is shown.
    Feedback,
    /// Session over.
    Finished,
}

/// End-of-session summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReorderSummary {
    /// Questions answered correctly on the first try without a hint.
    pub score: u32,
    /// Questions in the session.
    pub total_questions: u32,
    /// `score / total_questions`.
    pub accuracy: f64,
    /// Experience earned over the session.
    pub xp_earned: u32,
    /// Rank derived from accuracy.
    pub rank: DrillRank,
}

/// Snapshot of a sentence-reordering session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReorderState {
    /// Current phase.
    pub phase: ReorderPhase,
    /// Exercises in this session, in play order.
    pub exercises: Vec<ReorderExercise>,
    /// Index of the current exercise.
    pub question_index: usize,
    /// Indices into the current exercise's `words`, in placed order.
    pub placed: Vec<usize>,
    /// Word indices that cannot be removed.
    pub locked: BTreeSet<usize>,
    /// Position the next placed word is inserted at; appended when unset.
    pub insertion_point: Option<usize>,
    /// Most recent validation for the current question.
    pub last_result: Option<ValidationResult>,
    /// An incorrect submission happened on the current question.
    pub had_error: bool,
    /// A hint was used on the current question.
    pub hint_used: bool,
    /// Submissions on the current question.
    pub attempts: u32,
    /// Questions credited (first try, no hint).
    pub score: u32,
    /// Experience earned so far.
    pub xp_earned: u32,
    /// Present once the session has finished.
    pub summary: Option<ReorderSummary>,
}

impl ReorderState {
    /// The exercise currently in play, if any.
    pub fn current_exercise(&self) -> Option<&ReorderExercise> {
        self.exercises.get(self.question_index)
    }

    /// Number of questions in the session.
    pub fn total_questions(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the current question is the last one.
    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 >= self.exercises.len()
    }

    /// Whether the session has ended.
    pub fn is_finished(&self) -> bool {
        self.phase == ReorderPhase::Finished
    }

    /// The learner's current arrangement as tokens.
    pub fn placed_words(&self) -> Vec<String> {
        let Some(exercise) = self.current_exercise() else {
            return Vec::new();
        };
        self.placed
            .iter()
            .filter_map(|&idx| exercise.words.get(idx).cloned())
            .collect()
    }

    /// Word indices not yet placed, in scrambled order.
    pub fn available_words(&self) -> Vec<usize> {
        let Some(exercise) = self.current_exercise() else {
            return Vec::new();
        };
        (0..exercise.words.len())
            .filter(|idx| !self.placed.contains(idx))
            .collect()
    }

    /// Whether the arrangement may be edited right now.
    ///
    /// Editing is open while playing, and after an incorrect validation so the
    /// learner can try again.
    pub fn can_edit(&self) -> bool {
        match self.phase {
            ReorderPhase::Playing => true,
            ReorderPhase::Feedback => self
                .last_result
                .as_ref()
                .is_some_and(|result| !result.is_correct),
            _ => false,
        }
    }
}

/// Events accepted by the reordering reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReorderEvent {
    /// Begin a session over the given exercises.
    StartSession { exercises: Vec<ReorderExercise> },
    /// Show the current exercise.
    LoadExercise,
    /// Place a word from the pool.
    PlaceWord { word_index: usize },
    /// Remove the word at a position in the arrangement.
    RemoveWord { position: usize },
    /// Set or clear where the next word is inserted.
    SetInsertionPoint { position: Option<usize> },
    /// Toggle the lock on a word.
    LockWord { word_index: usize },
    /// Submit the arrangement for validation.
    Submit,
    /// Result of validating the submitted arrangement.
    Validated { result: ValidationResult },
    /// Reveal the answer.
    UseHint,
    /// Move on from the feedback screen.
    NextQuestion,
    /// End the session early.
    FinishSession,
    /// Discard everything.
    Reset,
}
