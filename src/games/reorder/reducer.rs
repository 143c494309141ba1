//! Reducer for the sentence-reordering mode.
//!
//! ```text
//! Setup ──load──▶ Playing ──submit──▶ Validating ──validated──▶ Feedback
//!                    ▲                                      │  │
//!                    └──── edit (after a wrong answer) ─────┘  │
//!                    └──── next_question ──────────────────────┤
//!                                                  Finished ◀──┘ (last question)
//! ```
//!
//! Events that do not apply to the current phase, or that reference an index
//! out of range, return the state unchanged.

use crate::economy::{ratio, reorder_xp, AttemptOutcome, DrillRank};
use crate::games::ValidationResult;

use super::state::{ReorderEvent, ReorderExercise, ReorderPhase, ReorderState, ReorderSummary};
use super::validate::canonical_order;

/// Apply one event to a reordering state.
pub fn reduce(state: &ReorderState, event: ReorderEvent) -> ReorderState {
    match event {
        ReorderEvent::StartSession { exercises } => start_session(exercises),
        ReorderEvent::LoadExercise => load_exercise(state),
        ReorderEvent::PlaceWord { word_index } => place_word(state, word_index),
        ReorderEvent::RemoveWord { position } => remove_word(state, position),
        ReorderEvent::SetInsertionPoint { position } => set_insertion_point(state, position),
        ReorderEvent::LockWord { word_index } => lock_word(state, word_index),
        ReorderEvent::Submit => submit(state),
        ReorderEvent::Validated { result } => validated(state, result),
        ReorderEvent::UseHint => use_hint(state),
        ReorderEvent::NextQuestion => next_question(state),
        ReorderEvent::FinishSession => finish(state),
        ReorderEvent::Reset => ReorderState::default(),
    }
}

fn ignored(state: &ReorderState, event: &str) -> ReorderState {
    tracing::debug!(event, phase = ?state.phase, "reorder event ignored");
    state.clone()
}

fn start_session(exercises: Vec<ReorderExercise>) -> ReorderState {
    tracing::debug!(questions = exercises.len(), "reorder session started");
    ReorderState {
        exercises,
        ..Default::default()
    }
}

fn load_exercise(state: &ReorderState) -> ReorderState {
    if state.phase != ReorderPhase::Setup || state.current_exercise().is_none() {
        return ignored(state, "load_exercise");
    }
    ReorderState {
        phase: ReorderPhase::Playing,
        ..clear_question(state)
    }
}

/// Copy of the state with all per-question fields cleared.
fn clear_question(state: &ReorderState) -> ReorderState {
    let mut next = state.clone();
    next.placed.clear();
    next.locked.clear();
    next.insertion_point = None;
    next.last_result = None;
    next.had_error = false;
    next.hint_used = false;
    next.attempts = 0;
    next
}

/// Copy of the state reopened for editing.
fn editing(state: &ReorderState) -> ReorderState {
    let mut next = state.clone();
    next.phase = ReorderPhase::Playing;
    next
}

fn place_word(state: &ReorderState, word_index: usize) -> ReorderState {
    let in_range = state
        .current_exercise()
        .is_some_and(|ex| word_index < ex.words.len());
    if !state.can_edit() || !in_range || state.placed.contains(&word_index) {
        return ignored(state, "place_word");
    }

    let mut next = editing(state);
    match next.insertion_point.take() {
        Some(position) => {
            let position = position.min(next.placed.len());
            next.placed.insert(position, word_index);
        }
        None => next.placed.push(word_index),
    }
    next
}

fn remove_word(state: &ReorderState, position: usize) -> ReorderState {
    let Some(&word_index) = state.placed.get(position) else {
        return ignored(state, "remove_word");
    };
    if !state.can_edit() || state.locked.contains(&word_index) {
        return ignored(state, "remove_word");
    }

    let mut next = editing(state);
    next.placed.remove(position);
    next
}

fn set_insertion_point(state: &ReorderState, position: Option<usize>) -> ReorderState {
    if !state.can_edit() {
        return ignored(state, "set_insertion_point");
    }
    let mut next = editing(state);
    next.insertion_point = position;
    next
}

fn lock_word(state: &ReorderState, word_index: usize) -> ReorderState {
    let in_range = state
        .current_exercise()
        .is_some_and(|ex| word_index < ex.words.len());
    if !state.can_edit() || !in_range {
        return ignored(state, "lock_word");
    }

    let mut next = editing(state);
    if !next.locked.remove(&word_index) {
        next.locked.insert(word_index);
    }
    next
}

fn submit(state: &ReorderState) -> ReorderState {
    if !state.can_edit() {
        return ignored(state, "submit");
    }
    let mut next = state.clone();
    next.phase = ReorderPhase::Validating;
    next.attempts += 1;
    next
}

fn validated(state: &ReorderState, result: ValidationResult) -> ReorderState {
    if state.phase != ReorderPhase::Validating {
        return ignored(state, "validated");
    }

    let mut next = state.clone();
    if result.is_correct {
        // Full credit only on a clean first try
        if !state.had_error && !state.hint_used {
            next.score += 1;
        }
        if let Some(exercise) = state.current_exercise() {
            let outcome = AttemptOutcome::classify(true, state.had_error, state.hint_used);
            next.xp_earned += reorder_xp(exercise.level, exercise.word_count(), outcome);
        }
    } else {
        next.had_error = true;
    }

    tracing::debug!(
        correct = result.is_correct,
        score = result.score,
        question = state.question_index,
        "reorder answer validated"
    );
    next.last_result = Some(result);
    next.phase = ReorderPhase::Feedback;
    next
}

fn use_hint(state: &ReorderState) -> ReorderState {
    let Some(exercise) = state.current_exercise() else {
        return ignored(state, "use_hint");
    };
    if !state.can_edit() {
        return ignored(state, "use_hint");
    }

    let mut next = editing(state);
    next.placed = canonical_order(exercise);
    next.insertion_point = None;
    next.hint_used = true;
    next
}

fn next_question(state: &ReorderState) -> ReorderState {
    if state.phase != ReorderPhase::Feedback {
        return ignored(state, "next_question");
    }
    if state.is_last_question() {
        return finish(state);
    }

    let mut next = clear_question(state);
    next.question_index += 1;
    next.phase = ReorderPhase::Playing;
    next
}

fn finish(state: &ReorderState) -> ReorderState {
    if state.phase == ReorderPhase::Finished {
        return ignored(state, "finish_session");
    }

    let total = state.total_questions() as u32;
    let accuracy = ratio(state.score, total);
    let summary = ReorderSummary {
        score: state.score,
        total_questions: total,
        accuracy,
        xp_earned: state.xp_earned,
        rank: DrillRank::from_accuracy(accuracy),
    };

    tracing::debug!(score = state.score, total, xp = state.xp_earned, "reorder session finished");

    let mut next = state.clone();
    next.phase = ReorderPhase::Finished;
    next.insertion_point = None;
    next.summary = Some(summary);
    next
}
