//! Reducer for the fill-in-the-blank drill.
//!
//! The countdown is soft: reaching zero marks the drill as overtime but play
//! continues until the last question. Overtime costs 10% of accuracy when
//! the rank is computed.

use crate::economy::{drill_reward, drill_xp, ratio, DrillRank, OVERTIME_FACTOR};

use super::state::{AnswerRecord, BlankDrill, DrillEvent, DrillPhase, DrillState, DrillSummary};

/// Apply one event to a drill state.
pub fn reduce(state: &DrillState, event: DrillEvent) -> DrillState {
    match event {
        DrillEvent::StartDrill {
            drill,
            time_limit_secs,
        } => start_drill(drill, time_limit_secs),
        DrillEvent::SubmitAnswer { answer, is_correct } => {
            record_answer(state, Some(answer), is_correct)
        }
        DrillEvent::Skip => record_answer(state, None, false),
        DrillEvent::NextQuestion => next_question(state),
        DrillEvent::TimerTick => tick(state),
        DrillEvent::TimeExpired => expire(state),
        DrillEvent::FinishGame => finish(state),
        DrillEvent::Reset => DrillState::default(),
    }
}

fn ignored(state: &DrillState, event: &str) -> DrillState {
    tracing::debug!(event, phase = ?state.phase, "drill event ignored");
    state.clone()
}

fn start_drill(drill: BlankDrill, time_limit_secs: u32) -> DrillState {
    tracing::debug!(
        drill = %drill.id,
        questions = drill.questions.len(),
        time_limit_secs,
        "drill started"
    );
    DrillState {
        phase: DrillPhase::Answering,
        drill,
        time_limit_secs,
        time_remaining_secs: time_limit_secs,
        ..Default::default()
    }
}

fn record_answer(state: &DrillState, given: Option<String>, correct: bool) -> DrillState {
    if state.phase != DrillPhase::Answering || state.answered {
        return ignored(state, "submit_answer");
    }
    let Some(question) = state.current_question() else {
        return ignored(state, "submit_answer");
    };

    let mut next = state.clone();
    if correct {
        next.correct_count += 1;
        next.streak += 1;
        next.best_streak = next.best_streak.max(next.streak);
    } else {
        next.wrong_count += 1;
        next.streak = 0;
    }
    next.answers.push(AnswerRecord {
        question_id: question.id.clone(),
        given,
        correct,
    });
    next.answered = true;
    next
}

fn next_question(state: &DrillState) -> DrillState {
    // Moving on needs an answer or a skip first
    if state.phase != DrillPhase::Answering || !state.answered {
        return ignored(state, "next_question");
    }
    if state.is_last_question() {
        return finish(state);
    }

    let mut next = state.clone();
    next.question_index += 1;
    next.answered = false;
    next
}

fn tick(state: &DrillState) -> DrillState {
    // A zero limit means the drill is untimed
    if state.phase != DrillPhase::Answering || state.time_limit_secs == 0 {
        return ignored(state, "timer_tick");
    }
    let mut next = state.clone();
    next.time_remaining_secs = next.time_remaining_secs.saturating_sub(1);
    if next.time_remaining_secs == 0 && !next.overtime {
        tracing::debug!("drill countdown reached zero, now in overtime");
        next.overtime = true;
    }
    next
}

fn expire(state: &DrillState) -> DrillState {
    if state.phase != DrillPhase::Answering {
        return ignored(state, "time_expired");
    }
    let mut next = state.clone();
    next.time_remaining_secs = 0;
    next.overtime = true;
    next
}

/// Summary for the drill as it stands.
pub fn summarize(state: &DrillState) -> DrillSummary {
    let total = state.total_questions() as u32;
    let accuracy = ratio(state.correct_count, total);
    let adjusted_accuracy = if state.overtime {
        accuracy * OVERTIME_FACTOR
    } else {
        accuracy
    };
    let rank = DrillRank::from_counts(state.correct_count, total, state.overtime);
    let reward = drill_reward(state.correct_count, rank);

    DrillSummary {
        correct: state.correct_count,
        wrong: state.wrong_count,
        total_questions: total,
        accuracy,
        adjusted_accuracy,
        overtime: state.overtime,
        rank,
        reward,
        xp: drill_xp(state.drill.level, state.correct_count, total, state.overtime),
        best_streak: state.best_streak,
    }
}

fn finish(state: &DrillState) -> DrillState {
    if state.phase != DrillPhase::Answering {
        return ignored(state, "finish_game");
    }

    let summary = summarize(state);
    tracing::debug!(
        correct = summary.correct,
        total = summary.total_questions,
        rank = summary.rank.display_name(),
        reward = summary.reward,
        "drill finished"
    );

    let mut next = state.clone();
    next.phase = DrillPhase::Finished;
    next.summary = Some(summary);
    next
}
