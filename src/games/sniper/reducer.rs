//! Reducer for the timed grammar-correction ("sniper") mode.
//!
//! Soft train, hard rank: the countdown reaching zero only sets the overtime
//! flag, and health reaching zero never ends the mission. The learner always
//! plays the full batch; both only count against the final rank.

use crate::economy::{mission_reward, ratio, sniper_xp, MissionRank};

use super::state::{
    MissionSummary, SniperBatch, SniperEvent, SniperPhase, SniperState, TargetOutcome,
    STARTING_HEALTH,
};

/// Apply one event to a mission state.
pub fn reduce(state: &SniperState, event: SniperEvent) -> SniperState {
    match event {
        SniperEvent::StartBatch {
            batch,
            time_limit_secs,
            health_penalty,
        } => start_batch(batch, time_limit_secs, health_penalty),
        SniperEvent::SubmitAnswer { is_correct, .. } => submit(state, is_correct),
        SniperEvent::NextQuestion => next_target(state),
        SniperEvent::TimerTick => tick(state),
        SniperEvent::TimeExpired => expire(state),
        SniperEvent::FinishGame => finish(state),
        SniperEvent::Reset => SniperState::default(),
    }
}

fn ignored(state: &SniperState, event: &str) -> SniperState {
    tracing::debug!(event, phase = ?state.phase, "sniper event ignored");
    state.clone()
}

fn start_batch(batch: SniperBatch, time_limit_secs: u32, health_penalty: u32) -> SniperState {
    tracing::debug!(
        batch = %batch.id,
        targets = batch.targets.len(),
        time_limit_secs,
        health_penalty,
        "sniper batch started"
    );
    SniperState {
        phase: SniperPhase::Answering,
        batch,
        health: STARTING_HEALTH,
        health_penalty,
        time_limit_secs,
        time_remaining_secs: time_limit_secs,
        ..Default::default()
    }
}

fn submit(state: &SniperState, correct: bool) -> SniperState {
    if state.phase != SniperPhase::Answering || state.answered {
        return ignored(state, "submit_answer");
    }
    let Some(target) = state.current_target() else {
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
        next.health = next.health.saturating_sub(next.health_penalty);
        if next.health == 0 && state.health > 0 {
            tracing::debug!("cover compromised, mission continues");
        }
    }
    next.outcomes.push(TargetOutcome {
        target_id: target.id.clone(),
        pattern_id: target.pattern_id.clone(),
        correct,
    });
    next.answered = true;
    next
}

fn next_target(state: &SniperState) -> SniperState {
    // Every target must be shot at before moving on
    if state.phase != SniperPhase::Answering || !state.answered {
        return ignored(state, "next_question");
    }
    if state.is_last_target() {
        return finish(state);
    }

    let mut next = state.clone();
    next.target_index += 1;
    next.answered = false;
    next
}

fn tick(state: &SniperState) -> SniperState {
    // A zero limit means the mission is untimed
    if state.phase != SniperPhase::Answering || state.time_limit_secs == 0 {
        return ignored(state, "timer_tick");
    }
    let mut next = state.clone();
    next.time_remaining_secs = next.time_remaining_secs.saturating_sub(1);
    if next.time_remaining_secs == 0 {
        next.overtime = true;
    }
    next
}

fn expire(state: &SniperState) -> SniperState {
    if state.phase != SniperPhase::Answering {
        return ignored(state, "time_expired");
    }
    let mut next = state.clone();
    next.time_remaining_secs = 0;
    next.overtime = true;
    next
}

/// Summary for the mission as it stands.
pub fn summarize(state: &SniperState) -> MissionSummary {
    let total = state.total_targets() as u32;
    let health = state.health.min(STARTING_HEALTH);
    let rank = MissionRank::from_health(health, state.overtime);
    let reward = mission_reward(state.correct_count, health, rank);

    MissionSummary {
        correct: state.correct_count,
        wrong: state.wrong_count,
        total_targets: total,
        accuracy: ratio(state.correct_count, total),
        health,
        overtime: state.overtime,
        rank,
        reward,
        xp: sniper_xp(state.batch.level, state.correct_count, total, health),
        best_streak: state.best_streak,
    }
}

fn finish(state: &SniperState) -> SniperState {
    if state.phase != SniperPhase::Answering {
        return ignored(state, "finish_game");
    }

    let summary = summarize(state);
    tracing::debug!(
        correct = summary.correct,
        health = summary.health,
        rank = summary.rank.display_name(),
        reward = summary.reward,
        "sniper mission finished"
    );

    let mut next = state.clone();
    next.phase = SniperPhase::Finished;
    next.summary = Some(summary);
    next
}
