//! State and event types for the timed grammar-correction mode.

use serde::{Deserialize, Serialize};

use crate::economy::{MissionRank, ProficiencyLevel};

/// Health at the start of every batch.
pub const STARTING_HEALTH: u32 = 100;

/// Health lost per wrong answer unless the batch says otherwise.
pub const DEFAULT_HEALTH_PENALTY: u32 = 15;

fn default_health_penalty() -> u32 {
    DEFAULT_HEALTH_PENALTY
}

/// A sentence containing one grammar error to correct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SniperTarget {
    /// Content identifier.
    pub id: String,
    /// The sentence as shown, with the error.
    pub sentence: String,
    /// The corrected sentence.
    pub correction: String,
    /// Other accepted corrections.
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Error pattern this target exercises.
    #[serde(default)]
    pub pattern_id: String,
    /// Rule explanation shown after answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl SniperTarget {
    /// Create a target from the faulty sentence and its correction.
    pub fn new(
        id: impl Into<String>,
        sentence: impl Into<String>,
        correction: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sentence: sentence.into(),
            correction: correction.into(),
            alternatives: Vec::new(),
            pattern_id: String::new(),
            explanation: None,
        }
    }

    /// Tag the target with its error pattern.
    pub fn with_pattern(mut self, pattern_id: impl Into<String>) -> Self {
        self.pattern_id = pattern_id.into();
        self
    }

    /// Add an accepted alternative correction.
    pub fn with_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }
}

/// A batch of targets played as one mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SniperBatch {
    /// Content identifier.
    pub id: String,
    /// Content tier.
    #[serde(default)]
    pub level: ProficiencyLevel,
    /// Targets in play order.
    pub targets: Vec<SniperTarget>,
}

/// Phase of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SniperPhase {
    /// No batch loaded.
    #[default]
    Idle,
    /// Targets are being answered.
    Answering,
    /// Mission over; summary available.
    Finished,
}

/// Result for one target, for updating pattern statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetOutcome {
    /// Target identifier.
    pub target_id: String,
    /// Error pattern the target exercises.
    pub pattern_id: String,
    /// Whether the correction was accepted.
    pub correct: bool,
}

/// End-of-mission summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionSummary {
    /// Targets corrected.
    pub correct: u32,
    /// Targets missed.
    pub wrong: u32,
    /// Targets in the batch.
    pub total_targets: u32,
    /// `correct / total_targets`.
    pub accuracy: f64,
    /// Health left at the end.
    pub health: u32,
    /// Whether the timer ran out before the batch ended.
    pub overtime: bool,
    /// Rank from health and overtime.
    pub rank: MissionRank,
    /// Session reward: `correct * BASE_XP * (1 + health/200) * rank multiplier`, truncated.
    pub reward: u32,
    /// Tier-scaled experience for the player's level progression.
    pub xp: u32,
    /// Longest run of consecutive correct answers.
    pub best_streak: u32,
}

/// Snapshot of a timed-correction mission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SniperState {
    /// Current phase.
    pub phase: SniperPhase,
    /// The batch being played.
    pub batch: SniperBatch,
    /// Index of the current target.
    pub target_index: usize,
    /// Correct answers so far.
    pub correct_count: u32,
    /// Wrong answers so far.
    pub wrong_count: u32,
    /// Current run of consecutive correct answers.
    pub streak: u32,
    /// Longest run so far.
    pub best_streak: u32,
    /// Cover integrity, 0..=100. Reaching 0 does not end the mission.
    pub health: u32,
    /// Health lost per wrong answer.
    pub health_penalty: u32,
    /// Time allowed for the batch.
    pub time_limit_secs: u32,
    /// Seconds left on the countdown.
    pub time_remaining_secs: u32,
    /// Set once the countdown hits zero.
    pub overtime: bool,
    /// The current target has been answered.
    pub answered: bool,
    /// Per-target outcomes in answer order.
    pub outcomes: Vec<TargetOutcome>,
    /// Present once the mission has finished.
    pub summary: Option<MissionSummary>,
}

impl Default for SniperState {
    fn default() -> Self {
        Self {
            phase: SniperPhase::Idle,
            batch: SniperBatch::default(),
            target_index: 0,
            correct_count: 0,
            wrong_count: 0,
            streak: 0,
            best_streak: 0,
            health: STARTING_HEALTH,
            health_penalty: DEFAULT_HEALTH_PENALTY,
            time_limit_secs: 0,
            time_remaining_secs: 0,
            overtime: false,
            answered: false,
            outcomes: Vec::new(),
            summary: None,
        }
    }
}

impl SniperState {
    /// The target currently in play, if any.
    pub fn current_target(&self) -> Option<&SniperTarget> {
        self.batch.targets.get(self.target_index)
    }

    /// Number of targets in the batch.
    pub fn total_targets(&self) -> usize {
        self.batch.targets.len()
    }

    /// Whether the current target is the last one.
    pub fn is_last_target(&self) -> bool {
        self.target_index + 1 >= self.batch.targets.len()
    }

    /// Whether the mission has ended.
    pub fn is_finished(&self) -> bool {
        self.phase == SniperPhase::Finished
    }
}

/// Events accepted by the sniper reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SniperEvent {
    /// Load a batch and start the countdown.
    StartBatch {
        batch: SniperBatch,
        time_limit_secs: u32,
        #[serde(default = "default_health_penalty")]
        health_penalty: u32,
    },
    /// A correction, already judged by the host.
    SubmitAnswer { answer: String, is_correct: bool },
    /// Move to the next target.
    NextQuestion,
    /// One second elapsed.
    TimerTick,
    /// The host's timer ran out.
    TimeExpired,
    /// End the mission and compute the summary.
    FinishGame,
    /// Discard everything.
    Reset,
}
