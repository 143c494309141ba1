//! Experience-point formulas.
//!
//! Every formula multiplies the base unit by the content tier's multiplier
//! and mode-specific factors, then truncates to an integer. Factors are kept
//! as integer percentages so the truncation is exact.

use serde::{Deserialize, Serialize};

use super::{DrillRank, MissionRank, ProficiencyLevel};

/// Base unit reward per correct answer.
pub const BASE_XP: u32 = 10;

/// Flat penalty factor for finishing a drill after the timer ran out.
pub const OVERTIME_FACTOR: f64 = 0.9;

/// [`OVERTIME_FACTOR`] in percent.
pub const OVERTIME_PERCENT: u64 = 90;

/// How a single answered question went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Correct on the first submission, no help.
    FirstTry,
    /// Correct after at least one wrong submission.
    SelfCorrected,
    /// The learner revealed the answer.
    GaveUp,
    /// Never answered correctly.
    Failed,
}

impl AttemptOutcome {
    /// Classify an attempt from its flags.
    ///
    /// Giving up wins over everything else.
    pub fn classify(is_correct: bool, had_errors: bool, gave_up: bool) -> Self {
        if gave_up {
            Self::GaveUp
        } else if !is_correct {
            Self::Failed
        } else if had_errors {
            Self::SelfCorrected
        } else {
            Self::FirstTry
        }
    }

    /// Accuracy multiplier applied to the reward, in percent.
    pub fn percent(&self) -> u64 {
        match self {
            Self::FirstTry => 100,
            Self::SelfCorrected => 70,
            Self::GaveUp | Self::Failed => 0,
        }
    }

    /// Accuracy multiplier applied to the reward.
    pub fn multiplier(&self) -> f64 {
        self.percent() as f64 / 100.0
    }
}

/// Sentence-length complexity factor for reordering exercises, in percent.
pub fn complexity_percent(word_count: usize) -> u64 {
    match word_count {
        0..=5 => 100,
        6..=8 => 120,
        9..=12 => 150,
        _ => 200,
    }
}

/// Sentence-length complexity factor for reordering exercises.
pub fn complexity_factor(word_count: usize) -> f64 {
    complexity_percent(word_count) as f64 / 100.0
}

/// Bonus for `correct` answers out of `total`, in percent.
///
/// 90% accuracy earns +50, 70% earns +25, 50% earns +10. An empty session
/// earns nothing.
pub fn accuracy_bonus_percent(correct: u32, total: u32) -> u64 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (correct as u64 * 10, total as u64);
    if correct >= total * 9 {
        50
    } else if correct >= total * 7 {
        25
    } else if correct >= total * 5 {
        10
    } else {
        0
    }
}

/// `numerator / denominator`, truncated and saturated to `u32`.
fn truncate(numerator: u64, denominator: u64) -> u32 {
    u32::try_from(numerator / denominator).unwrap_or(u32::MAX)
}

/// Reward for one sentence-reordering question.
pub fn reorder_xp(level: ProficiencyLevel, word_count: usize, outcome: AttemptOutcome) -> u32 {
    truncate(
        BASE_XP as u64 * level.percent() * complexity_percent(word_count) * outcome.percent(),
        100 * 100 * 100,
    )
}

/// Reward for a finished fill-in-the-blank drill.
pub fn drill_xp(level: ProficiencyLevel, correct: u32, total: u32, overtime: bool) -> u32 {
    let overtime_percent = if overtime { OVERTIME_PERCENT } else { 100 };
    truncate(
        correct as u64
            * BASE_XP as u64
            * level.percent()
            * (100 + accuracy_bonus_percent(correct, total))
            * overtime_percent,
        100 * 100 * 100,
    )
}

/// Reward for a finished timed-correction batch.
///
/// Remaining health adds up to +50%.
pub fn sniper_xp(level: ProficiencyLevel, correct: u32, total: u32, health: u32) -> u32 {
    let health = health.min(100) as u64;
    truncate(
        correct as u64
            * BASE_XP as u64
            * level.percent()
            * (200 + health)
            * (100 + accuracy_bonus_percent(correct, total)),
        100 * 200 * 100,
    )
}

/// Session reward for a finished drill: `floor(correct × base × rank)`.
pub fn drill_reward(correct: u32, rank: DrillRank) -> u32 {
    truncate(correct as u64 * BASE_XP as u64 * rank.percent(), 100)
}

/// Session reward for a finished mission:
/// `floor(correct × base × (1 + health/200) × rank)`.
pub fn mission_reward(correct: u32, health: u32, rank: MissionRank) -> u32 {
    let health = health.min(100) as u64;
    truncate(
        correct as u64 * BASE_XP as u64 * (200 + health) * rank.percent(),
        200 * 100,
    )
}

/// `part / whole`, or 0.0 for an empty whole.
pub fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
