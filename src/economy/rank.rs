//! End-of-session ranks and their reward multipliers.
//!
//! Ranks are derived from a finished session's accuracy or health and are
//! never stored apart from the session summary.

use serde::{Deserialize, Serialize};

use super::xp::OVERTIME_PERCENT;

/// Rank for accuracy-scored sessions (fill-in-the-blank, sentence reordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillRank {
    Perfect,
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl DrillRank {
    /// Rank for a final accuracy in `[0, 1]`.
    ///
    /// Thresholds: 1.0 perfect, 0.9 excellent, 0.7 good, 0.5 fair.
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 1.0 {
            Self::Perfect
        } else if accuracy >= 0.9 {
            Self::Excellent
        } else if accuracy >= 0.7 {
            Self::Good
        } else if accuracy >= 0.5 {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }

    /// Rank for `correct` of `total`, less 10% when the drill ran into
    /// overtime. Exact, so `7/9` in overtime is still good.
    pub fn from_counts(correct: u32, total: u32, overtime: bool) -> Self {
        if total == 0 {
            return Self::NeedsPractice;
        }
        let factor = if overtime { OVERTIME_PERCENT } else { 100 };
        // Compared in tenths of accuracy
        let scaled = correct as u64 * factor * 10;
        let whole = total as u64 * 100;
        if scaled >= whole * 10 {
            Self::Perfect
        } else if scaled >= whole * 9 {
            Self::Excellent
        } else if scaled >= whole * 7 {
            Self::Good
        } else if scaled >= whole * 5 {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }

    /// Reward multiplier for this rank, in percent.
    pub fn percent(&self) -> u64 {
        match self {
            Self::Perfect => 200,
            Self::Excellent => 150,
            Self::Good => 120,
            Self::Fair => 100,
            Self::NeedsPractice => 50,
        }
    }

    /// Reward multiplier for this rank.
    pub fn multiplier(&self) -> f64 {
        self.percent() as f64 / 100.0
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsPractice => "Needs Practice",
        }
    }
}

/// Rank for timed-correction missions, derived from remaining health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionRank {
    Gold,
    Silver,
    Bronze,
    Compromised,
}

impl MissionRank {
    /// Rank from final health (0..=100) and overtime status.
    ///
    /// Rules apply in order: no health left is compromised; full health
    /// without overtime is gold; at least half health without overtime is
    /// silver; anything else is bronze.
    pub fn from_health(health: u32, overtime: bool) -> Self {
        if health == 0 {
            Self::Compromised
        } else if health >= 100 && !overtime {
            Self::Gold
        } else if health >= 50 && !overtime {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Reward multiplier for this rank, in percent.
    pub fn percent(&self) -> u64 {
        match self {
            Self::Gold => 200,
            Self::Silver => 150,
            Self::Bronze => 100,
            Self::Compromised => 50,
        }
    }

    /// Reward multiplier for this rank.
    pub fn multiplier(&self) -> f64 {
        self.percent() as f64 / 100.0
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
            Self::Compromised => "Compromised",
        }
    }
}
