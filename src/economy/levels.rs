//! Player level progression.
//!
//! Cumulative experience maps onto six player levels through a fixed
//! threshold table:
//!
//! | Level | Title       | XP from |
//! |-------|-------------|---------|
//! | 1     | Recruit     | 0       |
//! | 2     | Cadet       | 100     |
//! | 3     | Agent       | 300     |
//! | 4     | Specialist  | 700     |
//! | 5     | Veteran     | 1500    |
//! | 6     | Legend      | 3000    |

use serde::{Deserialize, Serialize};

/// Experience needed to reach each level, indexed by `level - 1`.
pub const LEVEL_THRESHOLDS: [u64; 6] = [0, 100, 300, 700, 1500, 3000];

/// Highest reachable level.
pub const MAX_LEVEL: u8 = LEVEL_THRESHOLDS.len() as u8;

const LEVEL_TITLES: [&str; 6] = [
    "Recruit",
    "Cadet",
    "Agent",
    "Specialist",
    "Veteran",
    "Legend",
];

/// Level (1..=6) for a cumulative experience total.
pub fn level_for(xp: u64) -> u8 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| xp >= threshold)
        .map(|idx| idx as u8 + 1)
        .unwrap_or(1)
}

/// Title shown for a level. Out-of-range levels are clamped.
pub fn level_title(level: u8) -> &'static str {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    LEVEL_TITLES[idx]
}

/// Progress through the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level.
    pub level: u8,
    /// Experience earned since entering the current level.
    pub current: u64,
    /// Experience the current level spans.
    ///
    /// At the top level there is no next threshold and this equals `current`.
    pub required: u64,
    /// `current / required`, clamped to `[0, 1]`. Always 1.0 at the top level.
    pub fraction: f64,
    /// Whether the player is at the top level.
    pub is_max_level: bool,
}

/// Compute progress towards the next level.
pub fn progress_to_next(xp: u64) -> LevelProgress {
    let level = level_for(xp);
    let idx = level as usize - 1;
    let floor = LEVEL_THRESHOLDS[idx];
    let current = xp - floor;

    match LEVEL_THRESHOLDS.get(idx + 1) {
        Some(&next) => {
            let required = next - floor;
            let fraction = if required == 0 {
                0.0
            } else {
                (current as f64 / required as f64).clamp(0.0, 1.0)
            };
            LevelProgress {
                level,
                current,
                required,
                fraction,
                is_max_level: false,
            }
        }
        None => LevelProgress {
            level,
            current,
            required: current,
            fraction: 1.0,
            is_max_level: true,
        },
    }
}

/// Report the new level if an experience change crossed a level boundary.
///
/// Returns `None` when both totals fall in the same level.
pub fn check_level_up(previous_xp: u64, new_xp: u64) -> Option<u8> {
    let before = level_for(previous_xp);
    let after = level_for(new_xp);
    if before != after {
        tracing::debug!(from = before, to = after, "level changed");
        Some(after)
    } else {
        None
    }
}
