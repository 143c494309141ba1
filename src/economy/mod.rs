//! Reward economy shared by all game modes.
//!
//! Pure functions only: tier multipliers, experience formulas, level
//! progression and end-of-session ranks.

pub mod levels;
pub mod rank;
pub mod tiers;
pub mod xp;

pub use levels::{
    check_level_up, level_for, level_title, progress_to_next, LevelProgress, LEVEL_THRESHOLDS,
    MAX_LEVEL,
};
pub use rank::{DrillRank, MissionRank};
pub use tiers::ProficiencyLevel;
pub use xp::{
    accuracy_bonus_percent, complexity_factor, complexity_percent, drill_reward, drill_xp,
    mission_reward, ratio, reorder_xp, sniper_xp, AttemptOutcome, BASE_XP, OVERTIME_FACTOR,
    OVERTIME_PERCENT,
};
