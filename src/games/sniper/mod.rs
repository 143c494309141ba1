//! Timed grammar-correction ("sniper") mode.
//!
//! Each target is a sentence with one grammar error. Wrong corrections cost
//! cover integrity (health); the mission rank is decided by what is left.

pub mod reducer;
pub mod state;
pub mod validate;

pub use reducer::{reduce, summarize};
pub use state::{
    MissionSummary, SniperBatch, SniperEvent, SniperPhase, SniperState, SniperTarget,
    TargetOutcome, DEFAULT_HEALTH_PENALTY, STARTING_HEALTH,
};
pub use validate::validate_correction;
