//! Pattern prioritization ("threat scoring").
//!
//! Decides which grammar-error patterns go into the learner's next practice
//! batch, favoring novel and recently missed patterns. Statistics come from
//! the host's persistence layer; nothing here writes anything back.

pub mod pattern;
pub mod scoring;

pub use pattern::{PatternStats, TrapPattern, MASTERY_ACCURACY, MASTERY_STREAK};
pub use scoring::{
    prioritize, score_stats, score_traps, select_batch, threat_score, weights, ScoredTrap,
};
