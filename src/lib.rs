//! Lexiplay - rules engine for gamified language drills.
//!
//! Three game modes (sentence reordering, fill-in-the-blank, timed grammar
//! correction) run as pure reducers over serializable state. Around them sit
//! the answer validators, the reward economy and the pattern prioritizer that
//! picks what to practice next. Rendering, audio and persistence belong to
//! the host.

pub mod cli;
pub mod config;
pub mod economy;
pub mod error;
pub mod games;
pub mod snapshot;
pub mod text;
pub mod threat;
pub mod util;

pub use config::Config;
pub use economy::{
    check_level_up, level_for, progress_to_next, AttemptOutcome, DrillRank, LevelProgress,
    MissionRank, ProficiencyLevel,
};
pub use error::{LexiError, Result};
pub use games::{GraderVerdict, ValidationResult};
pub use snapshot::{ReplayScript, SessionSnapshot};
pub use threat::{score_traps, select_batch, PatternStats, ScoredTrap, TrapPattern};

// CLI commands
pub use cli::{
    LevelCommand, ReplayCommand, SimilarityCommand, StartCommand, ThreatCommand, TokenizeCommand,
};
