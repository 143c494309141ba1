//! Fill-in-the-blank drill.

pub mod reducer;
pub mod state;
pub mod validate;

pub use reducer::{reduce, summarize};
pub use state::{
    AnswerRecord, BlankDrill, BlankQuestion, DrillEvent, DrillPhase, DrillState, DrillSummary,
};
pub use validate::{
    answers_match, check_answer, is_near_miss, validate_blank, DEFAULT_NEAR_MISS_THRESHOLD,
};
