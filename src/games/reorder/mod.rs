//! Sentence-reordering mode.
//!
//! The learner rebuilds a sentence from scrambled tokens. Full credit is only
//! given on a clean first try: a wrong submission or a hint excludes the
//! question, even if it is later answered correctly.

pub mod reducer;
pub mod state;
pub mod validate;

pub use reducer::reduce;
pub use state::{ReorderEvent, ReorderExercise, ReorderPhase, ReorderState, ReorderSummary};
pub use validate::{canonical_order, validate_reorder};
