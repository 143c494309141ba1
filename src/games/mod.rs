//! Game-mode state machines.
//!
//! Every mode is a pure reducer `reduce(&State, Event) -> State`. The host
//! drives it with events (including timer ticks and already-judged answers)
//! and renders whatever state comes back. Events that do not fit the
//! current phase return the state unchanged.

pub mod blank;
pub mod reorder;
pub mod sniper;
pub mod validation;

pub use validation::{GraderVerdict, ValidationResult};
