//! Serializable session snapshots and event replay.
//!
//! A snapshot is any mode's state tagged with its mode, so a host can persist
//! a session mid-play and resume it later. A replay script is an event list
//! for one mode, folded through that mode's reducer from the default state.

use serde::{Deserialize, Serialize};

use crate::error::{LexiError, Result};
use crate::games::blank::{self, DrillEvent, DrillState};
use crate::games::reorder::{self, ReorderEvent, ReorderState};
use crate::games::sniper::{self, SniperEvent, SniperState};

/// State of any game mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", content = "state", rename_all = "snake_case")]
pub enum SessionSnapshot {
    Reorder(ReorderState),
    Blank(DrillState),
    Sniper(SniperState),
}

impl SessionSnapshot {
    /// Mode name as used in the `mode` tag.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Reorder(_) => "reorder",
            Self::Blank(_) => "blank",
            Self::Sniper(_) => "sniper",
        }
    }

    /// Whether the session has reached its finished phase.
    pub fn is_finished(&self) -> bool {
        match self {
            Self::Reorder(state) => state.is_finished(),
            Self::Blank(state) => state.is_finished(),
            Self::Sniper(state) => state.is_finished(),
        }
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LexiError::serde(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LexiError::serde(format!("invalid session snapshot: {}", e)))
    }
}

/// Events for one mode, applied in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", content = "events", rename_all = "snake_case")]
pub enum ReplayScript {
    Reorder(Vec<ReorderEvent>),
    Blank(Vec<DrillEvent>),
    Sniper(Vec<SniperEvent>),
}

impl ReplayScript {
    /// Number of events in the script.
    pub fn len(&self) -> usize {
        match self {
            Self::Reorder(events) => events.len(),
            Self::Blank(events) => events.len(),
            Self::Sniper(events) => events.len(),
        }
    }

    /// Whether the script has no events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fold every event through the mode's reducer, starting from a fresh state.
    pub fn run(&self) -> SessionSnapshot {
        tracing::debug!(events = self.len(), "replaying script");
        match self {
            Self::Reorder(events) => SessionSnapshot::Reorder(
                events
                    .iter()
                    .cloned()
                    .fold(ReorderState::default(), |state, event| {
                        reorder::reduce(&state, event)
                    }),
            ),
            Self::Blank(events) => SessionSnapshot::Blank(
                events
                    .iter()
                    .cloned()
                    .fold(DrillState::default(), |state, event| {
                        blank::reduce(&state, event)
                    }),
            ),
            Self::Sniper(events) => SessionSnapshot::Sniper(
                events
                    .iter()
                    .cloned()
                    .fold(SniperState::default(), |state, event| {
                        sniper::reduce(&state, event)
                    }),
            ),
        }
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LexiError::serde(format!("invalid replay script: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::MissionRank;
    use crate::games::sniper::SniperPhase;

    const SNIPER_SCRIPT: &str = r#"{
        "mode": "sniper",
        "events": [
            {"type": "start_batch", "time_limit_secs": 90, "batch": {
                "id": "agreement",
                "level": "A1",
                "targets": [
                    {"id": "t1", "sentence": "She go home.", "correction": "She goes home.",
                     "pattern_id": "sva"},
                    {"id": "t2", "sentence": "They was late.", "correction": "They were late.",
                     "pattern_id": "sva"}
                ]
            }},
            {"type": "submit_answer", "answer": "She goes home.", "is_correct": true},
            {"type": "next_question"},
            {"type": "submit_answer", "answer": "They was late.", "is_correct": false},
            {"type": "next_question"}
        ]
    }"#;

    // =========================================================================
    // Replay
    // =========================================================================

    #[test]
    fn test_replay_sniper_script() {
        let script = ReplayScript::from_json(SNIPER_SCRIPT).unwrap();
        assert_eq!(script.len(), 5);

        let snapshot = script.run();
        assert_eq!(snapshot.mode(), "sniper");
        assert!(snapshot.is_finished());

        match snapshot {
            SessionSnapshot::Sniper(state) => {
                assert_eq!(state.phase, SniperPhase::Finished);
                assert_eq!(state.health, 85);
                assert_eq!(state.outcomes.len(), 2);
                assert_eq!(state.summary.unwrap().rank, MissionRank::Silver);
            }
            other => panic!("unexpected snapshot: {}", other.mode()),
        }
    }

    #[test]
    fn test_replay_empty_script_is_default_state() {
        let script = ReplayScript::from_json(r#"{"mode":"blank","events":[]}"#).unwrap();
        assert!(script.is_empty());
        assert_eq!(
            script.run(),
            SessionSnapshot::Blank(DrillState::default())
        );
    }

    #[test]
    fn test_replay_unknown_mode_rejected() {
        let result = ReplayScript::from_json(r#"{"mode":"chess","events":[]}"#);
        assert!(matches!(result, Err(LexiError::Serde { .. })));
    }

    #[test]
    fn test_replay_unknown_event_rejected() {
        let result = ReplayScript::from_json(r#"{"mode":"reorder","events":[{"type":"fly"}]}"#);
        assert!(result.is_err());
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    #[test]
    fn test_snapshot_json_is_tagged_by_mode() {
        let snapshot = SessionSnapshot::Reorder(ReorderState::default());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"mode\": \"reorder\""));
    }

    #[test]
    fn test_snapshot_resumes_mid_session() {
        let snapshot = ReplayScript::from_json(SNIPER_SCRIPT).unwrap().run();
        let json = snapshot.to_json().unwrap();
        let restored = SessionSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_invalid_json() {
        let result = SessionSnapshot::from_json("{not json");
        assert!(result.is_err());
    }
}
