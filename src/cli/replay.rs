//! Replay command for Lexiplay.
//!
//! Folds a recorded event script through its mode's reducer and prints the
//! resulting session snapshot. Useful for reproducing a learner's session or
//! checking a content pack end to end.

use std::path::Path;

use serde::Serialize;

use crate::cli::{render, OutputOptions};
use crate::error::Result;
use crate::snapshot::{ReplayScript, SessionSnapshot};
use crate::util::read_to_string_limited;

/// Output format for the replay command.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutput {
    /// Whether the script could be read and applied.
    pub success: bool,
    /// Number of events applied.
    pub events: usize,
    /// Final session state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SessionSnapshot>,
    /// Error message if the replay failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplayOutput {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            events: 0,
            snapshot: None,
            error: Some(error.into()),
        }
    }
}

/// The replay command implementation.
#[derive(Debug, Default)]
pub struct ReplayCommand;

impl ReplayCommand {
    /// Create a new replay command.
    pub fn new() -> Self {
        Self
    }

    /// Replay the script stored at `path`.
    pub fn run(&self, path: &Path) -> ReplayOutput {
        match Self::load(path) {
            Ok(script) => ReplayOutput {
                success: true,
                events: script.len(),
                snapshot: Some(script.run()),
                error: None,
            },
            Err(e) => ReplayOutput::failure(e.to_string()),
        }
    }

    fn load(path: &Path) -> Result<ReplayScript> {
        let content = read_to_string_limited(path)?;
        ReplayScript::from_json(&content)
    }

    /// Format the output based on options.
    pub fn format_output(&self, output: &ReplayOutput, options: &OutputOptions) -> String {
        render(output, options, |o| self.format_human_readable(o))
    }

    fn format_human_readable(&self, output: &ReplayOutput) -> String {
        let Some(snapshot) = output.snapshot.as_ref().filter(|_| output.success) else {
            return format!(
                "Replay failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        };

        let mut text = format!(
            "Replayed {} {} events ({}).\n",
            output.events,
            snapshot.mode(),
            if snapshot.is_finished() {
                "finished"
            } else {
                "in progress"
            }
        );
        text.push_str(&summary_line(snapshot));
        text
    }
}

fn summary_line(snapshot: &SessionSnapshot) -> String {
    match snapshot {
        SessionSnapshot::Reorder(state) => match &state.summary {
            Some(s) => format!(
                "Score {}/{}, {} XP, rank {}\n",
                s.score,
                s.total_questions,
                s.xp_earned,
                s.rank.display_name()
            ),
            None => format!(
                "Question {} of {}, score {}\n",
                state.question_index + 1,
                state.total_questions(),
                state.score
            ),
        },
        SessionSnapshot::Blank(state) => match &state.summary {
            Some(s) => format!(
                "{} correct of {}, reward {}, {} XP, rank {}\n",
                s.correct,
                s.total_questions,
                s.reward,
                s.xp,
                s.rank.display_name()
            ),
            None => format!(
                "Question {} of {}, {} correct\n",
                state.question_index + 1,
                state.total_questions(),
                state.correct_count
            ),
        },
        SessionSnapshot::Sniper(state) => match &state.summary {
            Some(s) => format!(
                "{} correct of {}, health {}, reward {}, {} XP, rank {}\n",
                s.correct,
                s.total_targets,
                s.health,
                s.reward,
                s.xp,
                s.rank.display_name()
            ),
            None => format!(
                "Target {} of {}, health {}\n",
                state.target_index + 1,
                state.total_targets(),
                state.health
            ),
        },
    }
}
