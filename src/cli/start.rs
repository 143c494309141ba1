//! Start command for Lexiplay.
//!
//! Builds the opening of a session from a content file and the configured
//! time limits, and prints it as a replay script together with the state it
//! produces. Hosts append the learner's events to the script as play goes on.

use std::path::Path;

use serde::Serialize;

use crate::cli::{render, OutputOptions};
use crate::config::Config;
use crate::error::{LexiError, Result};
use crate::games::blank::BlankDrill;
use crate::games::reorder::{ReorderEvent, ReorderExercise};
use crate::games::sniper::SniperBatch;
use crate::snapshot::{ReplayScript, SessionSnapshot};
use crate::util::read_json;

/// Game mode a content file is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Sentence reordering; content is a list of exercises.
    Reorder,
    /// Fill-in-the-blank; content is one drill.
    Blank,
    /// Timed correction; content is one batch.
    Sniper,
}

/// Output format for the start command.
#[derive(Debug, Clone, Serialize)]
pub struct StartOutput {
    /// Whether the content could be read and started.
    pub success: bool,
    /// Opening events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<ReplayScript>,
    /// State after the opening events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SessionSnapshot>,
    /// Error message if the session could not start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The start command implementation.
pub struct StartCommand {
    config: Config,
}

impl StartCommand {
    /// Create a new start command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Start a `mode` session over the content stored at `path`.
    pub fn run(&self, mode: SessionMode, path: &Path) -> StartOutput {
        match self.opening(mode, path) {
            Ok(script) => StartOutput {
                success: true,
                snapshot: Some(script.run()),
                script: Some(script),
                error: None,
            },
            Err(e) => StartOutput {
                success: false,
                script: None,
                snapshot: None,
                error: Some(e.to_string()),
            },
        }
    }

    fn opening(&self, mode: SessionMode, path: &Path) -> Result<ReplayScript> {
        let script = match mode {
            SessionMode::Reorder => {
                let exercises: Vec<ReorderExercise> = read_json(path)?;
                if exercises.is_empty() {
                    return Err(LexiError::content(format!(
                        "{} has no exercises",
                        path.display()
                    )));
                }
                ReplayScript::Reorder(vec![
                    ReorderEvent::StartSession { exercises },
                    ReorderEvent::LoadExercise,
                ])
            }
            SessionMode::Blank => {
                let drill: BlankDrill = read_json(path)?;
                if drill.questions.is_empty() {
                    return Err(LexiError::content(format!(
                        "drill '{}' has no questions",
                        drill.id
                    )));
                }
                ReplayScript::Blank(vec![self.config.drill.start_event(drill)])
            }
            SessionMode::Sniper => {
                let batch: SniperBatch = read_json(path)?;
                if batch.targets.is_empty() {
                    return Err(LexiError::content(format!(
                        "batch '{}' has no targets",
                        batch.id
                    )));
                }
                ReplayScript::Sniper(vec![self.config.sniper.start_event(batch)])
            }
        };
        tracing::debug!(?mode, events = script.len(), "session opened");
        Ok(script)
    }

    /// Format the output based on options.
    pub fn format_output(&self, output: &StartOutput, options: &OutputOptions) -> String {
        render(output, options, |o| self.format_human_readable(o))
    }

    fn format_human_readable(&self, output: &StartOutput) -> String {
        let Some(snapshot) = output.snapshot.as_ref().filter(|_| output.success) else {
            return format!(
                "Start failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        };

        match snapshot {
            SessionSnapshot::Reorder(state) => format!(
                "Started reorder session: {} exercises.\n",
                state.total_questions()
            ),
            SessionSnapshot::Blank(state) => format!(
                "Started drill '{}': {} questions, {}.\n",
                state.drill.id,
                state.total_questions(),
                countdown(state.time_limit_secs)
            ),
            SessionSnapshot::Sniper(state) => format!(
                "Started batch '{}': {} targets, {}, {} health per miss.\n",
                state.batch.id,
                state.total_targets(),
                countdown(state.time_limit_secs),
                state.health_penalty
            ),
        }
    }
}

fn countdown(secs: u32) -> String {
    if secs == 0 {
        "untimed".to_string()
    } else {
        format!("{}s countdown", secs)
    }
}
