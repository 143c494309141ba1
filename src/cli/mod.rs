//! CLI commands for Lexiplay.
//!
//! A thin host around the engines, organized into:
//! - **Economy**: level
//! - **Text**: tokenize, similarity
//! - **Practice planning**: threat
//! - **Sessions**: start, replay

pub mod level;
pub mod replay;
pub mod start;
pub mod text;
pub mod threat;

pub use level::LevelCommand;
pub use replay::ReplayCommand;
pub use start::{SessionMode, StartCommand};
pub use text::{SimilarityCommand, TokenizeCommand};
pub use threat::ThreatCommand;

/// Options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Render a command output as JSON or with the command's human formatter.
pub(crate) fn render<T: serde::Serialize>(
    output: &T,
    options: &OutputOptions,
    human: impl FnOnce(&T) -> String,
) -> String {
    if options.quiet {
        return String::new();
    }

    if options.json {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    } else {
        human(output)
    }
}
