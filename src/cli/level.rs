//! Level command for Lexiplay.
//!
//! Shows the player level, title and progress for an experience total.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::economy::{check_level_up, level_title, progress_to_next};

/// Output format for the level command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelOutput {
    /// Experience total.
    pub xp: u64,
    /// Player level, 1-based.
    pub level: u8,
    /// Title for the level.
    pub title: String,
    /// Experience earned within the current level.
    pub current: u64,
    /// Experience the current level spans.
    pub required: u64,
    /// `current / required`, 1.0 at the top level.
    pub fraction: f64,
    /// Whether the top level has been reached.
    pub is_max_level: bool,
    /// New level when moving from `--previous` crossed a threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leveled_up_to: Option<u8>,
}

/// The level command implementation.
#[derive(Debug, Default)]
pub struct LevelCommand;

impl LevelCommand {
    /// Create a new level command.
    pub fn new() -> Self {
        Self
    }

    /// Compute level information, optionally checking for a level-up from `previous`.
    pub fn run(&self, xp: u64, previous: Option<u64>) -> LevelOutput {
        let progress = progress_to_next(xp);
        LevelOutput {
            xp,
            level: progress.level,
            title: level_title(progress.level).to_string(),
            current: progress.current,
            required: progress.required,
            fraction: progress.fraction,
            is_max_level: progress.is_max_level,
            leveled_up_to: previous.and_then(|prev| check_level_up(prev, xp)),
        }
    }

    /// Format the output based on options.
    pub fn format_output(&self, output: &LevelOutput, options: &OutputOptions) -> String {
        render(output, options, |o| self.format_human_readable(o))
    }

    fn format_human_readable(&self, output: &LevelOutput) -> String {
        let mut text = format!("Level {} ({})\n", output.level, output.title);
        if output.is_max_level {
            text.push_str(&format!("{} XP, max level reached\n", output.xp));
        } else {
            text.push_str(&format!(
                "{} XP, {}/{} to next level ({:.0}%)\n",
                output.xp,
                output.current,
                output.required,
                output.fraction * 100.0
            ));
        }
        if let Some(level) = output.leveled_up_to {
            text.push_str(&format!("Level up! Now level {}\n", level));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_output_mid_level() {
        let output = LevelCommand::new().run(150, None);
        assert_eq!(output.level, 2);
        assert_eq!(output.title, level_title(2));
        assert_eq!(output.current, 50);
        assert_eq!(output.required, 200);
        assert!(!output.is_max_level);
        assert!(output.leveled_up_to.is_none());
    }

    #[test]
    fn test_level_output_level_up() {
        let output = LevelCommand::new().run(320, Some(250));
        assert_eq!(output.leveled_up_to, Some(3));
    }

    #[test]
    fn test_level_output_no_level_up_within_level() {
        let output = LevelCommand::new().run(290, Some(250));
        assert!(output.leveled_up_to.is_none());
    }

    #[test]
    fn test_format_human_readable() {
        let cmd = LevelCommand::new();
        let output = cmd.run(5000, Some(0));
        let text = cmd.format_output(&output, &OutputOptions::default());
        assert!(text.contains("max level reached"));
        assert!(text.contains("Level up!"));
    }

    #[test]
    fn test_format_json_and_quiet() {
        let cmd = LevelCommand::new();
        let output = cmd.run(0, None);

        let json = cmd.format_output(
            &output,
            &OutputOptions {
                json: true,
                quiet: false,
            },
        );
        let parsed: LevelOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, output);

        let quiet = cmd.format_output(
            &output,
            &OutputOptions {
                json: false,
                quiet: true,
            },
        );
        assert!(quiet.is_empty());
    }
}
