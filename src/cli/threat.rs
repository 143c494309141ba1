//! Threat command for Lexiplay.
//!
//! Ranks grammar-error patterns for the next practice batch from an exported
//! statistics file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::config::Config;
use crate::error::{LexiError, Result};
use crate::threat::{score_traps, select_batch, PatternStats, ScoredTrap, TrapPattern};
use crate::util::read_json;

/// Options for the threat command.
#[derive(Debug, Clone, Default)]
pub struct ThreatOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Pattern definitions; without them every pattern in the stats file is used.
    pub patterns: Option<PathBuf>,
    /// Batch size, overriding `threat.batch_size`.
    pub limit: Option<usize>,
    /// Scoring time in Unix milliseconds, defaulting to the current time.
    pub now_ms: Option<i64>,
}

impl ThreatOptions {
    fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

/// One ranked pattern in the output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedPattern {
    /// Pattern identifier.
    pub pattern_id: String,
    /// Display name.
    pub name: String,
    /// Threat score, 0-100.
    pub score: f64,
    /// Recorded attempts.
    pub attempts: u32,
    /// Share of attempts answered correctly.
    pub accuracy: f64,
    /// Whether the pattern counts as mastered.
    pub mastered: bool,
}

impl From<&ScoredTrap> for RankedPattern {
    fn from(scored: &ScoredTrap) -> Self {
        Self {
            pattern_id: scored.trap.id.clone(),
            name: scored.trap.name.clone(),
            score: scored.score,
            attempts: scored.stats.attempts,
            accuracy: scored.stats.accuracy(),
            mastered: scored.stats.is_mastered(),
        }
    }
}

/// Output format for the threat command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatOutput {
    /// Whether the input could be read.
    pub success: bool,
    /// Time the scores were computed for.
    pub now_ms: i64,
    /// Patterns in priority order.
    pub patterns: Vec<RankedPattern>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThreatOutput {
    fn failure(now_ms: i64, error: impl Into<String>) -> Self {
        Self {
            success: false,
            now_ms,
            patterns: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The threat command implementation.
pub struct ThreatCommand {
    config: Config,
}

impl ThreatCommand {
    /// Create a new threat command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Rank the patterns found in `stats_path`.
    pub fn run(&self, stats_path: &Path, options: &ThreatOptions) -> ThreatOutput {
        let now_ms = options
            .now_ms
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

        match self.rank(stats_path, options, now_ms) {
            Ok(patterns) => ThreatOutput {
                success: true,
                now_ms,
                patterns,
                error: None,
            },
            Err(e) => ThreatOutput::failure(now_ms, e.to_string()),
        }
    }

    fn rank(
        &self,
        stats_path: &Path,
        options: &ThreatOptions,
        now_ms: i64,
    ) -> Result<Vec<RankedPattern>> {
        let stats: Vec<PatternStats> = read_json(stats_path)?;
        let traps: Vec<TrapPattern> = match &options.patterns {
            Some(path) => read_json(path)?,
            None => stats
                .iter()
                .map(|s| TrapPattern::new(s.pattern_id.clone(), s.pattern_id.clone()))
                .collect(),
        };
        if traps.is_empty() {
            return Err(LexiError::content("no patterns to rank"));
        }

        let size = options.limit.unwrap_or(self.config.threat.batch_size);
        let batch = select_batch(
            score_traps(&traps, &stats, now_ms),
            size,
            self.config.threat.skip_mastered,
        );
        tracing::debug!(
            patterns = traps.len(),
            selected = batch.len(),
            "ranked patterns"
        );

        Ok(batch.iter().map(RankedPattern::from).collect())
    }

    /// Format the output based on options.
    pub fn format_output(&self, output: &ThreatOutput, options: &ThreatOptions) -> String {
        render(output, &options.output(), |o| self.format_human_readable(o))
    }

    fn format_human_readable(&self, output: &ThreatOutput) -> String {
        if !output.success {
            return format!(
                "Threat ranking failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }
        if output.patterns.is_empty() {
            return "No patterns to practice.\n".to_string();
        }

        let mut text = String::new();
        for (i, p) in output.patterns.iter().enumerate() {
            text.push_str(&format!(
                "{:>2}. {:<30} {:>5.1}  ({} attempts, {:.0}% accuracy)\n",
                i + 1,
                p.name,
                p.score,
                p.attempts,
                p.accuracy * 100.0
            ));
        }
        text
    }
}
