//! Text commands for Lexiplay: tokenize and similarity.
//!
//! Debugging aids for content authors checking how a sentence will be split
//! into reorder tiles, or how close a typed answer is to the expected one.

use serde::{Deserialize, Serialize};

use crate::cli::{render, OutputOptions};
use crate::config::Config;
use crate::games::blank::{answers_match, is_near_miss};
use crate::text::{detokenize, similarity, tokenize};

/// Output format for the tokenize command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenizeOutput {
    /// The input text.
    pub input: String,
    /// Word and punctuation tokens.
    pub tokens: Vec<String>,
    /// Tokens joined back with sentence spacing.
    pub rejoined: String,
}

/// The tokenize command implementation.
#[derive(Debug, Default)]
pub struct TokenizeCommand;

impl TokenizeCommand {
    /// Create a new tokenize command.
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into tokens and join them back.
    pub fn run(&self, text: &str) -> TokenizeOutput {
        let tokens = tokenize(text);
        let rejoined = detokenize(&tokens);
        TokenizeOutput {
            input: text.to_string(),
            tokens,
            rejoined,
        }
    }

    /// Format the output based on options.
    pub fn format_output(&self, output: &TokenizeOutput, options: &OutputOptions) -> String {
        render(output, options, |o| {
            let quoted: Vec<String> = o.tokens.iter().map(|t| format!("[{}]", t)).collect();
            format!(
                "{} tokens: {}\nRejoined: {}\n",
                o.tokens.len(),
                quoted.join(" "),
                o.rejoined
            )
        })
    }
}

/// Output format for the similarity command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityOutput {
    /// Expected answer.
    pub expected: String,
    /// Given answer.
    pub given: String,
    /// Similarity in [0, 1].
    pub similarity: f64,
    /// Whether the answers match under the configured strictness.
    pub matches: bool,
    /// Whether a non-matching answer is close enough for "almost" feedback.
    pub near_miss: bool,
    /// Threshold used for the near-miss verdict.
    pub threshold: f64,
}

/// The similarity command implementation.
pub struct SimilarityCommand {
    config: Config,
}

impl SimilarityCommand {
    /// Create a new similarity command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compare `given` against `expected`.
    pub fn run(&self, expected: &str, given: &str) -> SimilarityOutput {
        let threshold = self.config.drill.near_miss_threshold;
        let matches = answers_match(expected, given, self.config.drill.strict_answers);
        SimilarityOutput {
            expected: expected.to_string(),
            given: given.to_string(),
            similarity: similarity(expected, given),
            matches,
            near_miss: !matches && is_near_miss(expected, given, threshold),
            threshold,
        }
    }

    /// Format the output based on options.
    pub fn format_output(&self, output: &SimilarityOutput, options: &OutputOptions) -> String {
        render(output, options, |o| {
            let verdict = if o.matches {
                "match"
            } else if o.near_miss {
                "near miss"
            } else {
                "miss"
            };
            format!("Similarity: {:.2} ({})\n", o.similarity, verdict)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_command() {
        let output = TokenizeCommand::new().run("I like tea, not coffee.");
        assert_eq!(
            output.tokens,
            vec!["I", "like", "tea", ",", "not", "coffee", "."]
        );
        assert_eq!(output.rejoined, "I like tea, not coffee.");
    }

    #[test]
    fn test_tokenize_format_human_readable() {
        let cmd = TokenizeCommand::new();
        let output = cmd.run("Go!");
        let text = cmd.format_output(&output, &OutputOptions::default());
        assert!(text.starts_with("2 tokens: [Go] [!]"));
    }

    #[test]
    fn test_similarity_match() {
        let output = SimilarityCommand::new(Config::default()).run("Went", " went ");
        assert!(output.matches);
        assert!(!output.near_miss);
        assert!((output.similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_near_miss() {
        let output = SimilarityCommand::new(Config::default()).run("haven't", "havent");
        assert!(!output.matches);
        assert!(output.near_miss);
    }

    #[test]
    fn test_similarity_strict_config() {
        let mut config = Config::default();
        config.drill.strict_answers = true;
        let output = SimilarityCommand::new(config).run("Went", "went");
        assert!(!output.matches);
    }

    #[test]
    fn test_similarity_format_json() {
        let cmd = SimilarityCommand::new(Config::default());
        let output = cmd.run("cat", "dog");
        let json = cmd.format_output(
            &output,
            &OutputOptions {
                json: true,
                quiet: false,
            },
        );
        let parsed: SimilarityOutput = serde_json::from_str(&json).unwrap();
        assert!(!parsed.matches);
        assert!(!parsed.near_miss);
    }
}
