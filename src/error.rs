//! Error types for Lexiplay.
//!
//! The rules engines themselves never fail: malformed input is handled by a
//! defined fallback (lowest tier, no-op transition, zero accuracy). Errors only
//! appear at the host edge, when loading configuration, reading input files or
//! decoding saved snapshots.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Lexiplay operations.
#[derive(Error, Debug)]
pub enum LexiError {
    /// I/O errors while reading input or config files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization or deserialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Exercise, question or pattern content that cannot be used.
    #[error("content error: {message}")]
    Content { message: String },

    /// Host-supplied input the command line shell cannot act on.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

/// A specialized Result type for Lexiplay operations.
pub type Result<T> = std::result::Result<T, LexiError>;

impl LexiError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a content error.
    pub fn content(message: impl Into<String>) -> Self {
        Self::Content {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<io::Error> for LexiError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for LexiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Host-edge failures (an unreadable config file, say) should degrade to
/// defaults instead of stopping a practice session.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Exit codes for the Lexiplay CLI.
pub mod exit_codes {
    /// The command completed.
    pub const SUCCESS: i32 = 0;

    /// The command could not complete (bad input, unreadable file).
    pub const ERROR: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = LexiError::storage(
            "/tmp/stats.json",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("/tmp/stats.json"));
    }

    #[test]
    fn test_serde_error_display() {
        let err = LexiError::serde("invalid JSON");
        assert_eq!(err.to_string(), "serialization error: invalid JSON");
    }

    #[test]
    fn test_config_error_display() {
        let err = LexiError::config("invalid TOML");
        assert_eq!(err.to_string(), "config error: invalid TOML");
    }

    #[test]
    fn test_content_error_display() {
        let err = LexiError::content("empty pattern catalog");
        assert_eq!(err.to_string(), "content error: empty pattern catalog");
    }

    #[test]
    fn test_invalid_input_error_display() {
        let err = LexiError::invalid_input("unknown mode: chess");
        assert_eq!(err.to_string(), "invalid input: unknown mode: chess");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let lexi_err: LexiError = io_err.into();
        assert!(matches!(lexi_err, LexiError::Storage { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let lexi_err: LexiError = json_err.into();
        assert!(matches!(lexi_err, LexiError::Serde { .. }));
    }

    #[test]
    fn test_fail_open_default() {
        let result: Result<Vec<String>> = Err(LexiError::config("test"));
        let value = result.fail_open_default("test context");
        assert!(value.is_empty());
    }

    #[test]
    fn test_fail_open_success() {
        let result: Result<u32> = Ok(100);
        let value = result.fail_open_default("test context");
        assert_eq!(value, 100);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
        assert_eq!(exit_codes::CRASH, 3);
    }
}
