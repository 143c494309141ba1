//! Configuration loading for Lexiplay.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.lexiplay/config.toml`)
//! 3. User config (`~/.lexiplay/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The engines never read it directly: hosts
//! pass the values in as event payloads (time limits, health penalty, see
//! [`DrillConfig::start_event`] and [`SniperConfig::start_event`]) or as
//! function arguments (strictness, batch size).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{FailOpen, LexiError, Result};
use crate::games::blank::{BlankDrill, DrillEvent, DEFAULT_NEAR_MISS_THRESHOLD};
use crate::games::sniper::{SniperBatch, SniperEvent, DEFAULT_HEALTH_PENALTY};
use crate::util::read_to_string_limited;

/// Main configuration struct for Lexiplay.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Fill-in-the-blank drill settings.
    pub drill: DrillConfig,
    /// Timed-correction mission settings.
    pub sniper: SniperConfig,
    /// Pattern prioritization settings.
    pub threat: ThreatConfig,
}

/// Fill-in-the-blank drill settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrillConfig {
    /// Countdown for a whole drill. 0 disables the timer.
    pub time_limit_secs: u32,
    /// Compare answers exactly instead of trimmed and case-folded.
    pub strict_answers: bool,
    /// Similarity at or above which a wrong answer counts as "almost".
    pub near_miss_threshold: f64,
}

impl DrillConfig {
    /// Check if a near-miss threshold is valid (finite, in [0.0, 1.0]).
    pub fn is_valid_threshold(value: f64) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    /// Opening event for `drill` with the configured countdown.
    pub fn start_event(&self, drill: BlankDrill) -> DrillEvent {
        DrillEvent::StartDrill {
            drill,
            time_limit_secs: self.time_limit_secs,
        }
    }
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 60,
            strict_answers: false,
            near_miss_threshold: DEFAULT_NEAR_MISS_THRESHOLD,
        }
    }
}

/// Timed-correction mission settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SniperConfig {
    /// Countdown for a whole batch. 0 disables the timer.
    pub time_limit_secs: u32,
    /// Health lost per wrong answer.
    pub health_penalty: u32,
}

/// Largest accepted health penalty; one miss empties the bar.
pub const MAX_HEALTH_PENALTY: u32 = 100;

impl SniperConfig {
    /// Check if a health penalty is valid (at most [`MAX_HEALTH_PENALTY`]).
    pub fn is_valid_penalty(value: u32) -> bool {
        value <= MAX_HEALTH_PENALTY
    }

    /// Opening event for `batch` with the configured countdown and penalty.
    pub fn start_event(&self, batch: SniperBatch) -> SniperEvent {
        SniperEvent::StartBatch {
            batch,
            time_limit_secs: self.time_limit_secs,
            health_penalty: self.health_penalty,
        }
    }
}

impl Default for SniperConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 90,
            health_penalty: DEFAULT_HEALTH_PENALTY,
        }
    }
}

/// Pattern prioritization settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThreatConfig {
    /// Patterns per practice batch.
    pub batch_size: usize,
    /// Leave mastered patterns out of batches.
    pub skip_mastered: bool,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            skip_mastered: true,
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Never fails: unreadable or malformed files are skipped with a warning.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Project config (`.lexiplay/config.toml` in cwd)
    /// 3. User config (`<lexiplay_home>/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(e) => {
                tracing::warn!("current directory unavailable ({}), skipping project config", e);
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<lexiplay_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = lexiplay_home()?.join("config.toml");
        Self::load_optional(&path)
    }

    /// Load project config from `.lexiplay/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let path = cwd.join(".lexiplay").join("config.toml");
        Self::load_optional(&path)
    }

    /// Missing files are silent; unreadable or malformed ones are warned about.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        Self::load_from_file(path)
            .map(Some)
            .fail_open_default(&format!("loading {}", path.display()))
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = read_to_string_limited(path)?;
        toml::from_str(&content)
            .map_err(|e| LexiError::config(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // LEXIPLAY_DRILL_TIME_LIMIT
        if let Some(n) = env_parse::<u32>("LEXIPLAY_DRILL_TIME_LIMIT", "a whole number of seconds")
        {
            self.drill.time_limit_secs = n;
        }

        // LEXIPLAY_STRICT_ANSWERS
        if let Ok(val) = env::var("LEXIPLAY_STRICT_ANSWERS") {
            self.drill.strict_answers = val == "true" || val == "1";
        }

        // LEXIPLAY_NEAR_MISS_THRESHOLD
        if let Some(n) = env_parse::<f64>("LEXIPLAY_NEAR_MISS_THRESHOLD", "a decimal number") {
            if DrillConfig::is_valid_threshold(n) {
                self.drill.near_miss_threshold = n;
            } else {
                tracing::warn!(
                    "Invalid LEXIPLAY_NEAR_MISS_THRESHOLD value '{}'. \
                    Must be in range [0.0, 1.0]. Using '{}'.",
                    n,
                    self.drill.near_miss_threshold
                );
            }
        }

        // LEXIPLAY_SNIPER_TIME_LIMIT
        if let Some(n) =
            env_parse::<u32>("LEXIPLAY_SNIPER_TIME_LIMIT", "a whole number of seconds")
        {
            self.sniper.time_limit_secs = n;
        }

        // LEXIPLAY_HEALTH_PENALTY
        if let Some(n) = env_parse::<u32>("LEXIPLAY_HEALTH_PENALTY", "a positive integer") {
            if SniperConfig::is_valid_penalty(n) {
                self.sniper.health_penalty = n;
            } else {
                tracing::warn!(
                    "Invalid LEXIPLAY_HEALTH_PENALTY value '{}'. Must be <= {}. Using '{}'.",
                    n,
                    MAX_HEALTH_PENALTY,
                    self.sniper.health_penalty
                );
            }
        }

        // LEXIPLAY_BATCH_SIZE
        if let Some(n) = env_parse::<usize>("LEXIPLAY_BATCH_SIZE", "a positive integer") {
            self.threat.batch_size = n;
        }

        // LEXIPLAY_SKIP_MASTERED
        if let Ok(val) = env::var("LEXIPLAY_SKIP_MASTERED") {
            self.threat.skip_mastered = val == "true" || val == "1";
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence field by field: every value in
    /// `other` that differs from the default replaces the value in `self`.
    ///
    /// # Limitation
    ///
    /// A higher layer cannot set a field back to its default to undo a lower
    /// layer's customization, because "not set" and "set to the default" look
    /// the same after deserialization.
    fn merge(mut self, other: Config) -> Self {
        let default_drill = DrillConfig::default();
        if other.drill.time_limit_secs != default_drill.time_limit_secs {
            self.drill.time_limit_secs = other.drill.time_limit_secs;
        }
        if other.drill.strict_answers != default_drill.strict_answers {
            self.drill.strict_answers = other.drill.strict_answers;
        }
        if other.drill.near_miss_threshold != default_drill.near_miss_threshold {
            self.drill.near_miss_threshold = other.drill.near_miss_threshold;
        }

        let default_sniper = SniperConfig::default();
        if other.sniper.time_limit_secs != default_sniper.time_limit_secs {
            self.sniper.time_limit_secs = other.sniper.time_limit_secs;
        }
        if other.sniper.health_penalty != default_sniper.health_penalty {
            self.sniper.health_penalty = other.sniper.health_penalty;
        }

        let default_threat = ThreatConfig::default();
        if other.threat.batch_size != default_threat.batch_size {
            self.threat.batch_size = other.threat.batch_size;
        }
        if other.threat.skip_mastered != default_threat.skip_mastered {
            self.threat.skip_mastered = other.threat.skip_mastered;
        }

        self
    }
}

/// Read and parse an env var, warning when it does not parse.
fn env_parse<T: std::str::FromStr>(name: &str, expected: &str) -> Option<T> {
    let val = env::var(name).ok()?;
    match val.trim().parse::<T>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(
                "Invalid {} value '{}'. Expected {}. Keeping current value.",
                name,
                val,
                expected
            );
            None
        }
    }
}

/// Get the Lexiplay home directory.
///
/// Checks `LEXIPLAY_HOME` first, then falls back to `~/.lexiplay`. An empty
/// `LEXIPLAY_HOME` is ignored. Returns `None` only when no home directory
/// can be determined at all.
pub fn lexiplay_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("LEXIPLAY_HOME") {
        if home.is_empty() {
            tracing::warn!("LEXIPLAY_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("LEXIPLAY_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    dirs::home_dir().map(|home| home.join(".lexiplay"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "LEXIPLAY_DRILL_TIME_LIMIT",
        "LEXIPLAY_STRICT_ANSWERS",
        "LEXIPLAY_NEAR_MISS_THRESHOLD",
        "LEXIPLAY_SNIPER_TIME_LIMIT",
        "LEXIPLAY_HEALTH_PENALTY",
        "LEXIPLAY_BATCH_SIZE",
        "LEXIPLAY_SKIP_MASTERED",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    /// Point LEXIPLAY_HOME at an empty temp dir so the real user config is not read.
    fn isolated_home() -> TempDir {
        let home = TempDir::new().unwrap();
        env::set_var("LEXIPLAY_HOME", home.path());
        home
    }

    fn write_project_config(dir: &Path, content: &str) {
        let lexiplay_dir = dir.join(".lexiplay");
        fs::create_dir_all(&lexiplay_dir).unwrap();
        fs::write(lexiplay_dir.join("config.toml"), content).unwrap();
    }

    // =========================================================================
    // Defaults and file loading
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.drill.time_limit_secs, 60);
        assert!(!config.drill.strict_answers);
        assert!((config.drill.near_miss_threshold - 0.8).abs() < f64::EPSILON);

        assert_eq!(config.sniper.time_limit_secs, 90);
        assert_eq!(config.sniper.health_penalty, 15);

        assert_eq!(config.threat.batch_size, 10);
        assert!(config.threat.skip_mastered);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");

        let toml_content = r#"
[sniper]
time_limit_secs = 120
health_penalty = 20

[threat]
batch_size = 5
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();

        assert_eq!(config.sniper.time_limit_secs, 120);
        assert_eq!(config.sniper.health_penalty, 20);
        assert_eq!(config.threat.batch_size, 5);

        // Other fields should be defaults
        assert!(config.threat.skip_mastered);
        assert_eq!(config.drill.time_limit_secs, 60);
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = Config::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(LexiError::Storage { .. })));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = Config::load_from_file(&config_path);
        assert!(matches!(result, Err(LexiError::Config { .. })));
    }

    #[test]
    fn test_full_toml_roundtrip() {
        let config = Config {
            drill: DrillConfig {
                time_limit_secs: 0,
                strict_answers: true,
                near_miss_threshold: 0.75,
            },
            sniper: SniperConfig {
                time_limit_secs: 45,
                health_penalty: 25,
            },
            threat: ThreatConfig {
                batch_size: 3,
                skip_mastered: false,
            },
        };

        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    // =========================================================================
    // Precedence
    // =========================================================================

    #[test]
    #[serial]
    fn test_project_config_precedence() {
        clear_env();
        let _home = isolated_home();
        let dir = TempDir::new().unwrap();
        write_project_config(dir.path(), "[drill]\ntime_limit_secs = 30\n");

        let config = Config::load_from_cwd(dir.path());

        assert_eq!(config.drill.time_limit_secs, 30);
        assert_eq!(config.sniper.time_limit_secs, 90);

        env::remove_var("LEXIPLAY_HOME");
    }

    #[test]
    #[serial]
    fn test_user_config_under_project_config() {
        clear_env();
        let home = isolated_home();
        fs::write(
            home.path().join("config.toml"),
            "[drill]\ntime_limit_secs = 45\nstrict_answers = true\n",
        )
        .unwrap();
        let dir = TempDir::new().unwrap();
        write_project_config(dir.path(), "[drill]\ntime_limit_secs = 30\n");

        let config = Config::load_from_cwd(dir.path());

        // Project wins where both set a value; user value survives elsewhere
        assert_eq!(config.drill.time_limit_secs, 30);
        assert!(config.drill.strict_answers);

        env::remove_var("LEXIPLAY_HOME");
    }

    #[test]
    #[serial]
    fn test_env_var_precedence() {
        clear_env();
        let _home = isolated_home();
        let dir = TempDir::new().unwrap();
        write_project_config(dir.path(), "[threat]\nbatch_size = 7\n");

        env::set_var("LEXIPLAY_BATCH_SIZE", "12");
        let config = Config::load_from_cwd(dir.path());
        assert_eq!(config.threat.batch_size, 12);

        clear_env();
        env::remove_var("LEXIPLAY_HOME");
    }

    #[test]
    #[serial]
    fn test_malformed_project_config_falls_back() {
        clear_env();
        let _home = isolated_home();
        let dir = TempDir::new().unwrap();
        write_project_config(dir.path(), "[drill\nbroken");

        let config = Config::load_from_cwd(dir.path());
        assert_eq!(config, Config::default());

        env::remove_var("LEXIPLAY_HOME");
    }

    // =========================================================================
    // Environment overrides
    // =========================================================================

    #[test]
    #[serial]
    fn test_env_var_overrides() {
        clear_env();
        env::set_var("LEXIPLAY_DRILL_TIME_LIMIT", "0");
        env::set_var("LEXIPLAY_STRICT_ANSWERS", "1");
        env::set_var("LEXIPLAY_NEAR_MISS_THRESHOLD", "0.6");
        env::set_var("LEXIPLAY_SNIPER_TIME_LIMIT", "30");
        env::set_var("LEXIPLAY_HEALTH_PENALTY", "25");
        env::set_var("LEXIPLAY_BATCH_SIZE", "4");
        env::set_var("LEXIPLAY_SKIP_MASTERED", "false");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.drill.time_limit_secs, 0);
        assert!(config.drill.strict_answers);
        assert!((config.drill.near_miss_threshold - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.sniper.time_limit_secs, 30);
        assert_eq!(config.sniper.health_penalty, 25);
        assert_eq!(config.threat.batch_size, 4);
        assert!(!config.threat.skip_mastered);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_unparseable_ignored() {
        clear_env();
        env::set_var("LEXIPLAY_BATCH_SIZE", "lots");
        env::set_var("LEXIPLAY_DRILL_TIME_LIMIT", "-5");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.threat.batch_size, 10);
        assert_eq!(config.drill.time_limit_secs, 60);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_out_of_range_ignored() {
        clear_env();
        env::set_var("LEXIPLAY_NEAR_MISS_THRESHOLD", "1.5");
        env::set_var("LEXIPLAY_HEALTH_PENALTY", "150");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert!((config.drill.near_miss_threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.sniper.health_penalty, 15);

        clear_env();
    }

    #[test]
    fn test_is_valid_threshold() {
        assert!(DrillConfig::is_valid_threshold(0.0));
        assert!(DrillConfig::is_valid_threshold(1.0));
        assert!(!DrillConfig::is_valid_threshold(-0.1));
        assert!(!DrillConfig::is_valid_threshold(f64::NAN));
    }

    #[test]
    fn test_is_valid_penalty() {
        assert!(SniperConfig::is_valid_penalty(0));
        assert!(SniperConfig::is_valid_penalty(100));
        assert!(!SniperConfig::is_valid_penalty(101));
    }

    // =========================================================================
    // Merge
    // =========================================================================

    #[test]
    fn test_merge_field_by_field_preserves_non_default_values() {
        let mut base = Config::default();
        base.sniper.health_penalty = 30;
        base.drill.strict_answers = true;

        let mut overlay = Config::default();
        overlay.sniper.time_limit_secs = 60;

        let merged = base.merge(overlay);

        assert_eq!(merged.sniper.health_penalty, 30);
        assert_eq!(merged.sniper.time_limit_secs, 60);
        assert!(merged.drill.strict_answers);
    }

    #[test]
    fn test_merge_with_explicit_defaults_does_not_block_overrides() {
        let mut base = Config::default();
        base.threat.batch_size = 20;

        // Overlay explicitly "sets" the default value; indistinguishable from unset
        let overlay = Config::default();
        let merged = base.merge(overlay);

        assert_eq!(merged.threat.batch_size, 20);
    }

    // =========================================================================
    // Home directory
    // =========================================================================

    #[test]
    #[serial]
    fn test_lexiplay_home_with_env() {
        env::set_var("LEXIPLAY_HOME", "/custom/lexiplay");
        assert_eq!(lexiplay_home(), Some(PathBuf::from("/custom/lexiplay")));
        env::remove_var("LEXIPLAY_HOME");
    }

    #[test]
    #[serial]
    fn test_lexiplay_home_empty_env_falls_back() {
        env::set_var("LEXIPLAY_HOME", "");
        let home = lexiplay_home();
        if let Some(user_home) = dirs::home_dir() {
            assert_eq!(home, Some(user_home.join(".lexiplay")));
        }
        env::remove_var("LEXIPLAY_HOME");
    }

    #[test]
    #[serial]
    fn test_load_without_files_is_default() {
        clear_env();
        let _home = isolated_home();
        let config = Config::load();
        assert_eq!(config, Config::default());
        assert_eq!(config.sniper.health_penalty, 15);
        env::remove_var("LEXIPLAY_HOME");
    }

    #[test]
    #[serial]
    fn test_start_events_carry_configured_values() {
        clear_env();
        let _home = isolated_home();
        env::set_var("LEXIPLAY_DRILL_TIME_LIMIT", "0");
        env::set_var("LEXIPLAY_HEALTH_PENALTY", "20");

        let config = Config::load_from_cwd(TempDir::new().unwrap().path());
        match config.drill.start_event(BlankDrill::default()) {
            DrillEvent::StartDrill { time_limit_secs, .. } => assert_eq!(time_limit_secs, 0),
            other => panic!("unexpected event: {:?}", other),
        }
        match config.sniper.start_event(SniperBatch::default()) {
            SniperEvent::StartBatch {
                time_limit_secs,
                health_penalty,
                ..
            } => {
                assert_eq!(time_limit_secs, 90);
                assert_eq!(health_penalty, 20);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        clear_env();
        env::remove_var("LEXIPLAY_HOME");
    }
}
