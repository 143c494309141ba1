//! Grammar-error pattern definitions and per-pattern practice statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::economy::ProficiencyLevel;

/// Consecutive correct answers needed before a pattern counts as mastered.
pub const MASTERY_STREAK: u32 = 3;

/// Accuracy needed before a pattern counts as mastered.
pub const MASTERY_ACCURACY: f64 = 0.8;

/// A static grammar-error pattern ("trap") from the content catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrapPattern {
    /// Stable identifier, e.g. `"present-perfect-since"`.
    pub id: String,
    /// Short name shown to the learner.
    pub name: String,
    /// Explanation of the rule being broken.
    #[serde(default)]
    pub description: String,
    /// Grammar area, e.g. `"tenses"` or `"articles"`.
    #[serde(default)]
    pub category: String,
    /// Tier of the content that exercises this pattern.
    #[serde(default)]
    pub level: ProficiencyLevel,
}

impl TrapPattern {
    /// Create a pattern with an id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            level: ProficiencyLevel::default(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the proficiency tier.
    pub fn with_level(mut self, level: ProficiencyLevel) -> Self {
        self.level = level;
        self
    }
}

/// Practice history for one pattern, supplied by persistence.
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatternStats {
    /// Pattern this record belongs to.
    pub pattern_id: String,
    /// Total answers given for the pattern.
    pub attempts: u32,
    /// Wrong answers among `attempts`.
    pub mistakes: u32,
    /// Current run of consecutive correct answers.
    pub streak: u32,
    /// When the last wrong answer happened.
    pub last_mistake_at: Option<i64>,
    /// When the pattern was last practiced.
    pub last_seen_at: Option<i64>,
}

impl PatternStats {
    /// Empty stats for a pattern.
    pub fn new(pattern_id: impl Into<String>) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            ..Default::default()
        }
    }

    /// `(attempts - mistakes) / attempts`, or 0.0 with no attempts.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        let correct = self.attempts.saturating_sub(self.mistakes);
        correct as f64 / self.attempts as f64
    }

    /// Whether the learner has mastered the pattern.
    pub fn is_mastered(&self) -> bool {
        self.streak >= MASTERY_STREAK && self.accuracy() >= MASTERY_ACCURACY
    }

    /// Whether the pattern has never been practiced.
    pub fn is_novel(&self) -> bool {
        self.attempts == 0
    }

    /// Stats after one more answer at `now_ms`.
    ///
    /// Returns an updated copy; the host decides whether to persist it.
    pub fn record_attempt(&self, correct: bool, now_ms: i64) -> Self {
        let mut next = self.clone();
        next.attempts += 1;
        next.last_seen_at = Some(now_ms);
        if correct {
            next.streak += 1;
        } else {
            next.mistakes += 1;
            next.streak = 0;
            next.last_mistake_at = Some(now_ms);
        }
        next
    }

    /// Last mistake as a UTC timestamp, if any.
    pub fn last_mistake_time(&self) -> Option<DateTime<Utc>> {
        self.last_mistake_at.and_then(DateTime::from_timestamp_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(attempts: u32, mistakes: u32, streak: u32) -> PatternStats {
        PatternStats {
            pattern_id: "articles".to_string(),
            attempts,
            mistakes,
            streak,
            ..Default::default()
        }
    }

    #[test]
    fn test_accuracy() {
        assert!((stats(10, 2, 0).accuracy() - 0.8).abs() < f64::EPSILON);
        assert!((stats(4, 4, 0).accuracy()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accuracy_zero_attempts() {
        assert!(stats(0, 0, 0).accuracy().abs() < f64::EPSILON);
    }

    #[test]
    fn test_accuracy_more_mistakes_than_attempts_is_zero() {
        assert!(stats(2, 5, 0).accuracy().abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_mastered() {
        assert!(stats(10, 2, 3).is_mastered());
        assert!(!stats(10, 2, 2).is_mastered());
        assert!(!stats(10, 3, 5).is_mastered());
    }

    #[test]
    fn test_record_attempt_correct() {
        let before = stats(2, 1, 0);
        let after = before.record_attempt(true, 1_000);
        assert_eq!(after.attempts, 3);
        assert_eq!(after.mistakes, 1);
        assert_eq!(after.streak, 1);
        assert_eq!(after.last_seen_at, Some(1_000));
        assert_eq!(after.last_mistake_at, None);
        // original untouched
        assert_eq!(before.attempts, 2);
    }

    #[test]
    fn test_record_attempt_wrong_resets_streak() {
        let after = stats(5, 0, 5).record_attempt(false, 2_000);
        assert_eq!(after.mistakes, 1);
        assert_eq!(after.streak, 0);
        assert_eq!(after.last_mistake_at, Some(2_000));
    }

    #[test]
    fn test_last_mistake_time() {
        let mut s = stats(1, 1, 0);
        s.last_mistake_at = Some(0);
        assert_eq!(s.last_mistake_time(), Some(DateTime::UNIX_EPOCH));
    }

    #[test]
    fn test_stats_deserialize_with_missing_fields() {
        let s: PatternStats = serde_json::from_str(r#"{"pattern_id":"x","attempts":3}"#).unwrap();
        assert_eq!(s.attempts, 3);
        assert_eq!(s.mistakes, 0);
        assert!(s.last_mistake_at.is_none());
    }

    #[test]
    fn test_pattern_builder() {
        let p = TrapPattern::new("since-for", "Since vs. for")
            .with_category("tenses")
            .with_level(ProficiencyLevel::B1);
        assert_eq!(p.category, "tenses");
        assert_eq!(p.level, ProficiencyLevel::B1);
    }
}
