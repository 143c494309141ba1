//! Threat scoring for grammar-error patterns.
//!
//! A threat score (0-100) says how urgently a pattern should come back into
//! practice. Three components are combined with fixed weights:
//!
//! - Accuracy: `(1 - accuracy) * 100`
//! - Recency: `100 * 0.5^(days_since_last_mistake / 7)`, or 0 with no mistake
//! - Frequency: `min(attempts * 5, 100)`
//!
//! Patterns never attempted get a flat novelty score of 50.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::pattern::{PatternStats, TrapPattern};

/// Score weights and constants.
pub mod weights {
    /// Weight of the accuracy component.
    pub const ACCURACY: f64 = 0.4;
    /// Weight of the recency component.
    pub const RECENCY: f64 = 0.3;
    /// Weight of the frequency component.
    pub const FREQUENCY: f64 = 0.3;
    /// Score for a pattern with no attempts.
    pub const NOVELTY: f64 = 50.0;
    /// Half-life of the recency component, in days.
    pub const RECENCY_HALF_LIFE_DAYS: f64 = 7.0;
    /// Frequency points per attempt.
    pub const FREQUENCY_PER_ATTEMPT: f64 = 5.0;
}

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Threat score in `[0, 100]` for one pattern's history.
///
/// `last_mistake_ms` and `now_ms` are milliseconds since the Unix epoch.
pub fn threat_score(attempts: u32, mistakes: u32, last_mistake_ms: Option<i64>, now_ms: i64) -> f64 {
    if attempts == 0 {
        return weights::NOVELTY;
    }

    let correct = attempts.saturating_sub(mistakes);
    let accuracy = correct as f64 / attempts as f64;
    let accuracy_component = (1.0 - accuracy) * 100.0;

    let recency_component = match last_mistake_ms {
        Some(last) => {
            // A mistake stamped in the future counts as "just now"
            let days = (now_ms.saturating_sub(last)).max(0) as f64 / MS_PER_DAY;
            100.0 * 0.5f64.powf(days / weights::RECENCY_HALF_LIFE_DAYS)
        }
        None => 0.0,
    };

    let frequency_component = (attempts as f64 * weights::FREQUENCY_PER_ATTEMPT).min(100.0);

    let score = accuracy_component * weights::ACCURACY
        + recency_component * weights::RECENCY
        + frequency_component * weights::FREQUENCY;

    score.clamp(0.0, 100.0)
}

/// Threat score computed from a stats record.
pub fn score_stats(stats: &PatternStats, now_ms: i64) -> f64 {
    threat_score(stats.attempts, stats.mistakes, stats.last_mistake_at, now_ms)
}

/// A pattern paired with its history and computed threat score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTrap {
    /// The pattern definition.
    pub trap: TrapPattern,
    /// The history the score was computed from.
    pub stats: PatternStats,
    /// Threat score (0-100).
    pub score: f64,
}

impl ScoredTrap {
    /// Score a pattern against its stats.
    pub fn new(trap: TrapPattern, stats: PatternStats, now_ms: i64) -> Self {
        let score = score_stats(&stats, now_ms);
        Self { trap, stats, score }
    }
}

/// Join pattern definitions with their stats and score each one.
///
/// Patterns without a stats record are treated as never attempted.
pub fn score_traps(traps: &[TrapPattern], stats: &[PatternStats], now_ms: i64) -> Vec<ScoredTrap> {
    let by_id: HashMap<&str, &PatternStats> =
        stats.iter().map(|s| (s.pattern_id.as_str(), s)).collect();

    traps
        .iter()
        .map(|trap| {
            let pattern_stats = by_id
                .get(trap.id.as_str())
                .map(|s| (*s).clone())
                .unwrap_or_else(|| PatternStats::new(trap.id.clone()));
            ScoredTrap::new(trap.clone(), pattern_stats, now_ms)
        })
        .collect()
}

/// Order scored patterns from most to least urgent.
///
/// The sort is stable: equal scores keep their input order.
pub fn prioritize(mut traps: Vec<ScoredTrap>) -> Vec<ScoredTrap> {
    traps.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    traps
}

/// Pick the patterns for the next practice batch.
///
/// Prioritizes, optionally drops mastered patterns, and keeps the top `size`.
pub fn select_batch(traps: Vec<ScoredTrap>, size: usize, skip_mastered: bool) -> Vec<ScoredTrap> {
    let mut batch: Vec<ScoredTrap> = prioritize(traps)
        .into_iter()
        .filter(|t| !(skip_mastered && t.stats.is_mastered()))
        .collect();
    batch.truncate(size);

    tracing::debug!(selected = batch.len(), size, skip_mastered, "selected practice batch");
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    const NOW: i64 = 1_700_000_000_000;

    fn trap(id: &str) -> TrapPattern {
        TrapPattern::new(id, id)
    }

    fn stats(id: &str, attempts: u32, mistakes: u32, last_mistake: Option<i64>) -> PatternStats {
        PatternStats {
            pattern_id: id.to_string(),
            attempts,
            mistakes,
            last_mistake_at: last_mistake,
            ..Default::default()
        }
    }

    // =========================================================================
    // threat_score
    // =========================================================================

    #[test]
    fn test_novel_pattern_scores_fifty() {
        assert!((threat_score(0, 0, None, NOW) - 50.0).abs() < f64::EPSILON);
        // Stale mistake data is ignored without attempts
        assert!((threat_score(0, 3, Some(NOW), NOW) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_perfect_accuracy_no_mistakes() {
        // accuracy 0, recency 0, frequency min(10*5, 100) = 50 -> 15
        let score = threat_score(10, 0, None, NOW);
        assert!((score - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_mistake_today_scores_higher_than_clean_history() {
        let clean = threat_score(10, 0, None, NOW);
        let struggling = threat_score(10, 5, Some(NOW), NOW);
        assert!(struggling > clean);
        // 50 * 0.4 + 100 * 0.3 + 50 * 0.3 = 65
        assert!((struggling - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_recency_half_life() {
        let today = threat_score(4, 4, Some(NOW), NOW);
        let week_ago = threat_score(4, 4, Some(NOW - 7 * DAY_MS), NOW);
        // recency drops from 100 to 50, weighted by 0.3
        assert!((today - week_ago - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_future_mistake_treated_as_now() {
        let future = threat_score(4, 4, Some(NOW + DAY_MS), NOW);
        let now = threat_score(4, 4, Some(NOW), NOW);
        assert!((future - now).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_caps_at_hundred() {
        let many = threat_score(1_000, 0, None, NOW);
        assert!((many - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_worst_case_clamped() {
        let score = threat_score(100, 100, Some(NOW), NOW);
        assert!(score <= 100.0);
        assert!((score - 100.0).abs() < 1e-9);
    }

    // =========================================================================
    // score_traps / prioritize / select_batch
    // =========================================================================

    #[test]
    fn test_score_traps_missing_stats_are_novel() {
        let traps = vec![trap("a"), trap("b")];
        let history = vec![stats("a", 10, 0, None)];

        let scored = score_traps(&traps, &history, NOW);

        assert_eq!(scored.len(), 2);
        assert!((scored[0].score - 15.0).abs() < 1e-9);
        assert!((scored[1].score - 50.0).abs() < f64::EPSILON);
        assert_eq!(scored[1].stats.pattern_id, "b");
    }

    #[test]
    fn test_prioritize_sorts_descending() {
        let traps = vec![trap("clean"), trap("novel"), trap("missed")];
        let history = vec![
            stats("clean", 10, 0, None),
            stats("missed", 10, 5, Some(NOW)),
        ];

        let ordered = prioritize(score_traps(&traps, &history, NOW));
        let ids: Vec<&str> = ordered.iter().map(|t| t.trap.id.as_str()).collect();

        assert_eq!(ids, vec!["missed", "novel", "clean"]);
    }

    #[test]
    fn test_prioritize_is_stable_for_ties() {
        let traps = vec![trap("first"), trap("second"), trap("third")];
        let ordered = prioritize(score_traps(&traps, &[], NOW));
        let ids: Vec<&str> = ordered.iter().map(|t| t.trap.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_select_batch_skips_mastered() {
        let traps = vec![trap("mastered"), trap("weak")];
        let mut mastered = stats("mastered", 20, 0, Some(NOW));
        mastered.streak = 5;
        let history = vec![mastered, stats("weak", 2, 1, None)];

        let scored = score_traps(&traps, &history, NOW);
        let batch = select_batch(scored.clone(), 10, true);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].trap.id, "weak");

        let batch = select_batch(scored, 10, false);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_select_batch_respects_size() {
        let traps: Vec<TrapPattern> = (0..5).map(|i| trap(&format!("p{}", i))).collect();
        let batch = select_batch(score_traps(&traps, &[], NOW), 3, true);
        assert_eq!(batch.len(), 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: scores always fall within [0, 100]
            #[test]
            fn prop_score_bounded(
                attempts in 0u32..500,
                mistakes in 0u32..600,
                age_days in proptest::option::of(-30i64..365),
            ) {
                let last = age_days.map(|d| NOW - d * DAY_MS);
                let score = threat_score(attempts, mistakes, last, NOW);
                prop_assert!((0.0..=100.0).contains(&score));
            }

            // Property: an older mistake never scores higher than a newer one
            #[test]
            fn prop_recency_decays(attempts in 1u32..50, a in 0i64..60, b in 0i64..60) {
                let (newer, older) = if a <= b { (a, b) } else { (b, a) };
                let s_new = threat_score(attempts, 1.min(attempts), Some(NOW - newer * DAY_MS), NOW);
                let s_old = threat_score(attempts, 1.min(attempts), Some(NOW - older * DAY_MS), NOW);
                prop_assert!(s_new >= s_old);
            }
        }
    }
}
