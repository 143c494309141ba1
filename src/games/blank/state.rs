//! State and event types for the fill-in-the-blank drill.

use serde::{Deserialize, Serialize};

use crate::economy::{DrillRank, ProficiencyLevel};

/// One gap-fill question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlankQuestion {
    /// Content identifier.
    pub id: String,
    /// Sentence with the gap marked, e.g. `"She ___ to school every day."`.
    pub prompt: String,
    /// The expected answer.
    pub answer: String,
    /// Other accepted answers.
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Optional hint shown on request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Optional rule explanation shown after answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl BlankQuestion {
    /// Create a question with a single accepted answer.
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            answer: answer.into(),
            alternatives: Vec::new(),
            hint: None,
            explanation: None,
        }
    }

    /// Add an accepted alternative answer.
    pub fn with_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    /// All accepted answers, the expected one first.
    pub fn accepted_answers(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.answer).chain(self.alternatives.iter())
    }
}

/// A batch of questions played as one drill.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlankDrill {
    /// Content identifier.
    pub id: String,
    /// Content tier.
    #[serde(default)]
    pub level: ProficiencyLevel,
    /// Questions in play order.
    pub questions: Vec<BlankQuestion>,
}

/// Phase of a drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrillPhase {
    /// No drill loaded.
    #[default]
    Idle,
    /// Questions are being answered.
    Answering,
    /// Drill over; summary available.
    Finished,
}

/// What happened on one question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    /// Question identifier.
    pub question_id: String,
    /// The learner's answer; `None` when skipped.
    pub given: Option<String>,
    /// Whether it was accepted.
    pub correct: bool,
}

/// End-of-drill summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrillSummary {
    /// Questions answered correctly.
    pub correct: u32,
    /// Questions answered wrong or skipped.
    pub wrong: u32,
    /// Questions in the drill.
    pub total_questions: u32,
    /// `correct / total_questions`.
    pub accuracy: f64,
    /// Accuracy after the overtime penalty; used for the rank.
    pub adjusted_accuracy: f64,
    /// Whether the timer ran out before the drill ended.
    pub overtime: bool,
    /// Rank from adjusted accuracy.
    pub rank: DrillRank,
    /// Session reward: `correct * BASE_XP * rank multiplier`, truncated.
    pub reward: u32,
    /// Tier-scaled experience for the player's level progression.
    pub xp: u32,
    /// Longest run of consecutive correct answers.
    pub best_streak: u32,
}

/// Snapshot of a fill-in-the-blank drill.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrillState {
    /// Current phase.
    pub phase: DrillPhase,
    /// The drill being played.
    pub drill: BlankDrill,
    /// Index of the current question.
    pub question_index: usize,
    /// Correct answers so far.
    pub correct_count: u32,
    /// Wrong answers and skips so far.
    pub wrong_count: u32,
    /// Current run of consecutive correct answers.
    pub streak: u32,
    /// Longest run so far.
    pub best_streak: u32,
    /// Time allowed for the drill.
    pub time_limit_secs: u32,
    /// Seconds left on the countdown. Never increases during a drill.
    pub time_remaining_secs: u32,
    /// Set once the countdown hits zero; never cleared during a drill.
    pub overtime: bool,
    /// The current question has been answered or skipped.
    pub answered: bool,
    /// Per-question outcomes in answer order.
    pub answers: Vec<AnswerRecord>,
    /// Present once the drill has finished.
    pub summary: Option<DrillSummary>,
}

impl DrillState {
    /// The question currently in play, if any.
    pub fn current_question(&self) -> Option<&BlankQuestion> {
        self.drill.questions.get(self.question_index)
    }

    /// Number of questions in the drill.
    pub fn total_questions(&self) -> usize {
        self.drill.questions.len()
    }

    /// Whether the current question is the last one.
    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 >= self.drill.questions.len()
    }

    /// Whether the drill has ended.
    pub fn is_finished(&self) -> bool {
        self.phase == DrillPhase::Finished
    }

    /// Fraction of the drill completed, 0.0 for an empty drill.
    pub fn progress(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            return 0.0;
        }
        self.answers.len() as f64 / total as f64
    }
}

/// Events accepted by the drill reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrillEvent {
    /// Load a drill and start the countdown.
    StartDrill { drill: BlankDrill, time_limit_secs: u32 },
    /// An answer, already judged by the host.
    SubmitAnswer { answer: String, is_correct: bool },
    /// Skip the current question; counts as wrong.
    Skip,
    /// Move to the next question.
    NextQuestion,
    /// One second elapsed.
    TimerTick,
    /// The host's timer ran out.
    TimeExpired,
    /// End the drill and compute the summary.
    FinishGame,
    /// Discard everything.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_answers_order() {
        let q = BlankQuestion::new("q1", "She ___ home.", "went").with_alternative("walked");
        let answers: Vec<&String> = q.accepted_answers().collect();
        assert_eq!(answers, vec!["went", "walked"]);
    }

    #[test]
    fn test_progress_empty_drill() {
        assert!(DrillState::default().progress().abs() < f64::EPSILON);
    }

    #[test]
    fn test_event_is_type_tagged() {
        let event: DrillEvent =
            serde_json::from_str(r#"{"type":"submit_answer","answer":"went","is_correct":true}"#)
                .unwrap();
        assert_eq!(
            event,
            DrillEvent::SubmitAnswer {
                answer: "went".to_string(),
                is_correct: true
            }
        );
        let json = serde_json::to_value(DrillEvent::TimerTick).unwrap();
        assert_eq!(json["type"], "timer_tick");
    }
}
