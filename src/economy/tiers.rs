//! Proficiency tiers for exercise content.

use serde::{Deserialize, Serialize};

/// One of six ordered proficiency tiers, A1 (beginner) to C2 (mastery).
///
/// Content records carry a tier code; the reward formulas scale by the
/// tier's multiplier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ProficiencyLevel {
    #[default]
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl ProficiencyLevel {
    /// All tiers in ascending order.
    pub const ALL: [ProficiencyLevel; 6] = [
        ProficiencyLevel::A1,
        ProficiencyLevel::A2,
        ProficiencyLevel::B1,
        ProficiencyLevel::B2,
        ProficiencyLevel::C1,
        ProficiencyLevel::C2,
    ];

    /// Parse a tier code such as `"b2"` or `"B2"`.
    ///
    /// Unknown codes fall back to the lowest tier.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "A1" => Self::A1,
            "A2" => Self::A2,
            "B1" => Self::B1,
            "B2" => Self::B2,
            "C1" => Self::C1,
            "C2" => Self::C2,
            other => {
                tracing::debug!(code = other, "unknown proficiency code, using A1");
                Self::A1
            }
        }
    }

    /// The tier code (`"A1"` .. `"C2"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    /// Human-readable tier name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::A1 => "Beginner",
            Self::A2 => "Elementary",
            Self::B1 => "Intermediate",
            Self::B2 => "Upper Intermediate",
            Self::C1 => "Advanced",
            Self::C2 => "Mastery",
        }
    }

    /// Reward multiplier for content at this tier, in percent.
    pub fn percent(&self) -> u64 {
        match self {
            Self::A1 => 100,
            Self::A2 => 150,
            Self::B1 => 200,
            Self::B2 => 300,
            Self::C1 => 400,
            Self::C2 => 500,
        }
    }

    /// Reward multiplier for content at this tier.
    pub fn multiplier(&self) -> f64 {
        self.percent() as f64 / 100.0
    }
}
