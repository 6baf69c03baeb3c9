//! Structured leads recovered from the agent's ranked answer.

use serde::{Deserialize, Serialize};

/// One entry of the ranked answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedLead {
    /// Ordinal as written by the agent
    pub rank: u32,

    /// Lead name with emphasis markup stripped
    pub name: String,

    /// Likelihood-to-close score, always within 0..=100
    pub score: u8,

    /// Reasons in the order they were written
    pub reasoning: Vec<String>,

    /// Unparsed text block belonging to this entry
    pub raw_text: String,
}

impl RankedLead {
    /// Display band for this lead's score.
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Coarse score bucket used when rendering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Bucket a 0..=100 score: 75+ is high, 50+ is medium.
    pub fn for_score(score: u8) -> Self {
        if score >= 75 {
            Self::High
        } else if score >= 50 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Hex color for UI display.
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::High => "#2ecc71",
            Self::Medium => "#f39c12",
            Self::Low => "#e74c3c",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}
