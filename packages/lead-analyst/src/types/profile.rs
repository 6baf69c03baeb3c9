//! Professional profile types produced by enrichment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seniority bucket derived from a job title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "C-Suite")]
    CSuite,
    #[serde(rename = "Senior Leadership")]
    SeniorLeadership,
    #[serde(rename = "Mid-Level Management")]
    MidLevelManagement,
    #[serde(rename = "Individual Contributor")]
    IndividualContributor,
}

impl Seniority {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CSuite => "C-Suite",
            Self::SeniorLeadership => "Senior Leadership",
            Self::MidLevelManagement => "Mid-Level Management",
            Self::IndividualContributor => "Individual Contributor",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Professional background for a lead.
///
/// Recomputed on every lookup; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub lead_name: String,
    pub job_title: String,
    pub industry: String,

    /// Employee-count bucket, e.g. `"51-200"`
    pub company_size: String,

    pub seniority: Seniority,
    pub years_in_role: u32,
    pub connections: u32,
    pub is_decision_maker: bool,

    /// Where the data came from
    pub source: String,
}
