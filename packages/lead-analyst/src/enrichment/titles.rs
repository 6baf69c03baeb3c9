//! Profile value pools and title classification.

use crate::types::profile::Seniority;

pub const JOB_TITLES: &[&str] = &[
    "VP of Sales",
    "Head of Operations",
    "Chief Revenue Officer",
    "Director of Procurement",
    "IT Manager",
    "CEO",
    "COO",
    "Senior Buyer",
    "Business Development Manager",
    "CFO",
    "Director of Strategy",
    "Founder",
    "Managing Director",
];

pub const INDUSTRIES: &[&str] = &[
    "SaaS",
    "Manufacturing",
    "Healthcare",
    "Finance",
    "Retail",
    "Logistics",
    "Education",
    "Real Estate",
];

/// Employee-count buckets.
pub const COMPANY_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

/// Title fragments implying purchasing authority.
const DECISION_MAKER_KEYWORDS: &[&str] = &[
    "vp", "chief", "cro", "ceo", "coo", "cfo", "director", "founder", "head", "managing",
];

const C_SUITE_KEYWORDS: &[&str] = &["chief", "ceo", "coo", "cro", "cfo", "founder"];
const SENIOR_LEADERSHIP_KEYWORDS: &[&str] = &["vp", "vice president", "director", "head", "managing"];
const MID_LEVEL_KEYWORDS: &[&str] = &["manager", "senior"];

fn contains_any(title: &str, keywords: &[&str]) -> bool {
    let lower = title.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Whether a job title implies purchasing authority.
///
/// Case-insensitive substring match.
pub fn is_decision_maker(title: &str) -> bool {
    contains_any(title, DECISION_MAKER_KEYWORDS)
}

/// Seniority bucket for a job title. The first matching tier wins.
pub fn seniority_for_title(title: &str) -> Seniority {
    if contains_any(title, C_SUITE_KEYWORDS) {
        Seniority::CSuite
    } else if contains_any(title, SENIOR_LEADERSHIP_KEYWORDS) {
        Seniority::SeniorLeadership
    } else if contains_any(title, MID_LEVEL_KEYWORDS) {
        Seniority::MidLevelManagement
    } else {
        Seniority::IndividualContributor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_makers() {
        assert!(is_decision_maker("Chief Revenue Officer"));
        assert!(is_decision_maker("VP of Sales"));
        assert!(is_decision_maker("managing director"));
        assert!(!is_decision_maker("Business Development Manager"));
        assert!(!is_decision_maker("Senior Buyer"));
        assert!(!is_decision_maker("IT Manager"));
    }

    #[test]
    fn test_seniority_tiers() {
        assert_eq!(seniority_for_title("CEO"), Seniority::CSuite);
        assert_eq!(seniority_for_title("Founder"), Seniority::CSuite);
        assert_eq!(seniority_for_title("Director of Strategy"), Seniority::SeniorLeadership);
        assert_eq!(seniority_for_title("Head of Operations"), Seniority::SeniorLeadership);
        assert_eq!(seniority_for_title("IT Manager"), Seniority::MidLevelManagement);
        assert_eq!(seniority_for_title("Senior Buyer"), Seniority::MidLevelManagement);
        assert_eq!(seniority_for_title("Account Executive"), Seniority::IndividualContributor);
    }

    #[test]
    fn test_every_pool_title_classifies() {
        // Pool titles that are decision makers are never individual contributors
        for title in JOB_TITLES {
            if is_decision_maker(title) {
                assert_ne!(seniority_for_title(title), Seniority::IndividualContributor);
            }
        }
    }
}
