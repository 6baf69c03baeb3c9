//! Simulated professional-profile enrichment.
//!
//! Profiles are derived from the lead's name alone: the MD5 digest of the
//! lower-cased name, reduced modulo 10 000, seeds a PRNG that draws every
//! field. The same name always yields the same profile, in any process.

pub mod titles;

use async_trait::async_trait;
use std::fmt::Write;

use crate::error::Result;
use crate::traits::profiles::ProfileProvider;
use crate::types::profile::LeadProfile;

pub use titles::{is_decision_maker, seniority_for_title, COMPANY_SIZES, INDUSTRIES, JOB_TITLES};

/// Provenance label attached to every simulated profile.
pub const SIMULATED_SOURCE: &str = "LinkedIn (simulated)";

/// Deterministic seed for a lead name, in `0..10_000`.
pub fn seed_for_name(lead_name: &str) -> u64 {
    let digest = md5::compute(lead_name.to_lowercase().as_bytes());
    (u128::from_be_bytes(digest.0) % 10_000) as u64
}

fn pick<'a>(rng: &mut fastrand::Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.usize(..pool.len())]
}

/// Simulated profile lookup. Pure: no I/O, no shared state.
pub fn lookup_profile(lead_name: &str) -> LeadProfile {
    let mut rng = fastrand::Rng::with_seed(seed_for_name(lead_name));

    // Draw order is fixed; reordering changes every profile
    let job_title = pick(&mut rng, JOB_TITLES);
    let company_size = pick(&mut rng, COMPANY_SIZES);
    let industry = pick(&mut rng, INDUSTRIES);
    let years_in_role = rng.u32(1..=12);
    let connections = rng.u32(200..=4000);

    LeadProfile {
        lead_name: lead_name.to_string(),
        job_title: job_title.to_string(),
        industry: industry.to_string(),
        company_size: company_size.to_string(),
        seniority: seniority_for_title(job_title),
        years_in_role,
        connections,
        is_decision_maker: is_decision_maker(job_title),
        source: SIMULATED_SOURCE.to_string(),
    }
}

/// Render a profile as the text block handed to the reasoner.
pub fn format_profile(profile: &LeadProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LinkedIn Profile for {}:", profile.lead_name);
    let _ = writeln!(out, "  Job Title: {}", profile.job_title);
    let _ = writeln!(out, "  Seniority: {}", profile.seniority);
    let _ = writeln!(out, "  Industry: {}", profile.industry);
    let _ = writeln!(out, "  Company Size: {} employees", profile.company_size);
    let _ = writeln!(out, "  Years in Role: {}", profile.years_in_role);
    let _ = writeln!(
        out,
        "  Decision Maker: {}",
        if profile.is_decision_maker { "Yes" } else { "No" }
    );
    let _ = writeln!(out, "  LinkedIn Connections: {}", profile.connections);
    out
}

/// [`ProfileProvider`] backed by [`lookup_profile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedProfiles;

#[async_trait]
impl ProfileProvider for SimulatedProfiles {
    async fn lookup(&self, lead_name: &str) -> Result<LeadProfile> {
        Ok(lookup_profile(lead_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::profile::Seniority;
    use proptest::prelude::*;

    #[test]
    fn test_lookup_is_deterministic() {
        let a = lookup_profile("Sarah Johnson");
        let b = lookup_profile("Sarah Johnson");
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_ignores_case() {
        assert_eq!(seed_for_name("Sarah Johnson"), seed_for_name("SARAH JOHNSON"));
        assert!(seed_for_name("Sarah Johnson") < 10_000);

        // Only the seed is case-folded; the name is echoed as given
        let upper = lookup_profile("SARAH JOHNSON");
        let lower = lookup_profile("sarah johnson");
        assert_eq!(upper.job_title, lower.job_title);
        assert_eq!(upper.connections, lower.connections);
        assert_eq!(upper.lead_name, "SARAH JOHNSON");
    }

    #[test]
    fn test_profile_fields_in_range() {
        for name in ["Sarah Johnson", "David Park", "Emma Wilson", "Carlos Mendez", "Nina Patel", ""] {
            let p = lookup_profile(name);
            assert!(JOB_TITLES.contains(&p.job_title.as_str()));
            assert!(INDUSTRIES.contains(&p.industry.as_str()));
            assert!(COMPANY_SIZES.contains(&p.company_size.as_str()));
            assert!((1..=12).contains(&p.years_in_role));
            assert!((200..=4000).contains(&p.connections));
            assert_eq!(p.is_decision_maker, is_decision_maker(&p.job_title));
            assert_eq!(p.seniority, seniority_for_title(&p.job_title));
            assert_eq!(p.source, SIMULATED_SOURCE);
        }
    }

    #[test]
    fn test_format_profile_block() {
        let profile = LeadProfile {
            lead_name: "Nina Patel".into(),
            job_title: "CEO".into(),
            industry: "SaaS".into(),
            company_size: "51-200".into(),
            seniority: Seniority::CSuite,
            years_in_role: 4,
            connections: 1200,
            is_decision_maker: true,
            source: SIMULATED_SOURCE.into(),
        };

        assert_eq!(
            format_profile(&profile),
            "LinkedIn Profile for Nina Patel:\n  Job Title: CEO\n  Seniority: C-Suite\n  \
             Industry: SaaS\n  Company Size: 51-200 employees\n  Years in Role: 4\n  \
             Decision Maker: Yes\n  LinkedIn Connections: 1200\n"
        );
    }

    #[tokio::test]
    async fn test_simulated_provider_matches_pure_lookup() {
        let profile = SimulatedProfiles.lookup("Emma Wilson").await.unwrap();
        assert_eq!(profile, lookup_profile("Emma Wilson"));
    }

    proptest! {
        #[test]
        fn prop_lookup_is_deterministic(name in "\\PC{0,40}") {
            let first = lookup_profile(&name);
            prop_assert_eq!(&first, &lookup_profile(&name));
            prop_assert!(seed_for_name(&name) < 10_000);
            prop_assert_eq!(first.lead_name, name);
        }
    }
}
