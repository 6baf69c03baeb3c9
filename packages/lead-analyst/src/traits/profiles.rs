//! Lead enrichment capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::profile::LeadProfile;

/// Looks up professional background for a lead by name.
///
/// The only shipped implementation is a deterministic simulator; a real
/// provider would sit behind this trait.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn lookup(&self, lead_name: &str) -> Result<LeadProfile>;
}
