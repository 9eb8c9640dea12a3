//! The boundary through which host facts reach the validator.

use async_trait::async_trait;

use crate::config::EnvFacts;
use crate::network::port::PortBinding;

/// Collects an [`EnvFacts`] snapshot from wherever facts come from.
#[async_trait]
pub trait SystemFacts: Send + Sync {
    /// Gathers the privilege level and which of `probes` are already taken.
    async fn gather(&self, probes: &[PortBinding]) -> anyhow::Result<EnvFacts>;
}
