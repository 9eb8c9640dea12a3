//! # Preflight Service
//!
//! Implements the "check before deploy" use case.
//!
//! Orchestrates the run by:
//! 1. working out which `(port, protocol)` pairs the config asks for,
//! 2. delegating fact gathering to a [`SystemFacts`] implementation,
//! 3. handing config and facts to the pure [`validator`](crate::validator).

use bootcheck_common::config::{EnvFacts, Field, NetworkConfig};
use bootcheck_common::network::{PortBinding, PrefixPolicy, parse_port};
use bootcheck_common::system::SystemFacts;
use tracing::debug;

use crate::report::ValidationReport;
use crate::validator::{service_bindings_for, validate_with};

pub struct PreflightService {
    facts: Box<dyn SystemFacts>,
    policy: PrefixPolicy,
}

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct PreflightOutcome {
    pub facts: EnvFacts,
    pub report: ValidationReport,
}

impl PreflightService {
    pub fn new(facts: Box<dyn SystemFacts>) -> Self {
        Self {
            facts,
            policy: PrefixPolicy::DEFAULT,
        }
    }

    pub fn with_policy(mut self, policy: PrefixPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn run(&self, config: &NetworkConfig) -> anyhow::Result<PreflightOutcome> {
        let probes: Vec<PortBinding> = probes_for(config);
        debug!("probing {} port(s)", probes.len());

        let facts: EnvFacts = self.facts.gather(&probes).await?;
        let report: ValidationReport = validate_with(config, &facts, self.policy);

        Ok(PreflightOutcome { facts, report })
    }
}

/// The service ports of `config` that parse. Unparsable ports are the
/// validator's concern and are not probed.
pub fn probes_for(config: &NetworkConfig) -> Vec<PortBinding> {
    let port = |field: Field| config.get(field).and_then(|text| parse_port(text).ok());

    service_bindings_for(port(Field::HttpPort), port(Field::TftpPort))
        .into_iter()
        .map(|(_, binding)| binding)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
