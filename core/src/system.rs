//! Host fact gathering.
//!
//! [`LocalSystem`] looks at the machine it runs on: the effective UID and,
//! for each requested `(port, protocol)`, whether another process already
//! holds it. A port counts as held only when binding it fails with
//! `AddrInUse`; a permission failure is left to the privileged-port rule.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddrV4};

use async_trait::async_trait;
use bootcheck_common::config::EnvFacts;
use bootcheck_common::network::{PortBinding, Protocol};
use bootcheck_common::system::SystemFacts;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
pub struct LocalSystem {
    probe_ports: bool,
    assume_root: bool,
}

impl LocalSystem {
    pub fn new() -> Self {
        Self {
            probe_ports: true,
            assume_root: false,
        }
    }

    /// Reports every port as free instead of probing.
    pub fn without_port_probes(mut self) -> Self {
        self.probe_ports = false;
        self
    }

    /// Reports root privileges whatever the effective UID is.
    pub fn assume_root(mut self) -> Self {
        self.assume_root = true;
        self
    }
}

impl Default for LocalSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemFacts for LocalSystem {
    async fn gather(&self, probes: &[PortBinding]) -> anyhow::Result<EnvFacts> {
        let is_root: bool = self.assume_root || is_root::is_root();
        let probes: &[PortBinding] = if self.probe_ports { probes } else { &[] };

        let mut tasks: JoinSet<anyhow::Result<Option<PortBinding>>> = JoinSet::new();
        for binding in probes.iter().copied() {
            tasks.spawn(async move {
                let in_use: bool = is_in_use(binding).await?;
                Ok(in_use.then_some(binding))
            });
        }

        let mut bound_ports: BTreeSet<PortBinding> = BTreeSet::new();
        while let Some(joined) = tasks.join_next().await {
            if let Some(binding) = joined?? {
                bound_ports.insert(binding);
            }
        }

        debug!(is_root, bound = bound_ports.len(), "gathered local system facts");
        Ok(EnvFacts { is_root, bound_ports })
    }
}

/// Facts fixed up front instead of probed.
#[derive(Debug, Clone, Default)]
pub struct StaticFacts {
    facts: EnvFacts,
}

impl StaticFacts {
    pub fn new(facts: EnvFacts) -> Self {
        Self { facts }
    }
}

#[async_trait]
impl SystemFacts for StaticFacts {
    async fn gather(&self, _probes: &[PortBinding]) -> anyhow::Result<EnvFacts> {
        Ok(self.facts.clone())
    }
}

async fn is_in_use(binding: PortBinding) -> anyhow::Result<bool> {
    let addr: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, binding.port);

    let result: std::io::Result<()> = match binding.protocol {
        Protocol::Tcp => TcpListener::bind(addr).await.map(drop),
        Protocol::Udp => UdpSocket::bind(addr).await.map(drop),
    };

    match result {
        Ok(()) => Ok(false),
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            trace!("{binding} is already bound");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            trace!("not allowed to probe {binding}");
            Ok(false)
        }
        Err(e) => Err(anyhow::anyhow!("probing {binding} failed: {e}")),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
