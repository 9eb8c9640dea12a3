//! # Configuration Records
//!
//! [`NetworkConfig`] holds the netboot settings exactly as they were read,
//! before any parsing, so that a missing value and a malformed value can both
//! be reported. [`EnvFacts`] is the snapshot of the host the checks run on.

use std::collections::BTreeSet;
use std::fmt;

use crate::network::port::{PortBinding, Protocol};

/// Runtime options shared by the commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Skips probing the local system for bound ports.
    pub no_probe: bool,
    /// Treats the current user as root regardless of the effective UID.
    pub assume_root: bool,
    /// 0 prints everything, 1 hides headers, 2 prints errors only.
    pub quiet: u8,
}

impl Config {
    /// Progress lines are dropped at `-qq`, where only problems are printed.
    pub fn shows_progress(&self) -> bool {
        self.quiet < 2
    }
}

/// Identifies a single setting of a [`NetworkConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    SubnetCidr,
    HostIp,
    GatewayIp,
    DnsPrimary,
    DnsSecondary,
    DhcpRangeStart,
    DhcpRangeEnd,
    HttpPort,
    TftpPort,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::SubnetCidr,
        Field::HostIp,
        Field::GatewayIp,
        Field::DnsPrimary,
        Field::DnsSecondary,
        Field::DhcpRangeStart,
        Field::DhcpRangeEnd,
        Field::HttpPort,
        Field::TftpPort,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::SubnetCidr => "subnetCidr",
            Field::HostIp => "hostIp",
            Field::GatewayIp => "gatewayIp",
            Field::DnsPrimary => "dnsPrimary",
            Field::DnsSecondary => "dnsSecondary",
            Field::DhcpRangeStart => "dhcpRangeStart",
            Field::DhcpRangeEnd => "dhcpRangeEnd",
            Field::HttpPort => "httpPort",
            Field::TftpPort => "tftpPort",
        }
    }

    /// The `.env` key this field is read from.
    pub fn env_key(&self) -> &'static str {
        match self {
            Field::SubnetCidr => "SUBNET",
            Field::HostIp => "HOST_IP",
            Field::GatewayIp => "GATEWAY",
            Field::DnsPrimary => "DNS_PRIMARY",
            Field::DnsSecondary => "DNS_SECONDARY",
            Field::DhcpRangeStart => "DHCP_RANGE_START",
            Field::DhcpRangeEnd => "DHCP_RANGE_END",
            Field::HttpPort => "HTTP_PORT",
            Field::TftpPort => "TFTP_PORT",
        }
    }

    pub fn from_env_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.env_key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw netboot network settings.
///
/// Built once (usually by the `.env` loader) and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    pub subnet_cidr: Option<String>,
    pub host_ip: Option<String>,
    pub gateway_ip: Option<String>,
    pub dns_primary: Option<String>,
    pub dns_secondary: Option<String>,
    pub dhcp_range_start: Option<String>,
    pub dhcp_range_end: Option<String>,
    pub http_port: Option<String>,
    pub tftp_port: Option<String>,
}

impl NetworkConfig {
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let value: &Option<String> = match field {
            Field::SubnetCidr => &self.subnet_cidr,
            Field::HostIp => &self.host_ip,
            Field::GatewayIp => &self.gateway_ip,
            Field::DnsPrimary => &self.dns_primary,
            Field::DnsSecondary => &self.dns_secondary,
            Field::DhcpRangeStart => &self.dhcp_range_start,
            Field::DhcpRangeEnd => &self.dhcp_range_end,
            Field::HttpPort => &self.http_port,
            Field::TftpPort => &self.tftp_port,
        };
        value.as_deref()
    }
}

/// Assembles a [`NetworkConfig`]. Empty values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct NetworkConfigBuilder {
    inner: NetworkConfig,
}

impl NetworkConfigBuilder {
    pub fn set(mut self, field: Field, value: impl Into<String>) -> Self {
        let value: String = value.into();
        let value: Option<String> = if value.trim().is_empty() { None } else { Some(value) };

        let slot: &mut Option<String> = match field {
            Field::SubnetCidr => &mut self.inner.subnet_cidr,
            Field::HostIp => &mut self.inner.host_ip,
            Field::GatewayIp => &mut self.inner.gateway_ip,
            Field::DnsPrimary => &mut self.inner.dns_primary,
            Field::DnsSecondary => &mut self.inner.dns_secondary,
            Field::DhcpRangeStart => &mut self.inner.dhcp_range_start,
            Field::DhcpRangeEnd => &mut self.inner.dhcp_range_end,
            Field::HttpPort => &mut self.inner.http_port,
            Field::TftpPort => &mut self.inner.tftp_port,
        };
        *slot = value;
        self
    }

    pub fn unset(self, field: Field) -> Self {
        self.set(field, String::new())
    }

    pub fn subnet_cidr(self, value: impl Into<String>) -> Self {
        self.set(Field::SubnetCidr, value)
    }

    pub fn host_ip(self, value: impl Into<String>) -> Self {
        self.set(Field::HostIp, value)
    }

    pub fn gateway_ip(self, value: impl Into<String>) -> Self {
        self.set(Field::GatewayIp, value)
    }

    pub fn dns_primary(self, value: impl Into<String>) -> Self {
        self.set(Field::DnsPrimary, value)
    }

    pub fn dns_secondary(self, value: impl Into<String>) -> Self {
        self.set(Field::DnsSecondary, value)
    }

    pub fn dhcp_range(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.set(Field::DhcpRangeStart, start)
            .set(Field::DhcpRangeEnd, end)
    }

    pub fn http_port(self, value: impl ToString) -> Self {
        self.set(Field::HttpPort, value.to_string())
    }

    pub fn tftp_port(self, value: impl ToString) -> Self {
        self.set(Field::TftpPort, value.to_string())
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.inner.get(field).is_some()
    }

    pub fn build(self) -> NetworkConfig {
        self.inner
    }
}

/// What the host looked like when the check ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFacts {
    pub is_root: bool,
    pub bound_ports: BTreeSet<PortBinding>,
}

impl EnvFacts {
    pub fn new(is_root: bool) -> Self {
        Self {
            is_root,
            bound_ports: BTreeSet::new(),
        }
    }

    pub fn with_bound(mut self, port: u16, protocol: Protocol) -> Self {
        self.bound_ports.insert(PortBinding::new(port, protocol));
        self
    }

    pub fn is_bound(&self, binding: &PortBinding) -> bool {
        self.bound_ports.contains(binding)
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
