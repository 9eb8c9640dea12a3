//! # CIDR Subnets
//!
//! Parses `address/prefix` notation and answers containment questions.
//!
//! Only prefixes inside a [`PrefixPolicy`] are accepted. The default policy,
//! `/8` to `/30`, is the range that makes sense for a boot network: anything
//! wider is not a LAN, anything narrower leaves no room for a DHCP pool.

use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ParseError;
use crate::network::addr::{ip_to_int, parse_ip};

/// Inclusive range of prefix lengths accepted by [`parse_cidr_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixPolicy {
    pub min: u8,
    pub max: u8,
}

impl PrefixPolicy {
    pub const DEFAULT: PrefixPolicy = PrefixPolicy { min: 8, max: 30 };

    pub fn new(range: RangeInclusive<u8>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }

    pub fn allows(&self, prefix: u32) -> bool {
        u32::from(self.min) <= prefix && prefix <= u32::from(self.max)
    }
}

impl Default for PrefixPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An IPv4 block in CIDR notation.
///
/// `address` is kept exactly as written (host bits included); use
/// [`Subnet::network`] for the masked network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    pub address: Ipv4Addr,
    pub prefix: u8,
}

impl Subnet {
    pub fn mask(&self) -> u32 {
        prefix_mask(self.prefix)
    }

    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(ip_to_int(self.address) & self.mask())
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(ip_to_int(self.address) | !self.mask())
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask())
    }

    /// Number of addresses in the block, network and broadcast included.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix.min(32)))
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        is_in_subnet(ip, self)
    }
}

impl From<Ipv4Network> for Subnet {
    fn from(net: Ipv4Network) -> Self {
        Self {
            address: net.ip(),
            prefix: net.prefix(),
        }
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

impl FromStr for Subnet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

/// Parses `a.b.c.d/n` under [`PrefixPolicy::DEFAULT`].
pub fn parse_cidr(text: &str) -> Result<Subnet, ParseError> {
    parse_cidr_with(text, PrefixPolicy::DEFAULT)
}

/// Parses `a.b.c.d/n`. The prefix is mandatory and must be allowed by `policy`.
pub fn parse_cidr_with(text: &str, policy: PrefixPolicy) -> Result<Subnet, ParseError> {
    let text: &str = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let Some((ip_str, prefix_str)) = text.split_once('/') else {
        return Err(ParseError::MissingPrefix(text.to_string()));
    };

    let address: Ipv4Addr = parse_ip(ip_str)?;

    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPrefix(prefix_str.to_string()));
    }
    let prefix: u32 = prefix_str
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidPrefix(prefix_str.to_string()))?;

    if !policy.allows(prefix) {
        return Err(ParseError::PrefixOutOfRange {
            prefix,
            min: policy.min,
            max: policy.max,
        });
    }

    // `allows` bounds the prefix by a u8
    let prefix: u8 = prefix as u8;
    Ok(Subnet { address, prefix })
}

/// True iff `ip` shares the subnet's network bits.
pub fn is_in_subnet(ip: Ipv4Addr, subnet: &Subnet) -> bool {
    let mask: u32 = subnet.mask();
    ip_to_int(ip) & mask == ip_to_int(subnet.address) & mask
}

fn prefix_mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - u32::from(p)),
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
