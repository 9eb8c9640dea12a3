//! # IPv4 Range Model
//!
//! An inclusive run of addresses such as a DHCP pool (`192.168.1.100` to
//! `192.168.1.200`).
//!
//! A range whose start lies above its end is **empty**: it contains nothing
//! and [`Ipv4Range::len`] is zero. Reversed pools are not rejected here.

use std::net::Ipv4Addr;

use crate::network::addr::ip_to_int;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        is_in_range(ip, self.start_addr, self.end_addr)
    }

    pub fn is_empty(&self) -> bool {
        ip_to_int(self.start_addr) > ip_to_int(self.end_addr)
    }

    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        u64::from(ip_to_int(self.end_addr)) - u64::from(ip_to_int(self.start_addr)) + 1
    }
}

/// Inclusive at both ends. Always false when `start > end`.
pub fn is_in_range(ip: Ipv4Addr, start: Ipv4Addr, end: Ipv4Addr) -> bool {
    let ip: u32 = ip_to_int(ip);
    ip_to_int(start) <= ip && ip <= ip_to_int(end)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
