//! # Network Primitives
//!
//! IPv4 arithmetic used by the validator. Every address is handled as its
//! big-endian `u32` encoding (see [`addr::ip_to_int`]).

pub mod addr;
pub mod cidr;
pub mod port;
pub mod range;

pub use addr::{ip_to_int, parse_ip};
pub use cidr::{PrefixPolicy, Subnet, is_in_subnet, parse_cidr, parse_cidr_with};
pub use port::{PortBinding, Protocol, parse_port};
pub use range::{Ipv4Range, is_in_range};
