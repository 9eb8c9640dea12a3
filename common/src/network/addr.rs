//! Dotted-quad IPv4 parsing.
//!
//! [`std::net::Ipv4Addr`]'s own parser is stricter than the `.env` files we
//! read (it refuses leading zeros such as `192.168.001.010`), so octets are
//! parsed by hand.

use std::net::Ipv4Addr;

use crate::error::ParseError;

const MAX_OCTET_DIGITS: usize = 3;

/// Parses `a.b.c.d` where every octet is an integer in `[0, 255]`.
///
/// Surrounding whitespace is ignored. A prefix (`/24`) is rejected here, use
/// [`crate::network::parse_cidr`] for that.
pub fn parse_ip(text: &str) -> Result<Ipv4Addr, ParseError> {
    let text: &str = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(ParseError::OctetCount(parts.len()));
    }

    let mut octets: [u8; 4] = [0; 4];
    for (slot, part) in octets.iter_mut().zip(parts) {
        *slot = parse_octet(part)?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Canonical big-endian encoding: `a*256^3 + b*256^2 + c*256 + d`.
pub fn ip_to_int(ip: Ipv4Addr) -> u32 {
    u32::from(ip)
}

fn parse_octet(part: &str) -> Result<u8, ParseError> {
    let well_formed: bool = !part.is_empty()
        && part.len() <= MAX_OCTET_DIGITS
        && part.bytes().all(|b| b.is_ascii_digit());

    if !well_formed {
        return Err(ParseError::InvalidOctet(part.to_string()));
    }

    part.parse::<u8>()
        .map_err(|_| ParseError::InvalidOctet(part.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
