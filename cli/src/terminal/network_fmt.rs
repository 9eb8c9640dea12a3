use bootcheck_common::network::{Ipv4Range, Subnet};
use colored::*;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

use crate::terminal::colors;

pub fn subnet_to_key_value_pair(subnet: &Subnet) -> Vec<(String, ColoredString)> {
    vec![
        (String::from("network"), cidr(subnet)),
        (String::from("netmask"), subnet.netmask().to_string().color(colors::IPV4_ADDR)),
        (String::from("broadcast"), subnet.broadcast().to_string().color(colors::IPV4_ADDR)),
        (String::from("addresses"), subnet.size().to_string().color(colors::ACCENT)),
    ]
}

pub fn range_to_key_value_pair(range: &Ipv4Range, subnet: &Subnet) -> Vec<(String, ColoredString)> {
    let bounds: ColoredString = format!("{}-{}", range.start_addr, range.end_addr).color(colors::IPV4_ADDR);
    let size: ColoredString = if range.is_empty() {
        "0 (start is above end)".color(colors::WARNING)
    } else {
        range.len().to_string().color(colors::ACCENT)
    };

    let fits = |inside: bool| if inside { "yes".color(colors::OK) } else { "no".color(colors::ERROR) };

    vec![
        (String::from("pool"), bounds),
        (String::from("size"), size),
        (String::from("start in net"), fits(subnet.contains(range.start_addr))),
        (String::from("end in net"), fits(subnet.contains(range.end_addr))),
    ]
}

/// One entry per IPv4 network of each non-loopback interface.
pub fn interfaces_to_key_value_pair(interfaces: &[NetworkInterface]) -> Vec<(String, ColoredString)> {
    interfaces
        .iter()
        .filter(|iface| !iface.is_loopback())
        .flat_map(|iface| {
            iface.ips.iter().filter_map(move |ip_network| match ip_network {
                IpNetwork::V4(ipv4_network) => {
                    Some((iface.name.clone(), cidr(&Subnet::from(*ipv4_network))))
                }
                IpNetwork::V6(_) => None,
            })
        })
        .collect()
}

fn cidr(subnet: &Subnet) -> ColoredString {
    let address: ColoredString = subnet.network().to_string().color(colors::IPV4_ADDR);
    let prefix: ColoredString = subnet.prefix.to_string().color(colors::IPV4_PREFIX);
    format!("{address}/{prefix}").color(colors::SEPARATOR)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
