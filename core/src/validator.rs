//! # Network Configuration Validator
//!
//! A total, side-effect free check of a [`NetworkConfig`] against an
//! [`EnvFacts`] snapshot.
//!
//! Every rule runs regardless of what earlier rules found, so a single call
//! surfaces every problem. Relational rules (subnet membership, pool overlap)
//! only look at values that parsed; a value that did not parse has already
//! been reported once.

use std::net::Ipv4Addr;

use bootcheck_common::config::{EnvFacts, Field, NetworkConfig};
use bootcheck_common::error::ParseError;
use bootcheck_common::network::{
    PortBinding, PrefixPolicy, Protocol, Subnet, is_in_range, is_in_subnet, parse_cidr_with,
    parse_ip, parse_port,
};
use tracing::debug;

use crate::report::ValidationReport;

/// The values that survived parsing.
#[derive(Debug, Default)]
struct Parsed {
    subnet: Option<Subnet>,
    host: Option<Ipv4Addr>,
    dhcp_start: Option<Ipv4Addr>,
    dhcp_end: Option<Ipv4Addr>,
    http_port: Option<u16>,
    tftp_port: Option<u16>,
}

/// Validates `config` with [`PrefixPolicy::DEFAULT`].
pub fn validate(config: &NetworkConfig, facts: &EnvFacts) -> ValidationReport {
    validate_with(config, facts, PrefixPolicy::DEFAULT)
}

/// Validates `config`, accepting subnet prefixes allowed by `policy`.
pub fn validate_with(
    config: &NetworkConfig,
    facts: &EnvFacts,
    policy: PrefixPolicy,
) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::new();
    let mut parsed: Parsed = Parsed::default();

    check_syntax(config, policy, &mut parsed, &mut report);
    check_host_in_subnet(&parsed, &mut report);
    check_pool_in_subnet(&parsed, &mut report);
    check_host_outside_pool(&parsed, &mut report);
    check_ports(config, facts, &mut parsed, &mut report);
    check_ports_in_use(&parsed, facts, &mut report);

    debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "network configuration validated"
    );
    report
}

fn check_syntax(
    config: &NetworkConfig,
    policy: PrefixPolicy,
    parsed: &mut Parsed,
    report: &mut ValidationReport,
) {
    parsed.subnet = required(config, Field::SubnetCidr, report, |s| parse_cidr_with(s, policy));
    parsed.host = required(config, Field::HostIp, report, parse_ip);
    required(config, Field::GatewayIp, report, parse_ip);
    required(config, Field::DnsPrimary, report, parse_ip);
    parsed.dhcp_start = required(config, Field::DhcpRangeStart, report, parse_ip);
    parsed.dhcp_end = required(config, Field::DhcpRangeEnd, report, parse_ip);

    if let Some(text) = config.get(Field::DnsSecondary) {
        parse_or_report(Field::DnsSecondary, text, report, parse_ip);
    }
}

fn check_host_in_subnet(parsed: &Parsed, report: &mut ValidationReport) {
    let (Some(subnet), Some(host)) = (&parsed.subnet, parsed.host) else {
        return;
    };
    if !is_in_subnet(host, subnet) {
        report.error(
            Field::HostIp,
            format!("host address {host} is not inside subnet {subnet}"),
        );
    }
}

fn check_pool_in_subnet(parsed: &Parsed, report: &mut ValidationReport) {
    let Some(subnet) = &parsed.subnet else {
        return;
    };

    let endpoints: [(Field, Option<Ipv4Addr>); 2] = [
        (Field::DhcpRangeStart, parsed.dhcp_start),
        (Field::DhcpRangeEnd, parsed.dhcp_end),
    ];
    for (field, addr) in endpoints {
        if let Some(addr) = addr
            && !is_in_subnet(addr, subnet)
        {
            report.error(
                field,
                format!("DHCP range endpoint {addr} is not inside subnet {subnet}"),
            );
        }
    }
}

fn check_host_outside_pool(parsed: &Parsed, report: &mut ValidationReport) {
    let (Some(host), Some(start), Some(end)) = (parsed.host, parsed.dhcp_start, parsed.dhcp_end)
    else {
        return;
    };
    if is_in_range(host, start, end) {
        report.error(
            Field::HostIp,
            format!("host address {host} conflicts with DHCP range {start}-{end}"),
        );
    }
}

fn check_ports(
    config: &NetworkConfig,
    facts: &EnvFacts,
    parsed: &mut Parsed,
    report: &mut ValidationReport,
) {
    parsed.http_port = required(config, Field::HttpPort, report, parse_port);
    parsed.tftp_port = required(config, Field::TftpPort, report, parse_port);

    if facts.is_root {
        return;
    }
    for (field, binding) in service_bindings(parsed) {
        if binding.is_privileged() {
            report.warning(
                field,
                format!("port {} requires elevated privilege to bind", binding.port),
            );
        }
    }
}

fn check_ports_in_use(parsed: &Parsed, facts: &EnvFacts, report: &mut ValidationReport) {
    for (field, binding) in service_bindings(parsed) {
        if facts.is_bound(&binding) {
            report.warning(field, format!("port {binding} appears to be in use"));
        }
    }
}

/// HTTP is served over TCP, TFTP over UDP.
pub fn service_bindings_for(http_port: Option<u16>, tftp_port: Option<u16>) -> Vec<(Field, PortBinding)> {
    let http = http_port.map(|port| (Field::HttpPort, PortBinding::new(port, Protocol::Tcp)));
    let tftp = tftp_port.map(|port| (Field::TftpPort, PortBinding::new(port, Protocol::Udp)));
    http.into_iter().chain(tftp).collect()
}

fn service_bindings(parsed: &Parsed) -> Vec<(Field, PortBinding)> {
    service_bindings_for(parsed.http_port, parsed.tftp_port)
}

fn required<T>(
    config: &NetworkConfig,
    field: Field,
    report: &mut ValidationReport,
    parse: impl Fn(&str) -> Result<T, ParseError>,
) -> Option<T> {
    match config.get(field) {
        Some(text) => parse_or_report(field, text, report, parse),
        None => {
            report.error(field, format!("{} is not set", field.env_key()));
            None
        }
    }
}

fn parse_or_report<T>(
    field: Field,
    text: &str,
    report: &mut ValidationReport,
    parse: impl Fn(&str) -> Result<T, ParseError>,
) -> Option<T> {
    match parse(text) {
        Ok(value) => Some(value),
        Err(e) => {
            report.error(field, format!("invalid value '{}': {e}", text.trim()));
            None
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use bootcheck_common::config::NetworkConfigBuilder;

    fn baseline() -> NetworkConfigBuilder {
        NetworkConfig::builder()
            .subnet_cidr("192.168.1.0/24")
            .host_ip("192.168.1.10")
            .gateway_ip("192.168.1.1")
            .dns_primary("8.8.8.8")
            .dhcp_range("192.168.1.100", "192.168.1.200")
            .http_port(8080)
            .tftp_port(6969)
    }

    fn user() -> EnvFacts {
        EnvFacts::new(false)
    }

    #[test]
    fn test_valid_config() {
        let report = validate(&baseline().build(), &user());
        assert!(report.is_valid());
        assert!(report.is_empty(), "unexpected issues: {:?}", report.issues());
    }

    #[test]
    fn test_host_inside_dhcp_pool() {
        let config = baseline().host_ip("192.168.1.150").build();
        let report = validate(&config, &user());

        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.field, Field::HostIp);
        assert!(issue.message.contains("conflicts with DHCP range"));
    }

    #[test]
    fn test_host_on_pool_boundaries() {
        for host in ["192.168.1.100", "192.168.1.200"] {
            let report = validate(&baseline().host_ip(host).build(), &user());
            assert_eq!(report.error_count(), 1, "{host} should conflict");
        }
        for host in ["192.168.1.99", "192.168.1.201"] {
            let report = validate(&baseline().host_ip(host).build(), &user());
            assert!(report.is_valid(), "{host} should not conflict");
        }
    }

    #[test]
    fn test_dhcp_end_outside_subnet() {
        let config = baseline()
            .dhcp_range("192.168.1.100", "10.0.0.200")
            .build();
        let report = validate(&config, &user());

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.issues()[0].field, Field::DhcpRangeEnd);
    }

    #[test]
    fn test_both_dhcp_endpoints_reported_separately() {
        let config = baseline().dhcp_range("10.0.0.100", "10.0.0.200").build();
        let report = validate(&config, &user());

        let fields: Vec<Field> = report.errors().map(|issue| issue.field).collect();
        assert_eq!(fields, vec![Field::DhcpRangeStart, Field::DhcpRangeEnd]);
    }

    #[test]
    fn test_host_outside_subnet() {
        let report = validate(&baseline().host_ip("192.168.2.10").build(), &user());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.issues()[0].field, Field::HostIp);
        assert!(report.issues()[0].message.contains("not inside subnet"));
    }

    #[test]
    fn test_malformed_cidr_still_checks_other_fields() {
        let config = baseline()
            .subnet_cidr("192.168.1.0")
            .host_ip("192.168.1.150")
            .http_port(0)
            .build();
        let report = validate(&config, &user());

        let fields: Vec<Field> = report.errors().map(|issue| issue.field).collect();
        assert_eq!(fields, vec![Field::SubnetCidr, Field::HostIp, Field::HttpPort]);
    }

    #[test]
    fn test_malformed_cidr_alone() {
        let report = validate(&baseline().subnet_cidr("192.168.1.0").build(), &user());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.issues()[0].field, Field::SubnetCidr);
    }

    #[test]
    fn test_prefix_policy() {
        let config = baseline().subnet_cidr("192.168.1.0/31").build();
        let report = validate(&config, &user());
        assert_eq!(report.issues_for(Field::SubnetCidr).count(), 1);

        let config = baseline().subnet_cidr("192.168.0.0/16").build();
        let narrow = PrefixPolicy::new(20..=30);
        let report = validate_with(&config, &user(), narrow);
        assert_eq!(report.issues_for(Field::SubnetCidr).count(), 1);
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let report = validate(&NetworkConfig::default(), &user());

        let fields: Vec<Field> = report.errors().map(|issue| issue.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::SubnetCidr,
                Field::HostIp,
                Field::GatewayIp,
                Field::DnsPrimary,
                Field::DhcpRangeStart,
                Field::DhcpRangeEnd,
                Field::HttpPort,
                Field::TftpPort,
            ]
        );
        assert!(report.issues()[0].message.contains("SUBNET is not set"));
    }

    #[test]
    fn test_dns_secondary_optional() {
        let report = validate(&baseline().build(), &user());
        assert_eq!(report.issues_for(Field::DnsSecondary).count(), 0);

        let report = validate(&baseline().dns_secondary("1.1.1.1").build(), &user());
        assert!(report.is_valid());

        let report = validate(&baseline().dns_secondary("1.1.1").build(), &user());
        assert_eq!(report.issues_for(Field::DnsSecondary).count(), 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_malformed_gateway_and_dns() {
        let config = baseline()
            .gateway_ip("192.168.1.1.1")
            .dns_primary("dns.example")
            .build();
        let report = validate(&config, &user());
        assert_eq!(report.error_count(), 2);
    }

    #[test]
    fn test_privileged_port_without_root() {
        let config = baseline().http_port(80).build();
        let report = validate(&config, &user());

        assert!(report.is_valid());
        assert_eq!(report.len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.field, Field::HttpPort);
    }

    #[test]
    fn test_privileged_port_as_root() {
        let config = baseline().http_port(80).tftp_port(69).build();
        let report = validate(&config, &EnvFacts::new(true));
        assert!(report.is_empty());
    }

    #[test]
    fn test_port_range() {
        let config = baseline().http_port(65536).tftp_port("sixty-nine").build();
        let report = validate(&config, &user());

        let fields: Vec<Field> = report.errors().map(|issue| issue.field).collect();
        assert_eq!(fields, vec![Field::HttpPort, Field::TftpPort]);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_port_in_use_is_warning() {
        let facts = EnvFacts::new(false)
            .with_bound(8080, Protocol::Tcp)
            .with_bound(6969, Protocol::Udp);
        let report = validate(&baseline().build(), &facts);

        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 2);
        assert!(report.warnings().all(|issue| issue.message.contains("appears to be in use")));
    }

    #[test]
    fn test_port_in_use_matches_protocol() {
        let facts = EnvFacts::new(false)
            .with_bound(8080, Protocol::Udp)
            .with_bound(6969, Protocol::Tcp);
        let report = validate(&baseline().build(), &facts);
        assert!(report.is_empty());
    }

    #[test]
    fn test_privileged_and_bound_yield_two_warnings() {
        let facts = EnvFacts::new(false).with_bound(69, Protocol::Udp);
        let report = validate(&baseline().tftp_port(69).build(), &facts);

        assert!(report.is_valid());
        let fields: Vec<Field> = report.warnings().map(|issue| issue.field).collect();
        assert_eq!(fields, vec![Field::TftpPort, Field::TftpPort]);
    }

    #[test]
    fn test_reversed_pool_is_empty() {
        let config = baseline()
            .host_ip("192.168.1.150")
            .dhcp_range("192.168.1.200", "192.168.1.100")
            .build();
        let report = validate(&config, &user());
        assert!(report.is_valid());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let config = baseline().host_ip("192.168.1.150").http_port(80).build();
        let facts = EnvFacts::new(false).with_bound(80, Protocol::Tcp);
        assert_eq!(validate(&config, &facts), validate(&config, &facts));
    }

    #[test]
    fn test_service_bindings_for() {
        let bindings = service_bindings_for(Some(8080), Some(69));
        assert_eq!(
            bindings,
            vec![
                (Field::HttpPort, PortBinding::tcp(8080)),
                (Field::TftpPort, PortBinding::udp(69)),
            ]
        );
        assert!(service_bindings_for(None, None).is_empty());
    }
}
