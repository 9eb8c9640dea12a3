use bootcheck_common::config::{EnvFacts, Field, NetworkConfig, NetworkConfigBuilder};
use bootcheck_common::network::Protocol;
use bootcheck_core::report::Severity;
use bootcheck_core::validate;

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

fn non_root() -> EnvFacts {
    EnvFacts::new(false)
}

#[test]
fn valid_config_has_no_errors() {
    let report = validate(&baseline().build(), &non_root());

    assert!(report.is_valid());
    assert_eq!(report.error_count(), 0);
}

#[test]
fn host_inside_dhcp_pool() {
    let report = validate(&baseline().host_ip("192.168.1.150").build(), &non_root());

    assert!(!report.is_valid());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, Field::HostIp);
    assert!(errors[0].message.contains("DHCP range"));
}

#[test]
fn dhcp_end_outside_subnet() {
    let config = baseline()
        .dhcp_range("192.168.1.100", "10.0.0.200")
        .build();
    let report = validate(&config, &non_root());

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, Field::DhcpRangeEnd);
}

#[test]
fn malformed_cidr_reports_and_continues() {
    let report = validate(&baseline().subnet_cidr("192.168.1.0").build(), &non_root());

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, Field::SubnetCidr);

    // the remaining rules still ran: a pool conflict is still caught
    let config = baseline()
        .subnet_cidr("192.168.1.0")
        .host_ip("192.168.1.150")
        .build();
    let report = validate(&config, &non_root());
    assert_eq!(report.error_count(), 2);
}

#[test]
fn privileged_port_without_root() {
    let report = validate(&baseline().http_port(80).build(), &non_root());

    assert!(report.is_valid());
    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert_eq!(warnings[0].field, Field::HttpPort);
}

#[test]
fn every_independent_fault_is_reported() {
    let config = NetworkConfig::builder()
        .subnet_cidr("192.168.1.0/33")
        .host_ip("192.168.1.300")
        .gateway_ip("gateway")
        .dns_primary("8.8.8")
        .dns_secondary("8.8.4.4.4")
        .dhcp_range("192.168.1.x", "")
        .http_port(0)
        .tftp_port(70000)
        .build();
    let facts = EnvFacts::new(false).with_bound(6969, Protocol::Udp);
    let report = validate(&config, &facts);

    assert_eq!(report.error_count(), 9);
    assert_eq!(report.warning_count(), 0);
    for field in Field::ALL {
        assert_eq!(report.issues_for(field).count(), 1, "{field} should be reported once");
    }
}
