use std::net::Ipv4Addr;

use bootcheck_common::config::{EnvFacts, NetworkConfig};
use bootcheck_common::network::{PortBinding, Protocol};
use bootcheck_core::validate;
use proptest::prelude::*;

fn ip() -> impl Strategy<Value = String> {
    any::<u32>().prop_map(|n| Ipv4Addr::from(n).to_string())
}

fn maybe_garbage(valid: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    prop_oneof![
        3 => valid,
        1 => "[0-9./a-z]{0,18}",
    ]
}

prop_compose! {
    fn network_config()(
        subnet in maybe_garbage((ip(), 0u8..=34).prop_map(|(a, p)| format!("{a}/{p}"))),
        host in maybe_garbage(ip()),
        gateway in maybe_garbage(ip()),
        dns in maybe_garbage(ip()),
        start in maybe_garbage(ip()),
        end in maybe_garbage(ip()),
        http in maybe_garbage(any::<u32>().prop_map(|p| (p % 70_000).to_string())),
        tftp in maybe_garbage(any::<u32>().prop_map(|p| (p % 70_000).to_string())),
    ) -> NetworkConfig {
        NetworkConfig::builder()
            .subnet_cidr(subnet)
            .host_ip(host)
            .gateway_ip(gateway)
            .dns_primary(dns)
            .dhcp_range(start, end)
            .http_port(http)
            .tftp_port(tftp)
            .build()
    }
}

/// Letters or nothing: never a valid address, prefix or port.
fn fault() -> impl Strategy<Value = String> {
    "[a-z]{0,8}"
}

/// Either a value from `valid` or a known fault, flagged `true`.
fn with_fault(valid: impl Strategy<Value = String>) -> impl Strategy<Value = (String, bool)> {
    prop_oneof![
        valid.prop_map(|value| (value, false)),
        fault().prop_map(|value| (value, true)),
    ]
}

fn port() -> impl Strategy<Value = String> {
    (1u16..=u16::MAX).prop_map(|p| p.to_string())
}

prop_compose! {
    fn faulty_config()(
        subnet in with_fault((ip(), 8u8..=30).prop_map(|(a, p)| format!("{a}/{p}"))),
        host in with_fault(ip()),
        gateway in with_fault(ip()),
        dns in with_fault(ip()),
        dns_secondary in with_fault(ip()),
        start in with_fault(ip()),
        end in with_fault(ip()),
        http in with_fault(port()),
        tftp in with_fault(port()),
    ) -> (NetworkConfig, usize) {
        let fields = [&subnet, &host, &gateway, &dns, &dns_secondary, &start, &end, &http, &tftp];
        // an empty optional field is simply absent
        let faults: usize = fields.iter().filter(|(_, faulty)| *faulty).count()
            - usize::from(dns_secondary.1 && dns_secondary.0.is_empty());

        let config = NetworkConfig::builder()
            .subnet_cidr(subnet.0)
            .host_ip(host.0)
            .gateway_ip(gateway.0)
            .dns_primary(dns.0)
            .dns_secondary(dns_secondary.0)
            .dhcp_range(start.0, end.0)
            .http_port(http.0)
            .tftp_port(tftp.0)
            .build();
        (config, faults)
    }
}

prop_compose! {
    fn env_facts()(is_root in any::<bool>(), bound in prop::collection::btree_set((1u16..=2048, any::<bool>()), 0..6)) -> EnvFacts {
        let mut facts = EnvFacts::new(is_root);
        for (port, tcp) in bound {
            let protocol = if tcp { Protocol::Tcp } else { Protocol::Udp };
            facts.bound_ports.insert(PortBinding::new(port, protocol));
        }
        facts
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn validate_is_idempotent(config in network_config(), facts in env_facts()) {
        prop_assert_eq!(validate(&config, &facts), validate(&config, &facts));
    }

    #[test]
    fn every_fault_yields_an_error((config, faults) in faulty_config(), facts in env_facts()) {
        let report = validate(&config, &facts);
        prop_assert!(
            report.error_count() >= faults,
            "{} fault(s) but {} error(s): {:?}",
            faults,
            report.error_count(),
            report.issues()
        );
        prop_assert_eq!(report.is_valid(), faults == 0 && report.error_count() == 0);
    }

    #[test]
    fn validity_tracks_errors_only(config in network_config(), facts in env_facts()) {
        let report = validate(&config, &facts);
        prop_assert_eq!(report.is_valid(), report.error_count() == 0);
    }

    #[test]
    fn root_never_adds_warnings(config in network_config(), facts in env_facts()) {
        let mut as_root = facts.clone();
        as_root.is_root = true;
        let mut as_user = facts;
        as_user.is_root = false;

        let root_report = validate(&config, &as_root);
        let user_report = validate(&config, &as_user);
        prop_assert_eq!(root_report.error_count(), user_report.error_count());
        prop_assert!(root_report.warning_count() <= user_report.warning_count());
    }

    #[test]
    fn bound_ports_never_invalidate(config in network_config(), facts in env_facts()) {
        let idle = EnvFacts::new(facts.is_root);
        prop_assert_eq!(
            validate(&config, &facts).is_valid(),
            validate(&config, &idle).is_valid()
        );
    }
}
