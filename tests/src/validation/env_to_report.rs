use std::io::Write;

use bootcheck_common::config::{EnvFacts, Field};
use bootcheck_common::network::Protocol;
use bootcheck_core::env_file;
use bootcheck_core::preflight::PreflightService;
use bootcheck_core::system::StaticFacts;
use tempfile::NamedTempFile;

fn env_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn env_file_through_preflight() {
    let file = env_file(
        "# lab netboot\n\
         SUBNET=10.20.0.0/16\n\
         HOST_IP=10.20.0.5\n\
         GATEWAY=10.20.0.1\n\
         DNS_PRIMARY=10.20.0.1\n\
         DNS_SECONDARY=1.1.1.1\n\
         DHCP_RANGE_START=10.20.1.0\n\
         DHCP_RANGE_END=10.20.1.255\n",
    );
    let config = env_file::load_from_path(file.path()).unwrap();

    let facts = EnvFacts::new(false).with_bound(8080, Protocol::Tcp);
    let outcome = PreflightService::new(Box::new(StaticFacts::new(facts)))
        .run(&config)
        .await
        .unwrap();

    // default ports: 8080 is taken, 69 is privileged
    assert!(outcome.report.is_valid());
    let warned: Vec<Field> = outcome.report.warnings().map(|issue| issue.field).collect();
    assert_eq!(warned, vec![Field::TftpPort, Field::HttpPort]);
}

#[tokio::test]
async fn empty_env_file_reports_every_required_field() {
    let file = env_file("# nothing configured yet\n");
    let config = env_file::load_from_path(file.path()).unwrap();

    let outcome = PreflightService::new(Box::new(StaticFacts::new(EnvFacts::new(true))))
        .run(&config)
        .await
        .unwrap();

    let missing: Vec<Field> = outcome.report.errors().map(|issue| issue.field).collect();
    assert_eq!(
        missing,
        vec![
            Field::SubnetCidr,
            Field::HostIp,
            Field::GatewayIp,
            Field::DnsPrimary,
            Field::DhcpRangeStart,
            Field::DhcpRangeEnd,
        ]
    );
}

#[test]
fn overlay_lets_later_values_win() {
    let file = env_file("HOST_IP=192.168.1.150\nSUBNET=192.168.1.0/24\n");
    let mut pairs = env_file::read_pairs_from_path(file.path()).unwrap();
    pairs.push(("HOST_IP".to_string(), "192.168.1.10".to_string()));

    let config = env_file::from_pairs(pairs);
    assert_eq!(config.host_ip.as_deref(), Some("192.168.1.10"));
    assert_eq!(config.subnet_cidr.as_deref(), Some("192.168.1.0/24"));
}
