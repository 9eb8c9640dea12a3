use bootcheck_common::config::{Config, EnvFacts};
use bootcheck_common::network::PortBinding;
use bootcheck_common::system::SystemFacts;
use bootcheck_core::env_file::{DEFAULT_HTTP_PORT, DEFAULT_TFTP_PORT};
use bootcheck_core::system::LocalSystem;

use pnet::datalink::{self, NetworkInterface};

use crate::bprint;
use crate::terminal::{format, network_fmt, print};

pub async fn facts(ports: Vec<PortBinding>, cfg: &Config) -> anyhow::Result<()> {
    let probes: Vec<PortBinding> = if ports.is_empty() {
        vec![PortBinding::tcp(DEFAULT_HTTP_PORT), PortBinding::udp(DEFAULT_TFTP_PORT)]
    } else {
        ports
    };

    let facts: EnvFacts = LocalSystem::new().gather(&probes).await?;

    let probed: String = probes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ");
    print::aligned_line("probed", probed, 6);
    print::as_tree_one_level(format::facts_to_key_value_pair(&facts));

    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    let networks = network_fmt::interfaces_to_key_value_pair(&interfaces);
    if !networks.is_empty() {
        bprint!();
        print::print_status("local IPv4 networks");
        print::as_tree_one_level(networks);
    }
    print::end_of_program(cfg.quiet);
    Ok(())
}
