use anyhow::Context;
use bootcheck_common::config::Config;
use bootcheck_common::network::{Ipv4Range, PrefixPolicy, Subnet, parse_cidr_with, parse_ip};

use crate::bprint;
use crate::terminal::{network_fmt, print};

pub fn inspect(cidr: &str, range: Option<&str>, any_prefix: bool, cfg: &Config) -> anyhow::Result<()> {
    let policy: PrefixPolicy = if any_prefix {
        PrefixPolicy::new(0..=32)
    } else {
        PrefixPolicy::DEFAULT
    };

    let subnet: Subnet =
        parse_cidr_with(cidr, policy).with_context(|| format!("invalid subnet '{cidr}'"))?;
    print::as_tree_one_level(network_fmt::subnet_to_key_value_pair(&subnet));

    if let Some(range) = range {
        let pool: Ipv4Range = parse_range(range)?;
        bprint!();
        print::as_tree_one_level(network_fmt::range_to_key_value_pair(&pool, &subnet));
    }

    print::end_of_program(cfg.quiet);
    Ok(())
}

/// Parses `START-END`.
fn parse_range(text: &str) -> anyhow::Result<Ipv4Range> {
    let Some((start, end)) = text.split_once('-') else {
        anyhow::bail!("expected START-END, got '{text}'");
    };
    let start = parse_ip(start).with_context(|| format!("invalid range start '{start}'"))?;
    let end = parse_ip(end).with_context(|| format!("invalid range end '{end}'"))?;
    Ok(Ipv4Range::new(start, end))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
