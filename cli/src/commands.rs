pub mod check;
pub mod facts;
pub mod inspect;

use std::path::PathBuf;

use bootcheck_common::network::PortBinding;
use bootcheck_core::env_file::DEFAULT_ENV_FILE;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bootcheck")]
#[command(about = "Preflight checks for a netboot server's network settings.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output (-q hides headers, -qq prints problems only)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the network settings of an env file
    #[command(alias = "c")]
    Check {
        /// Env file holding SUBNET, HOST_IP, DHCP_RANGE_START, ...
        #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
        env_file: PathBuf,
        /// Let variables exported in the environment override the file
        #[arg(long)]
        from_env: bool,
        /// Do not probe the local system for ports in use
        #[arg(long)]
        no_probe: bool,
        /// Assume root privileges when judging privileged ports
        #[arg(long)]
        assume_root: bool,
    },
    /// Show the layout of a subnet and, optionally, a DHCP pool inside it
    #[command(alias = "i")]
    Inspect {
        /// Subnet in CIDR notation, e.g. 192.168.1.0/24
        cidr: String,
        /// DHCP pool as START-END
        #[arg(short, long)]
        range: Option<String>,
        /// Accept any prefix from /0 to /32
        #[arg(long)]
        any_prefix: bool,
    },
    /// Show the privilege level and which ports are already taken
    #[command(alias = "f")]
    Facts {
        /// Ports to probe as PORT/PROTOCOL (default: 8080/tcp and 69/udp)
        #[arg(short, long = "port")]
        ports: Vec<PortBinding>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
