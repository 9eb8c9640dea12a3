mod commands;
mod terminal;

use std::process::ExitCode;

use bootcheck_common::config::Config;
use commands::{CommandLine, Commands, check, facts, inspect};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    match run(commands).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(commands: CommandLine) -> anyhow::Result<ExitCode> {
    let mut cfg = Config {
        quiet: commands.quiet,
        ..Config::default()
    };

    match commands.command {
        Commands::Check {
            env_file,
            from_env,
            no_probe,
            assume_root,
        } => {
            cfg.no_probe = no_probe;
            cfg.assume_root = assume_root;
            print::header("netboot preflight", cfg.quiet);
            let valid: bool = check::check(&env_file, from_env, &cfg).await?;
            Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Inspect {
            cidr,
            range,
            any_prefix,
        } => {
            print::header("subnet layout", cfg.quiet);
            inspect::inspect(&cidr, range.as_deref(), any_prefix, &cfg)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Facts { ports } => {
            print::header("local system", cfg.quiet);
            facts::facts(ports, &cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
