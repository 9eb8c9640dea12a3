use std::path::Path;

use anyhow::Context;
use bootcheck_common::config::{Config, NetworkConfig};
use bootcheck_core::env_file;
use bootcheck_core::preflight::{PreflightOutcome, PreflightService};
use bootcheck_core::report::{Severity, ValidationReport};
use bootcheck_core::system::LocalSystem;
use tracing::{info, warn};

use crate::bprint;
use crate::terminal::{format, print};

/// Loads, probes, validates and renders. Returns whether the config is valid.
pub async fn check(env_file: &Path, from_env: bool, cfg: &Config) -> anyhow::Result<bool> {
    let config: NetworkConfig = load_config(env_file, from_env, cfg)?;

    let mut system: LocalSystem = LocalSystem::new();
    if cfg.no_probe {
        system = system.without_port_probes();
    }
    if cfg.assume_root {
        system = system.assume_root();
    }

    let outcome: PreflightOutcome = PreflightService::new(Box::new(system))
        .run(&config)
        .await
        .context("failed to gather local system facts")?;

    render(&outcome.report, cfg);
    Ok(outcome.report.is_valid())
}

fn load_config(env_file: &Path, from_env: bool, cfg: &Config) -> anyhow::Result<NetworkConfig> {
    if from_env && !env_file.exists() {
        warn!("{} not found, using the process environment only", env_file.display());
        return Ok(env_file::from_process_env());
    }

    let mut pairs: Vec<(String, String)> = env_file::read_pairs_from_path(env_file)
        .with_context(|| format!("could not load {}", env_file.display()))?;
    if cfg.shows_progress() {
        info!("Loaded settings from {}", env_file.display());
    }

    if from_env {
        pairs.extend(env_file::process_env_pairs());
    }

    Ok(env_file::from_pairs(pairs))
}

fn render(report: &ValidationReport, cfg: &Config) {
    let key_width: usize = format::issue_key_width(report);

    for issue in report.issues() {
        if cfg.quiet > 1 && issue.severity == Severity::Warning {
            continue;
        }
        print::print(&format::issue_line(issue, key_width));
    }

    if cfg.quiet > 1 {
        return;
    }
    if !report.is_empty() {
        bprint!();
    }
    print::print_status(format!("{}", format::verdict(report)));
    print::end_of_program(cfg.quiet);
}
