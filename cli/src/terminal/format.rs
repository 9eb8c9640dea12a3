use bootcheck_common::config::EnvFacts;
use bootcheck_core::report::{Severity, ValidationIssue, ValidationReport};
use colored::*;

use crate::terminal::colors;

pub fn severity_marker(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "[-]".color(colors::ERROR).bold(),
        Severity::Warning => "[*]".color(colors::WARNING).bold(),
    }
}

/// `[-] DHCP_RANGE_END     DHCP range endpoint ... is not inside subnet ...`
pub fn issue_line(issue: &ValidationIssue, key_width: usize) -> String {
    let key: &str = issue.field.env_key();
    let padding: String = " ".repeat(key_width.saturating_sub(key.len()));
    format!(
        "{} {}{} {}",
        severity_marker(issue.severity),
        key.color(colors::PRIMARY),
        padding,
        issue.message.color(colors::TEXT_DEFAULT)
    )
}

pub fn issue_key_width(report: &ValidationReport) -> usize {
    report
        .issues()
        .iter()
        .map(|issue| issue.field.env_key().len())
        .max()
        .unwrap_or(0)
}

pub fn verdict(report: &ValidationReport) -> ColoredString {
    let errors: usize = report.error_count();
    let warnings: usize = report.warning_count();
    let unit = |n: usize, word: &str| if n == 1 { format!("{n} {word}") } else { format!("{n} {word}s") };

    if report.is_valid() {
        format!("Configuration is valid ({})", unit(warnings, "warning"))
            .color(colors::OK)
            .bold()
    } else {
        format!(
            "Configuration is invalid: {}, {}",
            unit(errors, "error"),
            unit(warnings, "warning")
        )
        .color(colors::ERROR)
        .bold()
    }
}

pub fn facts_to_key_value_pair(facts: &EnvFacts) -> Vec<(String, ColoredString)> {
    let root: ColoredString = if facts.is_root {
        "yes".color(colors::OK)
    } else {
        "no".color(colors::WARNING)
    };

    let bound: ColoredString = if facts.bound_ports.is_empty() {
        "none".color(colors::TEXT_DEFAULT)
    } else {
        facts
            .bound_ports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(", ")
            .color(colors::WARNING)
    };

    vec![
        (String::from("root"), root),
        (String::from("in use"), bound),
    ]
}
