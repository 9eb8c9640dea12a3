//! # Bootcheck Core
//!
//! Preflight validation for a netboot server's network settings.
//!
//! * **[`validator`]**: The pure rule set. Takes a [`NetworkConfig`] and an
//!   [`EnvFacts`] snapshot and returns a [`ValidationReport`]; never performs I/O.
//! * **[`report`]**: Issues, severities and the report they are collected in.
//! * **[`env_file`]**: Reads `.env` style `KEY=VALUE` files into a [`NetworkConfig`].
//! * **[`system`]**: Gathers [`EnvFacts`] from the local machine.
//! * **[`preflight`]**: Wires facts gathering and validation together.
//!
//! [`NetworkConfig`]: bootcheck_common::config::NetworkConfig
//! [`EnvFacts`]: bootcheck_common::config::EnvFacts
//! [`ValidationReport`]: report::ValidationReport

pub mod env_file;
pub mod preflight;
pub mod report;
pub mod system;
pub mod validator;

pub use report::{Severity, ValidationIssue, ValidationReport};
pub use validator::{validate, validate_with};
