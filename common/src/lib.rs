//! # Bootcheck Common
//!
//! Shared building blocks for the netboot preflight checker:
//!
//! * **[`network`]**: IPv4, CIDR, range and port primitives. Pure arithmetic, no I/O.
//! * **[`config`]**: The raw [`config::NetworkConfig`] record and the [`config::EnvFacts`] snapshot.
//! * **[`system`]**: The port trait through which OS facts are gathered.
//! * **[`error`]**: Parse errors shared by every crate.

pub mod config;
pub mod error;
pub mod network;
pub mod system;
