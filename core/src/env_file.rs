//! # `.env` Loader
//!
//! Turns `KEY=VALUE` text into a [`NetworkConfig`].
//!
//! Line syntax (comments, blank lines, quoting, `export` prefixes) is handled
//! by `dotenvy`. The process environment is never modified: pairs are read
//! into memory and later pairs win over earlier ones, so a file can be
//! overlaid by [`process_env_pairs`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use bootcheck_common::config::{Field, NetworkConfig, NetworkConfigBuilder};
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_TFTP_PORT: u16 = 69;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed env file")]
    Syntax(#[from] dotenvy::Error),
}

/// Reads every `KEY=VALUE` pair of the file at `path`, in file order.
pub fn read_pairs_from_path(path: impl AsRef<Path>) -> Result<Vec<(String, String)>, EnvFileError> {
    let path: &Path = path.as_ref();
    let file: File = File::open(path).map_err(|e| EnvFileError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let pairs: Vec<(String, String)> = read_pairs(file)?;
    debug!("read {} entries from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// Reads every `KEY=VALUE` pair from `reader`, in order.
pub fn read_pairs<R: Read>(reader: R) -> Result<Vec<(String, String)>, EnvFileError> {
    dotenvy::from_read_iter(reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(EnvFileError::from)
}

/// The pairs of the current process environment that name a config field.
pub fn process_env_pairs() -> Vec<(String, String)> {
    std::env::vars()
        .filter(|(key, _)| Field::from_env_key(key).is_some())
        .collect()
}

/// Builds a config from `pairs`. Later pairs override earlier ones, unknown
/// keys are ignored and missing ports fall back to their defaults.
pub fn from_pairs<I, K, V>(pairs: I) -> NetworkConfig
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut builder: NetworkConfigBuilder = NetworkConfig::builder();

    for (key, value) in pairs {
        let key: &str = key.as_ref();
        match Field::from_env_key(key) {
            Some(field) => builder = builder.set(field, value),
            None => trace!("ignoring unrelated key {key}"),
        }
    }

    if !builder.is_set(Field::HttpPort) {
        builder = builder.http_port(DEFAULT_HTTP_PORT);
    }
    if !builder.is_set(Field::TftpPort) {
        builder = builder.tftp_port(DEFAULT_TFTP_PORT);
    }

    builder.build()
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<NetworkConfig, EnvFileError> {
    Ok(from_pairs(read_pairs(reader)?))
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<NetworkConfig, EnvFileError> {
    Ok(from_pairs(read_pairs_from_path(path)?))
}

/// Builds a config from the process environment alone.
pub fn from_process_env() -> NetworkConfig {
    from_pairs(process_env_pairs())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
