//! Errors raised while parsing addresses, prefixes and ports.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("value is empty")]
    Empty,

    #[error("expected four dot-separated octets, found {0}")]
    OctetCount(usize),

    #[error("octet '{0}' is not an integer between 0 and 255")]
    InvalidOctet(String),

    #[error("missing '/prefix' in CIDR '{0}'")]
    MissingPrefix(String),

    #[error("prefix '{0}' is not an integer")]
    InvalidPrefix(String),

    #[error("prefix /{prefix} is outside the accepted range /{min}-/{max}")]
    PrefixOutOfRange { prefix: u32, min: u8, max: u8 },

    #[error("port '{0}' is not an integer between 1 and 65535")]
    InvalidPort(String),
}
