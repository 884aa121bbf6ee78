use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::utils::error::AppError;

/// Marker reserved in fixed-width displays for local (path) endpoints
pub const LOCAL_PREFIX: &str = "U:";

/// Scheme accepted when parsing a local endpoint from text
const LOCAL_SCHEME: &str = "unix:";

/// One side of a captured connection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Endpoint {
    /// Unknown or unset address
    #[default]
    Empty,

    /// IP address with port
    Inet(SocketAddr),

    /// Filesystem-path-like local socket
    Local(String),
}

impl Endpoint {
    /// Whether the endpoint carries no address
    pub fn is_empty(&self) -> bool {
        match self {
            Endpoint::Empty => true,
            Endpoint::Inet(_) => false,
            Endpoint::Local(path) => path.is_empty(),
        }
    }

    /// IP address of an Inet endpoint
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Endpoint::Inet(addr) => Some(addr.ip()),
            _ => None,
        }
    }

    /// Port of an Inet endpoint; local endpoints have none
    pub fn port(&self) -> Option<u16> {
        match self {
            Endpoint::Inet(addr) => Some(addr.port()),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Empty => Ok(()),
            Endpoint::Inet(addr) => write!(f, "{}", addr),
            Endpoint::Local(path) => f.write_str(path),
        }
    }
}

impl FromStr for Endpoint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Endpoint::Empty);
        }
        if let Some(path) = s.strip_prefix(LOCAL_SCHEME) {
            if path.is_empty() {
                return Ok(Endpoint::Empty);
            }
            return Ok(Endpoint::Local(path.to_string()));
        }
        if s.starts_with('/') {
            return Ok(Endpoint::Local(s.to_string()));
        }

        s.parse::<SocketAddr>()
            .map(Endpoint::Inet)
            .map_err(|e| AppError::Input(format!("invalid endpoint '{}': {}", s, e)))
    }
}

impl TryFrom<String> for Endpoint {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Local(path) => format!("{}{}", LOCAL_SCHEME, path),
            other => other.to_string(),
        }
    }
}
