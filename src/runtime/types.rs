// ABOUTME: Runtime type definitions for Docker and Podman.
// ABOUTME: Includes RuntimeType, the engine Endpoint and detected RuntimeInfo.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The container runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

impl std::str::FromStr for RuntimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(RuntimeType::Docker),
            "podman" => Ok(RuntimeType::Podman),
            other => Err(format!("unknown runtime: {}", other)),
        }
    }
}

/// Where the engine API listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Path to a Unix socket.
    Unix(String),
    /// `host:port` of a plain HTTP API.
    Tcp(String),
}

impl Endpoint {
    /// Parse a `DOCKER_HOST` style address. Bare paths are Unix sockets.
    pub fn parse(address: &str) -> Option<Self> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }
        if let Some(path) = address.strip_prefix("unix://") {
            return Some(Endpoint::Unix(path.to_string()));
        }
        if let Some(host) = address
            .strip_prefix("tcp://")
            .or_else(|| address.strip_prefix("http://"))
        {
            return Some(Endpoint::Tcp(host.trim_end_matches('/').to_string()));
        }
        if address.starts_with('/') {
            return Some(Endpoint::Unix(address.to_string()));
        }
        None
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix(path) => write!(f, "unix://{}", path),
            Endpoint::Tcp(host) => write!(f, "tcp://{}", host),
        }
    }
}

/// Detected runtime information.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    /// The type of runtime detected.
    pub runtime_type: RuntimeType,
    /// Where to reach it.
    pub endpoint: Endpoint,
}
