// ABOUTME: Runtime detection logic for the local system.
// ABOUTME: Honours explicit configuration, then checks Podman sockets first, then Docker.

use super::types::{Endpoint, RuntimeInfo, RuntimeType};
use crate::config::EngineConfig;
use std::path::Path;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("configured socket does not exist: {0}")]
    SocketMissing(String),

    #[error("unsupported engine address: {0}")]
    UnsupportedAddress(String),
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Detect container runtime on the local system.
///
/// Detection order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<RuntimeInfo, DetectionError> {
    if let Some(uid) = get_uid() {
        let rootless_socket = format!("/run/user/{}/podman/podman.sock", uid);
        if Path::new(&rootless_socket).exists() {
            return Ok(RuntimeInfo {
                runtime_type: RuntimeType::Podman,
                endpoint: Endpoint::Unix(rootless_socket),
            });
        }
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            endpoint: Endpoint::Unix(ROOTFUL_PODMAN.to_string()),
        });
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Docker,
            endpoint: Endpoint::Unix(DOCKER_SOCKET.to_string()),
        });
    }

    Err(DetectionError::NoRuntimeFound)
}

/// Work out which engine to talk to for the given configuration.
///
/// An explicit `socket` wins, then an explicit `runtime` with its default
/// socket, then local auto-detection. Unix sockets must exist.
pub fn resolve_endpoint(config: &EngineConfig) -> Result<RuntimeInfo, DetectionError> {
    let explicit = match (&config.socket, config.runtime) {
        (Some(address), runtime) => {
            let endpoint = Endpoint::parse(address)
                .ok_or_else(|| DetectionError::UnsupportedAddress(address.clone()))?;
            Some(RuntimeInfo {
                runtime_type: runtime.unwrap_or(RuntimeType::Docker),
                endpoint,
            })
        }
        (None, Some(runtime_type)) => Some(RuntimeInfo {
            runtime_type,
            endpoint: Endpoint::Unix(default_socket_path(runtime_type).to_string()),
        }),
        (None, None) => None,
    };

    match explicit {
        Some(info) => {
            if let Endpoint::Unix(ref path) = info.endpoint
                && !Path::new(path).exists()
            {
                return Err(DetectionError::SocketMissing(path.clone()));
            }
            Ok(info)
        }
        None => detect_local(),
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

fn default_socket_path(runtime: RuntimeType) -> &'static str {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET,
        RuntimeType::Podman => ROOTFUL_PODMAN,
    }
}
