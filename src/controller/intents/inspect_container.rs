// ABOUTME: Intent for inspecting a container and the snapshot it returns.
// ABOUTME: State, configuration and network settings as seen at inspection time.

use crate::controller::error::EngineError;
use crate::controller::host_config::{ExposedPort, PortBinding};
use crate::controller::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait InspectContainerIntent: Sealed + Send + Sized {
    /// Ask the engine to compute filesystem sizes as well.
    fn with_size(self, size: bool) -> Self;

    async fn perform(self) -> Result<InspectContainerResult, EngineError>;
}

/// Point-in-time snapshot of a container. It does not follow later changes.
#[derive(Debug, Clone)]
pub struct InspectContainerResult {
    pub id: ContainerId,
    /// Name without the leading slash.
    pub name: String,
    /// Image as configured, e.g. `alpine:3.20`.
    pub image: String,
    pub created: String,
    pub state: ContainerStateSnapshot,
    pub config: ContainerConfigSnapshot,
    pub network_settings: NetworkSettings,
    /// Writable layer size, present when requested with `with_size(true)`.
    pub size_rw: Option<i64>,
}

impl InspectContainerResult {
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Host port the engine published for a container port.
    pub fn mapped_port(&self, port: ExposedPort) -> Option<u16> {
        self.network_settings
            .ports
            .get(&port)?
            .iter()
            .find_map(|binding| binding.host_port)
    }
}

/// Container lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    /// The engine reported no state, or one this crate does not know.
    Unknown,
}

/// Health state of a container with a healthcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Starting,
    Healthy,
    Unhealthy,
    None,
}

#[derive(Debug, Clone)]
pub struct ContainerStateSnapshot {
    pub status: ContainerStatus,
    pub running: bool,
    pub exit_code: Option<i64>,
    pub pid: Option<i64>,
    pub error: Option<String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub oom_killed: bool,
    pub health: Option<HealthState>,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerConfigSnapshot {
    pub hostname: Option<String>,
    pub env: Vec<String>,
    pub cmd: Vec<String>,
    pub entrypoint: Vec<String>,
    pub labels: HashMap<String, String>,
    pub working_dir: Option<String>,
}

impl ContainerConfigSnapshot {
    /// Value of an environment variable as the container sees it.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.iter().find_map(|entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }
}

/// Network settings for a container.
#[derive(Debug, Clone, Default)]
pub struct NetworkSettings {
    /// Attachment details keyed by network name.
    pub networks: HashMap<String, NetworkInfo>,
    /// Published ports. Unpublished exposed ports map to an empty list.
    pub ports: HashMap<ExposedPort, Vec<PortBinding>>,
}

/// Network information for a container.
#[derive(Debug, Clone)]
pub struct NetworkInfo {
    pub network_id: String,
    pub ip_address: String,
    pub gateway: String,
    pub aliases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_ports(ports: HashMap<ExposedPort, Vec<PortBinding>>) -> InspectContainerResult {
        InspectContainerResult {
            id: ContainerId::new("abc"),
            name: "db".into(),
            image: "postgres:16".into(),
            created: String::new(),
            state: ContainerStateSnapshot {
                status: ContainerStatus::Running,
                running: true,
                exit_code: None,
                pid: Some(42),
                error: None,
                started_at: None,
                finished_at: None,
                oom_killed: false,
                health: None,
            },
            config: ContainerConfigSnapshot {
                env: vec!["POSTGRES_PASSWORD=secret".into(), "EMPTY=".into()],
                ..Default::default()
            },
            network_settings: NetworkSettings {
                networks: HashMap::new(),
                ports,
            },
            size_rw: None,
        }
    }

    #[test]
    fn mapped_port_returns_first_published_host_port() {
        let mut ports = HashMap::new();
        ports.insert(
            ExposedPort::tcp(5432),
            vec![
                PortBinding {
                    host_ip: Some("::".into()),
                    host_port: None,
                },
                PortBinding {
                    host_ip: Some("0.0.0.0".into()),
                    host_port: Some(49153),
                },
            ],
        );
        ports.insert(ExposedPort::udp(5432), Vec::new());

        let snapshot = snapshot_with_ports(ports);
        assert_eq!(snapshot.mapped_port(ExposedPort::tcp(5432)), Some(49153));
        assert_eq!(snapshot.mapped_port(ExposedPort::udp(5432)), None);
        assert_eq!(snapshot.mapped_port(ExposedPort::tcp(80)), None);
        assert!(snapshot.is_running());
    }

    #[test]
    fn env_var_lookup() {
        let snapshot = snapshot_with_ports(HashMap::new());
        assert_eq!(snapshot.config.env_var("POSTGRES_PASSWORD"), Some("secret"));
        assert_eq!(snapshot.config.env_var("EMPTY"), Some(""));
        assert_eq!(snapshot.config.env_var("MISSING"), None);
    }
}
