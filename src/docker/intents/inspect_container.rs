// ABOUTME: Docker adapter for container inspection.
// ABOUTME: Maps bollard's inspect response into the engine-neutral snapshot.

use crate::controller::sealed::Sealed;
use crate::controller::{
    ContainerConfigSnapshot, ContainerStateSnapshot, ContainerStatus, EngineError, ExposedPort,
    HealthState, InspectContainerIntent, InspectContainerResult, NetworkInfo, NetworkSettings,
    PortBinding,
};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::models::{
    ContainerInspectResponse, ContainerState, ContainerStateStatusEnum, HealthStatusEnum,
};
use bollard::query_parameters::InspectContainerOptionsBuilder;
use std::collections::HashMap;
use std::sync::Arc;

pub struct InspectContainerDockerIntent<C> {
    client: Arc<C>,
    container: ContainerId,
    size: bool,
}

impl<C: DockerApi> InspectContainerDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, container: &ContainerId) -> Self {
        Self {
            client,
            container: container.clone(),
            size: false,
        }
    }
}

impl<C: DockerApi> Sealed for InspectContainerDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> InspectContainerIntent for InspectContainerDockerIntent<C> {
    fn with_size(mut self, size: bool) -> Self {
        self.size = size;
        self
    }

    async fn perform(self) -> Result<InspectContainerResult, EngineError> {
        let options = InspectContainerOptionsBuilder::default()
            .size(self.size)
            .build();

        tracing::debug!(container = %self.container.short(), size = self.size, "inspecting container");
        let details = self
            .client
            .inspect_container(self.container.as_str(), options)
            .await?;

        Ok(to_inspect_result(details, &self.container))
    }
}

fn to_status(state: Option<&ContainerState>) -> ContainerStatus {
    state
        .and_then(|s| s.status)
        .map(|s| match s {
            ContainerStateStatusEnum::CREATED => ContainerStatus::Created,
            ContainerStateStatusEnum::RUNNING => ContainerStatus::Running,
            ContainerStateStatusEnum::PAUSED => ContainerStatus::Paused,
            ContainerStateStatusEnum::RESTARTING => ContainerStatus::Restarting,
            ContainerStateStatusEnum::REMOVING => ContainerStatus::Removing,
            ContainerStateStatusEnum::EXITED => ContainerStatus::Exited,
            ContainerStateStatusEnum::DEAD => ContainerStatus::Dead,
            _ => ContainerStatus::Unknown,
        })
        .unwrap_or(ContainerStatus::Unknown)
}

fn to_state(state: Option<ContainerState>) -> ContainerStateSnapshot {
    let status = to_status(state.as_ref());
    let state = state.unwrap_or_default();

    let health = state.health.as_ref().and_then(|h| h.status).map(|s| match s {
        HealthStatusEnum::STARTING => HealthState::Starting,
        HealthStatusEnum::HEALTHY => HealthState::Healthy,
        HealthStatusEnum::UNHEALTHY => HealthState::Unhealthy,
        _ => HealthState::None,
    });

    ContainerStateSnapshot {
        status,
        running: state.running.unwrap_or(false),
        exit_code: state.exit_code,
        pid: state.pid.filter(|pid| *pid != 0),
        error: state.error.filter(|e| !e.is_empty()),
        started_at: state.started_at.as_ref().map(ToString::to_string),
        finished_at: state.finished_at.as_ref().map(ToString::to_string),
        oom_killed: state.oom_killed.unwrap_or(false),
        health,
    }
}

pub(crate) fn to_inspect_result(
    details: ContainerInspectResponse,
    requested: &ContainerId,
) -> InspectContainerResult {
    // Prefer the image as configured; the top-level field is the image id.
    let image = details
        .config
        .as_ref()
        .and_then(|c| c.image.clone())
        .or(details.image)
        .unwrap_or_default();

    let config = details
        .config
        .map(|c| ContainerConfigSnapshot {
            hostname: c.hostname,
            env: c.env.unwrap_or_default(),
            cmd: c.cmd.unwrap_or_default(),
            entrypoint: c.entrypoint.unwrap_or_default(),
            labels: c.labels.unwrap_or_default(),
            working_dir: c.working_dir.filter(|w| !w.is_empty()),
        })
        .unwrap_or_default();

    let mut network_settings = NetworkSettings::default();
    if let Some(settings) = details.network_settings {
        for (name, endpoint) in settings.networks.unwrap_or_default() {
            network_settings.networks.insert(
                name,
                NetworkInfo {
                    network_id: endpoint.network_id.unwrap_or_default(),
                    ip_address: endpoint.ip_address.unwrap_or_default(),
                    gateway: endpoint.gateway.unwrap_or_default(),
                    aliases: endpoint.aliases.unwrap_or_default(),
                },
            );
        }

        let mut ports = HashMap::new();
        for (key, bindings) in settings.ports.unwrap_or_default() {
            let Some(port) = ExposedPort::parse(&key) else {
                tracing::debug!(port = %key, "skipping unparseable port key");
                continue;
            };
            let bindings = bindings
                .unwrap_or_default()
                .into_iter()
                .map(|b| PortBinding {
                    host_ip: b.host_ip.filter(|ip| !ip.is_empty()),
                    host_port: b.host_port.and_then(|p| p.parse().ok()),
                })
                .collect();
            ports.insert(port, bindings);
        }
        network_settings.ports = ports;
    }

    InspectContainerResult {
        id: details
            .id
            .map(ContainerId::new)
            .unwrap_or_else(|| requested.clone()),
        name: details
            .name
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
        image,
        created: details
            .created
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        state: to_state(details.state),
        config,
        network_settings,
        size_rw: details.size_rw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{
        ContainerConfig, EndpointSettings, Health, NetworkSettings as BollardNetworkSettings,
        PortBinding as BollardPortBinding,
    };

    #[test]
    fn maps_state_health_and_ports() {
        let details = ContainerInspectResponse {
            id: Some("4f1c2a9e8b7d".to_string()),
            name: Some("/web".to_string()),
            image: Some("sha256:abc".to_string()),
            state: Some(ContainerState {
                status: Some(ContainerStateStatusEnum::RUNNING),
                running: Some(true),
                pid: Some(4242),
                exit_code: Some(0),
                health: Some(Health {
                    status: Some(HealthStatusEnum::HEALTHY),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            config: Some(ContainerConfig {
                image: Some("nginx:1.27".to_string()),
                env: Some(vec!["MODE=prod".to_string()]),
                labels: Some(HashMap::from([("app".to_string(), "web".to_string())])),
                ..Default::default()
            }),
            network_settings: Some(BollardNetworkSettings {
                networks: Some(HashMap::from([(
                    "backend".to_string(),
                    EndpointSettings {
                        ip_address: Some("172.18.0.2".to_string()),
                        aliases: Some(vec!["web".to_string()]),
                        ..Default::default()
                    },
                )])),
                ports: Some(HashMap::from([
                    (
                        "80/tcp".to_string(),
                        Some(vec![BollardPortBinding {
                            host_ip: Some("0.0.0.0".to_string()),
                            host_port: Some("32768".to_string()),
                        }]),
                    ),
                    ("443/tcp".to_string(), None),
                ])),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = to_inspect_result(details, &ContainerId::new("web"));

        assert_eq!(result.id.as_str(), "4f1c2a9e8b7d");
        assert_eq!(result.name, "web");
        assert_eq!(result.image, "nginx:1.27");
        assert!(result.is_running());
        assert_eq!(result.state.status, ContainerStatus::Running);
        assert_eq!(result.state.health, Some(HealthState::Healthy));
        assert_eq!(result.state.pid, Some(4242));
        assert_eq!(result.config.env_var("MODE"), Some("prod"));
        assert_eq!(result.config.labels["app"], "web");
        assert_eq!(result.network_settings.networks["backend"].ip_address, "172.18.0.2");
        assert_eq!(result.mapped_port(ExposedPort::tcp(80)), Some(32768));
        assert_eq!(result.network_settings.ports[&ExposedPort::tcp(443)], Vec::new());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let result = to_inspect_result(ContainerInspectResponse::default(), &ContainerId::new("gone"));

        assert_eq!(result.id.as_str(), "gone");
        assert_eq!(result.state.status, ContainerStatus::Unknown);
        assert!(!result.is_running());
        assert_eq!(result.state.health, None);
        assert!(result.config.labels.is_empty());
        assert!(result.network_settings.networks.is_empty());
    }

    #[test]
    fn unrecognised_status_is_not_reported_as_exited() {
        let state = ContainerState {
            status: Some(ContainerStateStatusEnum::EMPTY),
            running: Some(false),
            ..Default::default()
        };

        assert_eq!(to_status(Some(&state)), ContainerStatus::Unknown);
        assert_eq!(to_status(None), ContainerStatus::Unknown);
    }
}
