// ABOUTME: Docker adapter for container creation.
// ABOUTME: Accumulates a bollard create body and submits it once on perform.

use crate::controller::sealed::Sealed;
use crate::controller::{
    Bind, Capability, CreateContainerIntent, CreateContainerResult, EngineError, ExposedPort,
    HostConfig, Link, VolumesFrom,
};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::models::{ContainerCreateBody, EndpointSettings, NetworkingConfig, PortBinding};
use bollard::query_parameters::CreateContainerOptions;
use std::collections::HashMap;
use std::sync::Arc;

pub struct CreateContainerDockerIntent<C> {
    client: Arc<C>,
    name: Option<String>,
    body: ContainerCreateBody,
    host_config: HostConfig,
    aliases: Vec<String>,
}

impl<C: DockerApi> CreateContainerDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, image: &str) -> Self {
        Self {
            client,
            name: None,
            body: ContainerCreateBody {
                image: Some(image.to_string()),
                ..Default::default()
            },
            host_config: HostConfig::default(),
            aliases: Vec::new(),
        }
    }

    /// The create body as it would be submitted now.
    pub(crate) fn request_body(&self) -> ContainerCreateBody {
        let mut body = self.body.clone();
        body.host_config = Some(to_bollard_host_config(&self.host_config));

        if !self.aliases.is_empty() {
            match &self.host_config.network_mode {
                Some(network) => {
                    let endpoint = EndpointSettings {
                        aliases: Some(self.aliases.clone()),
                        ..Default::default()
                    };
                    body.networking_config = Some(NetworkingConfig {
                        endpoints_config: Some(HashMap::from([(network.clone(), endpoint)])),
                    });
                }
                None => {
                    tracing::debug!(aliases = ?self.aliases, "aliases ignored without a network mode");
                }
            }
        }

        body
    }
}

fn strings<T: ToString>(items: &[T]) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items.iter().map(ToString::to_string).collect())
    }
}

fn collect_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// Byte sizes beyond what the engine accepts are clamped rather than wrapped.
fn saturating_i64(bytes: u64) -> i64 {
    i64::try_from(bytes).unwrap_or(i64::MAX)
}

fn to_bollard_host_config(config: &HostConfig) -> bollard::models::HostConfig {
    let port_bindings: HashMap<String, Option<Vec<PortBinding>>> = config
        .port_bindings
        .iter()
        .map(|(port, bindings)| {
            let bindings = bindings
                .iter()
                .map(|b| PortBinding {
                    host_ip: b.host_ip.clone(),
                    host_port: b.host_port.map(|p| p.to_string()),
                })
                .collect();
            (port.to_string(), Some(bindings))
        })
        .collect();

    bollard::models::HostConfig {
        binds: strings(&config.binds),
        links: strings(&config.links),
        volumes_from: strings(&config.volumes_from),
        network_mode: config.network_mode.clone(),
        extra_hosts: strings(&config.extra_hosts),
        privileged: config.privileged.then_some(true),
        cap_add: strings(&config.cap_add),
        port_bindings: (!port_bindings.is_empty()).then_some(port_bindings),
        publish_all_ports: config.publish_all_ports.then_some(true),
        memory: config.memory.map(saturating_i64),
        shm_size: config.shm_size.map(saturating_i64),
        tmpfs: (!config.tmpfs.is_empty()).then(|| config.tmpfs.clone()),
        auto_remove: config.auto_remove.then_some(true),
        ..Default::default()
    }
}

impl<C: DockerApi> Sealed for CreateContainerDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> CreateContainerIntent for CreateContainerDockerIntent<C> {
    fn with_cmd<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.cmd = Some(collect_strings(args));
        self
    }

    fn with_exposed_ports(mut self, ports: impl IntoIterator<Item = ExposedPort>) -> Self {
        self.body.exposed_ports = Some(ports.into_iter().map(|p| p.to_string()).collect());
        self
    }

    fn with_host_config(mut self, host_config: HostConfig) -> Self {
        self.host_config = host_config;
        self
    }

    fn host_config(&self) -> &HostConfig {
        &self.host_config
    }

    fn with_env<I, S>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.env = Some(collect_strings(env));
        self
    }

    fn with_binds(mut self, binds: impl IntoIterator<Item = Bind>) -> Self {
        self.host_config.binds = binds.into_iter().collect();
        self
    }

    fn with_volumes_from(mut self, volumes_from: impl IntoIterator<Item = VolumesFrom>) -> Self {
        self.host_config.volumes_from = volumes_from.into_iter().collect();
        self
    }

    fn with_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.host_config.links = links.into_iter().collect();
        self
    }

    fn network_mode(&self) -> Option<&str> {
        self.host_config.network_mode.as_deref()
    }

    fn with_network_mode(mut self, network_mode: impl Into<String>) -> Self {
        self.host_config.network_mode = Some(network_mode.into());
        self
    }

    fn with_extra_hosts<I, S>(mut self, extra_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_config.extra_hosts = collect_strings(extra_hosts);
        self
    }

    fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = collect_strings(aliases);
        self
    }

    fn with_working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.body.working_dir = Some(working_dir.into());
        self
    }

    fn with_privileged(mut self, privileged: bool) -> Self {
        self.host_config.privileged = privileged;
        self
    }

    fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.body.hostname = Some(hostname.into());
        self
    }

    fn labels(&self) -> HashMap<String, String> {
        self.body.labels.clone().unwrap_or_default()
    }

    fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.body.labels = Some(labels);
        self
    }

    fn with_entrypoint<I, S>(mut self, entrypoint: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.entrypoint = Some(collect_strings(entrypoint));
        self
    }

    fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn with_attach_stdin(mut self, attach_stdin: bool) -> Self {
        self.body.attach_stdin = Some(attach_stdin);
        self
    }

    fn with_stdin_open(mut self, stdin_open: bool) -> Self {
        self.body.open_stdin = Some(stdin_open);
        self
    }

    fn with_tty(mut self, tty: bool) -> Self {
        self.body.tty = Some(tty);
        self
    }

    fn with_cap_add(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.host_config.cap_add = capabilities.into_iter().collect();
        self
    }

    async fn perform(self) -> Result<CreateContainerResult, EngineError> {
        let body = self.request_body();
        let options = CreateContainerOptions {
            name: self.name.clone(),
            ..Default::default()
        };

        tracing::debug!(image = ?body.image, name = ?self.name, "creating container");
        let response = self.client.create_container(options, body).await?;

        for warning in &response.warnings {
            tracing::warn!(container = %response.id, %warning, "engine warning on create");
        }

        Ok(CreateContainerResult {
            id: ContainerId::new(response.id),
            warnings: response.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{AccessMode, PortBinding as HostPortBinding};

    #[test]
    fn empty_host_config_maps_to_unset_fields() {
        let hc = to_bollard_host_config(&HostConfig::default());
        assert!(hc.binds.is_none());
        assert!(hc.port_bindings.is_none());
        assert!(hc.privileged.is_none());
        assert!(hc.network_mode.is_none());
    }

    #[test]
    fn oversized_byte_limits_clamp_to_engine_maximum() {
        let config = HostConfig {
            memory: Some(512 * 1024 * 1024),
            shm_size: Some(u64::MAX),
            ..Default::default()
        };

        let hc = to_bollard_host_config(&config);
        assert_eq!(hc.memory, Some(536_870_912));
        assert_eq!(hc.shm_size, Some(i64::MAX));
    }

    #[test]
    fn host_config_uses_wire_formats() {
        let config = HostConfig {
            binds: vec![Bind::new("/srv/data", "/data").read_only()],
            links: vec![Link::new("db", "database")],
            volumes_from: vec![VolumesFrom::new("cache", AccessMode::ReadWrite)],
            cap_add: vec![Capability::NetAdmin],
            port_bindings: HashMap::from([(
                ExposedPort::tcp(80),
                vec![HostPortBinding {
                    host_ip: None,
                    host_port: Some(8080),
                }],
            )]),
            privileged: true,
            ..Default::default()
        };

        let hc = to_bollard_host_config(&config);
        assert_eq!(hc.binds, Some(vec!["/srv/data:/data:ro".to_string()]));
        assert_eq!(hc.links, Some(vec!["db:database".to_string()]));
        assert_eq!(hc.volumes_from, Some(vec!["cache:rw".to_string()]));
        assert_eq!(hc.cap_add, Some(vec!["NET_ADMIN".to_string()]));
        assert_eq!(hc.privileged, Some(true));

        let bindings = hc.port_bindings.unwrap_or_default();
        let published = bindings["80/tcp"].clone().unwrap_or_default();
        assert_eq!(published[0].host_port.as_deref(), Some("8080"));
    }
}
