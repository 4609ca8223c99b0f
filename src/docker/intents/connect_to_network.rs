// ABOUTME: Docker adapter for attaching a container to a network.

use crate::controller::sealed::Sealed;
use crate::controller::{ConnectToNetworkIntent, EngineError};
use crate::docker::api::DockerApi;
use crate::types::{ContainerId, NetworkId};
use async_trait::async_trait;
use bollard::models::{EndpointIpamConfig, EndpointSettings, NetworkConnectRequest};
use std::sync::Arc;

pub struct ConnectToNetworkDockerIntent<C> {
    client: Arc<C>,
    network: Option<NetworkId>,
    container: Option<ContainerId>,
    aliases: Vec<String>,
    ipv4_address: Option<String>,
}

impl<C: DockerApi> ConnectToNetworkDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>) -> Self {
        Self {
            client,
            network: None,
            container: None,
            aliases: Vec::new(),
            ipv4_address: None,
        }
    }
}

impl<C: DockerApi> Sealed for ConnectToNetworkDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> ConnectToNetworkIntent for ConnectToNetworkDockerIntent<C> {
    fn with_network_id(mut self, network: &NetworkId) -> Self {
        self.network = Some(network.clone());
        self
    }

    fn with_container_id(mut self, container: &ContainerId) -> Self {
        self.container = Some(container.clone());
        self
    }

    fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    fn with_ipv4_address(mut self, address: impl Into<String>) -> Self {
        self.ipv4_address = Some(address.into());
        self
    }

    async fn perform(self) -> Result<(), EngineError> {
        // Missing ids go to the engine as empty strings; it reports the error.
        let network = self.network.map(NetworkId::into_inner).unwrap_or_default();
        let container = self.container.map(ContainerId::into_inner).unwrap_or_default();

        let request = NetworkConnectRequest {
            container: container.clone(),
            endpoint_config: Some(EndpointSettings {
                aliases: (!self.aliases.is_empty()).then_some(self.aliases),
                ipam_config: self.ipv4_address.map(|address| EndpointIpamConfig {
                    ipv4_address: Some(address),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        };

        tracing::debug!(%network, %container, "connecting container to network");
        self.client.connect_network(&network, request).await
    }
}
