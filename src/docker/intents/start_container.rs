// ABOUTME: Docker adapter for starting a created container.

use crate::controller::sealed::Sealed;
use crate::controller::{EngineError, StartContainerIntent};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::sync::Arc;

pub struct StartContainerDockerIntent<C> {
    client: Arc<C>,
    container: ContainerId,
}

impl<C: DockerApi> StartContainerDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, container: &ContainerId) -> Self {
        Self {
            client,
            container: container.clone(),
        }
    }
}

impl<C: DockerApi> Sealed for StartContainerDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> StartContainerIntent for StartContainerDockerIntent<C> {
    async fn perform(self) -> Result<(), EngineError> {
        tracing::debug!(container = %self.container.short(), "starting container");
        self.client.start_container(self.container.as_str()).await
    }
}
