// ABOUTME: Docker adapter for waiting on a container to stop.

use crate::controller::sealed::Sealed;
use crate::controller::{EngineError, WaitContainerIntent, WaitContainerResult};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::query_parameters::WaitContainerOptionsBuilder;
use futures::StreamExt;
use std::sync::Arc;

pub struct WaitContainerDockerIntent<C> {
    client: Arc<C>,
    container: ContainerId,
    condition: String,
}

impl<C: DockerApi> WaitContainerDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, container: &ContainerId) -> Self {
        Self {
            client,
            container: container.clone(),
            condition: "not-running".to_string(),
        }
    }
}

impl<C: DockerApi> Sealed for WaitContainerDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> WaitContainerIntent for WaitContainerDockerIntent<C> {
    fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    async fn perform(self) -> Result<WaitContainerResult, EngineError> {
        let options = WaitContainerOptionsBuilder::default()
            .condition(&self.condition)
            .build();

        tracing::debug!(container = %self.container.short(), condition = %self.condition, "waiting for container");
        let mut responses = self
            .client
            .wait_container(self.container.as_str(), options)
            .await?;

        match responses.next().await {
            Some(response) => {
                let response = response?;
                tracing::debug!(container = %self.container.short(), status_code = response.status_code, "container stopped");
                Ok(WaitContainerResult {
                    status_code: response.status_code,
                    error: response.error.and_then(|e| e.message).filter(|m| !m.is_empty()),
                })
            }
            None => Err(EngineError::Client(format!(
                "wait stream for {} ended without a status",
                self.container.short()
            ))),
        }
    }
}
