// ABOUTME: Docker adapter for copying a path out of a container as a tar archive.

use crate::controller::sealed::Sealed;
use crate::controller::{CopyArchiveFromContainerIntent, CopyArchiveResult, EngineError};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::query_parameters::DownloadFromContainerOptionsBuilder;
use bytes::BytesMut;
use futures::StreamExt;
use std::sync::Arc;

pub struct CopyArchiveFromContainerDockerIntent<C> {
    client: Arc<C>,
    container: ContainerId,
    path: String,
}

impl<C: DockerApi> CopyArchiveFromContainerDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, container: &ContainerId, path: &str) -> Self {
        Self {
            client,
            container: container.clone(),
            path: path.to_string(),
        }
    }
}

impl<C: DockerApi> Sealed for CopyArchiveFromContainerDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> CopyArchiveFromContainerIntent for CopyArchiveFromContainerDockerIntent<C> {
    async fn perform(self) -> Result<CopyArchiveResult, EngineError> {
        let options = DownloadFromContainerOptionsBuilder::default()
            .path(&self.path)
            .build();

        tracing::debug!(container = %self.container.short(), path = %self.path, "copying archive from container");
        let mut chunks = self
            .client
            .download_from_container(self.container.as_str(), options)
            .await?;

        let mut archive = BytesMut::new();
        while let Some(chunk) = chunks.next().await {
            archive.extend_from_slice(&chunk?);
        }

        tracing::debug!(bytes = archive.len(), "archive received");
        Ok(CopyArchiveResult::new(archive.freeze()))
    }
}
