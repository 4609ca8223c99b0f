// ABOUTME: Docker adapter for tagging a local image.

use crate::controller::sealed::Sealed;
use crate::controller::{EngineError, TagImageIntent};
use crate::docker::api::DockerApi;
use async_trait::async_trait;
use bollard::query_parameters::TagImageOptionsBuilder;
use std::sync::Arc;

pub struct TagImageDockerIntent<C> {
    client: Arc<C>,
    source: String,
    repository: String,
    tag: String,
}

impl<C: DockerApi> TagImageDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, source: &str, repository: &str, tag: &str) -> Self {
        Self {
            client,
            source: source.to_string(),
            repository: repository.to_string(),
            tag: tag.to_string(),
        }
    }
}

impl<C: DockerApi> Sealed for TagImageDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> TagImageIntent for TagImageDockerIntent<C> {
    async fn perform(self) -> Result<(), EngineError> {
        let options = TagImageOptionsBuilder::default()
            .repo(&self.repository)
            .tag(&self.tag)
            .build();

        tracing::debug!(
            source = %self.source,
            target = %format!("{}:{}", self.repository, self.tag),
            "tagging image"
        );
        self.client.tag_image(&self.source, options).await
    }
}
