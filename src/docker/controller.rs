// ABOUTME: Docker implementation of ContainerController over any DockerApi client.
// ABOUTME: Hands out Docker intent adapters and runs the ensure-image-present policy.

use super::api::DockerApi;
use super::intents::{
    ConnectToNetworkDockerIntent, CopyArchiveFromContainerDockerIntent,
    CreateContainerDockerIntent, InspectContainerDockerIntent, ListContainersDockerIntent,
    LogContainerDockerIntent, StartContainerDockerIntent, TagImageDockerIntent,
    WaitContainerDockerIntent,
};
use super::pull::{self, PullAttempt};
use crate::config::{EngineConfig, RegistryAuth};
use crate::controller::sealed::Sealed;
use crate::controller::{ContainerController, EngineError};
use crate::types::{ContainerId, ImageRef};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Controller bound to one engine client.
///
/// Cloning is cheap and clones share the client.
pub struct DockerContainerController<C> {
    client: Arc<C>,
    pull_pause_timeout: Duration,
    registry_auth: Option<RegistryAuth>,
}

impl<C> Clone for DockerContainerController<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            pull_pause_timeout: self.pull_pause_timeout,
            registry_auth: self.registry_auth.clone(),
        }
    }
}

impl<C: DockerApi> DockerContainerController<C> {
    pub fn new(client: C) -> Self {
        Self::from_shared(Arc::new(client))
    }

    pub fn from_shared(client: Arc<C>) -> Self {
        let defaults = EngineConfig::default();
        Self {
            client,
            pull_pause_timeout: defaults.pull_pause_timeout,
            registry_auth: None,
        }
    }

    /// Take pull timeout and registry credentials from `config`.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.pull_pause_timeout = config.pull_pause_timeout;
        self.registry_auth = config.registry_auth.clone();
        self
    }

    pub fn with_pull_pause_timeout(mut self, timeout: Duration) -> Self {
        self.pull_pause_timeout = timeout;
        self
    }

    pub fn with_registry_auth(mut self, auth: RegistryAuth) -> Self {
        self.registry_auth = Some(auth);
        self
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    async fn pull_with_fallback(&self, image: &ImageRef) -> Result<(), EngineError> {
        let credentials = self.registry_auth.as_ref().map(pull::credentials);
        let mut attempt = PullAttempt::Native;

        tracing::info!(%image, "pulling image");
        loop {
            let outcome = pull::pull(
                self.client.as_ref(),
                image,
                attempt,
                credentials.clone(),
                self.pull_pause_timeout,
            )
            .await;

            match outcome {
                Ok(()) => {
                    tracing::info!(%image, platform = ?attempt.platform(), "image pulled");
                    return Ok(());
                }
                Err(e) => match attempt.next(&e) {
                    Some(next) => {
                        tracing::warn!(
                            %image,
                            error = %e,
                            platform = ?next.platform(),
                            "pull failed, retrying with fallback platform"
                        );
                        attempt = next;
                    }
                    None => return Err(e),
                },
            }
        }
    }
}

impl<C: DockerApi> Sealed for DockerContainerController<C> {}

#[async_trait]
impl<C: DockerApi + 'static> ContainerController for DockerContainerController<C> {
    type CreateContainer = CreateContainerDockerIntent<C>;
    type StartContainer = StartContainerDockerIntent<C>;
    type InspectContainer = InspectContainerDockerIntent<C>;
    type ListContainers = ListContainersDockerIntent<C>;
    type ConnectToNetwork = ConnectToNetworkDockerIntent<C>;
    type CopyArchiveFromContainer = CopyArchiveFromContainerDockerIntent<C>;
    type WaitContainer = WaitContainerDockerIntent<C>;
    type TagImage = TagImageDockerIntent<C>;
    type LogContainer = LogContainerDockerIntent<C>;

    async fn warmup(&self) -> Result<(), EngineError> {
        self.client.ping().await?;
        tracing::debug!("engine client warmed up");
        Ok(())
    }

    fn create_container_intent(&self, image: &str) -> Self::CreateContainer {
        CreateContainerDockerIntent::new(Arc::clone(&self.client), image)
    }

    fn start_container_intent(&self, container: &ContainerId) -> Self::StartContainer {
        StartContainerDockerIntent::new(Arc::clone(&self.client), container)
    }

    fn inspect_container_intent(&self, container: &ContainerId) -> Self::InspectContainer {
        InspectContainerDockerIntent::new(Arc::clone(&self.client), container)
    }

    fn list_containers_intent(&self) -> Self::ListContainers {
        ListContainersDockerIntent::new(Arc::clone(&self.client))
    }

    fn connect_to_network_intent(&self) -> Self::ConnectToNetwork {
        ConnectToNetworkDockerIntent::new(Arc::clone(&self.client))
    }

    fn copy_archive_from_container_intent(
        &self,
        container: &ContainerId,
        path: &str,
    ) -> Self::CopyArchiveFromContainer {
        CopyArchiveFromContainerDockerIntent::new(Arc::clone(&self.client), container, path)
    }

    fn wait_container_intent(&self, container: &ContainerId) -> Self::WaitContainer {
        WaitContainerDockerIntent::new(Arc::clone(&self.client), container)
    }

    fn tag_image_intent(&self, source: &str, repository: &str, tag: &str) -> Self::TagImage {
        TagImageDockerIntent::new(Arc::clone(&self.client), source, repository, tag)
    }

    fn log_container_intent(&self, container: &ContainerId) -> Self::LogContainer {
        LogContainerDockerIntent::new(Arc::clone(&self.client), container)
    }

    async fn check_and_pull_image(&self, image: &str) -> Result<(), EngineError> {
        let image = ImageRef::parse(image)
            .map_err(|e| EngineError::InvalidReference(format!("{}: {}", image, e)))?;
        let reference = image.to_string();

        match self.client.inspect_image(&reference).await {
            Ok(_) => {
                tracing::debug!(image = %reference, "image present locally");
                Ok(())
            }
            Err(e) if e.is_not_found() => self.pull_with_fallback(&image).await,
            Err(e) => Err(e),
        }
    }
}
