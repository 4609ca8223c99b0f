// ABOUTME: Docker ContainerProvider handing out controllers over one lazy client.
// ABOUTME: Construction reads nothing but its configuration.

use super::client::LazyClient;
use super::controller::DockerContainerController;
use crate::config::EngineConfig;
use crate::controller::ContainerProvider;
use crate::controller::sealed::Sealed;
use std::sync::Arc;

/// Provider for Docker-compatible engines (Docker, Podman).
///
/// Every controller it hands out shares the same [`LazyClient`], so the engine
/// is detected and connected at most once per provider.
pub struct DockerContainerProvider {
    config: EngineConfig,
    client: Arc<LazyClient>,
}

impl DockerContainerProvider {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            client: Arc::new(LazyClient::new(config.clone())),
            config,
        }
    }

    /// Provider configured from `DOCKER_HOST` and the `CONTAINER_INTENTS_*`
    /// variables.
    pub fn from_env() -> crate::error::Result<Self> {
        Ok(Self::new(EngineConfig::from_env()?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the shared client has connected yet.
    pub fn is_resolved(&self) -> bool {
        self.client.is_resolved()
    }
}

impl Default for DockerContainerProvider {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Sealed for DockerContainerProvider {}

impl ContainerProvider for DockerContainerProvider {
    type Controller = DockerContainerController<LazyClient>;

    fn lazy_controller(&self) -> Self::Controller {
        DockerContainerController::from_shared(Arc::clone(&self.client)).with_config(&self.config)
    }
}
