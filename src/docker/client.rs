// ABOUTME: DockerApi implementations over bollard: a connected client and a lazy one.
// ABOUTME: The lazy client detects, connects and pings on first use, not on construction.

use super::api::{DockerApi, EngineStream};
use crate::config::EngineConfig;
use crate::controller::EngineError;
use crate::runtime::{ConnectError, Endpoint, resolve_endpoint};
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::container::LogOutput;
use bollard::models::{
    ContainerCreateBody, ContainerCreateResponse, ContainerInspectResponse, ContainerSummary,
    ContainerWaitExitError, ContainerWaitResponse, CreateImageInfo, ImageInspect,
    NetworkConnectRequest,
};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, DownloadFromContainerOptions,
    InspectContainerOptions, ListContainersOptions, LogsOptions, StartContainerOptions,
    TagImageOptions, WaitContainerOptions,
};
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::OnceCell;

// =============================================================================
// Error Mapping
// =============================================================================

/// Classify a bollard error.
///
/// 404 is "not found", other HTTP statuses are server errors, errors reported
/// inside a response stream and transport failures are client errors, and
/// timeouts are interruptions.
pub(crate) fn map_engine_error(e: bollard::errors::Error) -> EngineError {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message,
        } => EngineError::NotFound(message),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => EngineError::Server {
            status_code,
            message,
        },
        bollard::errors::Error::DockerStreamError { error } => EngineError::Client(error),
        bollard::errors::Error::RequestTimeoutError => {
            EngineError::Interrupted("request timed out".to_string())
        }
        bollard::errors::Error::IOError { err } if err.kind() == std::io::ErrorKind::Interrupted => {
            EngineError::Interrupted(err.to_string())
        }
        other => EngineError::Client(other.to_string()),
    }
}

// =============================================================================
// BollardClient
// =============================================================================

/// A connected bollard client. Works with Docker and with Podman's
/// Docker-compatible API.
#[derive(Clone)]
pub struct BollardClient {
    docker: Docker,
}

impl BollardClient {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connect to the engine described by `config` and check it answers.
    pub async fn connect(config: &EngineConfig) -> Result<Self, ConnectError> {
        let info = resolve_endpoint(config)?;
        let timeout = config.timeout.as_secs();
        let endpoint = info.endpoint.to_string();

        let docker = match &info.endpoint {
            Endpoint::Unix(path) => {
                Docker::connect_with_unix(path, timeout, bollard::API_DEFAULT_VERSION)
            }
            Endpoint::Tcp(host) => {
                Docker::connect_with_http(host, timeout, bollard::API_DEFAULT_VERSION)
            }
        }
        .map_err(|e| ConnectError::Connection {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;

        docker
            .ping()
            .await
            .map_err(|e| ConnectError::Connection {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        tracing::info!(runtime = %info.runtime_type, %endpoint, "connected to container engine");
        Ok(Self::new(docker))
    }
}

#[async_trait]
impl DockerApi for BollardClient {
    async fn ping(&self) -> Result<(), EngineError> {
        self.docker.ping().await.map_err(map_engine_error)?;
        Ok(())
    }

    async fn create_container(
        &self,
        options: CreateContainerOptions,
        body: ContainerCreateBody,
    ) -> Result<ContainerCreateResponse, EngineError> {
        self.docker
            .create_container(Some(options), body)
            .await
            .map_err(map_engine_error)
    }

    async fn start_container(&self, id: &str) -> Result<(), EngineError> {
        self.docker
            .start_container(id, None::<StartContainerOptions>)
            .await
            .map_err(map_engine_error)
    }

    async fn inspect_container(
        &self,
        id: &str,
        options: InspectContainerOptions,
    ) -> Result<ContainerInspectResponse, EngineError> {
        self.docker
            .inspect_container(id, Some(options))
            .await
            .map_err(map_engine_error)
    }

    async fn list_containers(
        &self,
        options: ListContainersOptions,
    ) -> Result<Vec<ContainerSummary>, EngineError> {
        self.docker
            .list_containers(Some(options))
            .await
            .map_err(map_engine_error)
    }

    async fn connect_network(
        &self,
        network: &str,
        request: NetworkConnectRequest,
    ) -> Result<(), EngineError> {
        self.docker
            .connect_network(network, request)
            .await
            .map_err(map_engine_error)
    }

    async fn download_from_container(
        &self,
        id: &str,
        options: DownloadFromContainerOptions,
    ) -> Result<EngineStream<Bytes>, EngineError> {
        let stream = self
            .docker
            .download_from_container(id, Some(options))
            .map(|chunk| chunk.map_err(map_engine_error));
        Ok(Box::pin(stream))
    }

    async fn wait_container(
        &self,
        id: &str,
        options: WaitContainerOptions,
    ) -> Result<EngineStream<ContainerWaitResponse>, EngineError> {
        // bollard reports a non-zero exit as an error item; turn it back into a response.
        let stream = self
            .docker
            .wait_container(id, Some(options))
            .map(|item| match item {
                Ok(response) => Ok(response),
                Err(bollard::errors::Error::DockerContainerWaitError { error, code }) => {
                    Ok(ContainerWaitResponse {
                        status_code: code,
                        error: (!error.is_empty()).then(|| ContainerWaitExitError {
                            message: Some(error),
                        }),
                    })
                }
                Err(e) => Err(map_engine_error(e)),
            });
        Ok(Box::pin(stream))
    }

    async fn tag_image(&self, image: &str, options: TagImageOptions) -> Result<(), EngineError> {
        self.docker
            .tag_image(image, Some(options))
            .await
            .map_err(map_engine_error)
    }

    async fn logs(
        &self,
        id: &str,
        options: LogsOptions,
    ) -> Result<EngineStream<LogOutput>, EngineError> {
        let stream = self
            .docker
            .logs(id, Some(options))
            .map(|frame| frame.map_err(map_engine_error));
        Ok(Box::pin(stream))
    }

    async fn create_image(
        &self,
        options: CreateImageOptions,
        credentials: Option<DockerCredentials>,
    ) -> Result<EngineStream<CreateImageInfo>, EngineError> {
        let stream = self
            .docker
            .create_image(Some(options), None, credentials)
            .map(|info| info.map_err(map_engine_error));
        Ok(Box::pin(stream))
    }

    async fn inspect_image(&self, image: &str) -> Result<ImageInspect, EngineError> {
        self.docker
            .inspect_image(image)
            .await
            .map_err(map_engine_error)
    }
}

// =============================================================================
// LazyClient
// =============================================================================

/// Engine client resolved on first use.
///
/// Construction only stores the configuration. The first call that needs the
/// engine detects the endpoint, connects and pings; the connected client is
/// then reused. A failed resolution is not remembered, so the next call tries
/// again.
pub struct LazyClient {
    config: EngineConfig,
    client: OnceCell<BollardClient>,
}

impl LazyClient {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_resolved(&self) -> bool {
        self.client.initialized()
    }

    async fn resolve(&self) -> Result<&BollardClient, EngineError> {
        self.client
            .get_or_try_init(|| BollardClient::connect(&self.config))
            .await
            .map_err(EngineError::from)
    }
}

#[async_trait]
impl DockerApi for LazyClient {
    async fn ping(&self) -> Result<(), EngineError> {
        self.resolve().await?.ping().await
    }

    async fn create_container(
        &self,
        options: CreateContainerOptions,
        body: ContainerCreateBody,
    ) -> Result<ContainerCreateResponse, EngineError> {
        self.resolve().await?.create_container(options, body).await
    }

    async fn start_container(&self, id: &str) -> Result<(), EngineError> {
        self.resolve().await?.start_container(id).await
    }

    async fn inspect_container(
        &self,
        id: &str,
        options: InspectContainerOptions,
    ) -> Result<ContainerInspectResponse, EngineError> {
        self.resolve().await?.inspect_container(id, options).await
    }

    async fn list_containers(
        &self,
        options: ListContainersOptions,
    ) -> Result<Vec<ContainerSummary>, EngineError> {
        self.resolve().await?.list_containers(options).await
    }

    async fn connect_network(
        &self,
        network: &str,
        request: NetworkConnectRequest,
    ) -> Result<(), EngineError> {
        self.resolve().await?.connect_network(network, request).await
    }

    async fn download_from_container(
        &self,
        id: &str,
        options: DownloadFromContainerOptions,
    ) -> Result<EngineStream<Bytes>, EngineError> {
        self.resolve()
            .await?
            .download_from_container(id, options)
            .await
    }

    async fn wait_container(
        &self,
        id: &str,
        options: WaitContainerOptions,
    ) -> Result<EngineStream<ContainerWaitResponse>, EngineError> {
        self.resolve().await?.wait_container(id, options).await
    }

    async fn tag_image(&self, image: &str, options: TagImageOptions) -> Result<(), EngineError> {
        self.resolve().await?.tag_image(image, options).await
    }

    async fn logs(
        &self,
        id: &str,
        options: LogsOptions,
    ) -> Result<EngineStream<LogOutput>, EngineError> {
        self.resolve().await?.logs(id, options).await
    }

    async fn create_image(
        &self,
        options: CreateImageOptions,
        credentials: Option<DockerCredentials>,
    ) -> Result<EngineStream<CreateImageInfo>, EngineError> {
        self.resolve()
            .await?
            .create_image(options, credentials)
            .await
    }

    async fn inspect_image(&self, image: &str) -> Result<ImageInspect, EngineError> {
        self.resolve().await?.inspect_image(image).await
    }
}
