// ABOUTME: The engine client seam the Docker adapters call.
// ABOUTME: Mirrors the bollard::Docker commands the intents need, with classified errors.

use crate::controller::EngineError;
use async_trait::async_trait;
use bollard::auth::DockerCredentials;
use bollard::container::LogOutput;
use bollard::models::{
    ContainerCreateBody, ContainerCreateResponse, ContainerInspectResponse, ContainerSummary,
    ContainerWaitResponse, CreateImageInfo, ImageInspect, NetworkConnectRequest,
};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, DownloadFromContainerOptions,
    InspectContainerOptions, ListContainersOptions, LogsOptions, TagImageOptions,
    WaitContainerOptions,
};
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Stream of engine output with errors already classified.
pub type EngineStream<T> = Pin<Box<dyn Stream<Item = Result<T, EngineError>> + Send>>;

/// A Docker-compatible engine client.
///
/// One method per engine command, taking bollard's request types. Errors come
/// back as [`EngineError`] so callers can tell "not found" from client-side
/// failures and interruptions. Implementations must accept concurrent calls.
#[async_trait]
pub trait DockerApi: Send + Sync {
    async fn ping(&self) -> Result<(), EngineError>;

    async fn create_container(
        &self,
        options: CreateContainerOptions,
        body: ContainerCreateBody,
    ) -> Result<ContainerCreateResponse, EngineError>;

    async fn start_container(&self, id: &str) -> Result<(), EngineError>;

    async fn inspect_container(
        &self,
        id: &str,
        options: InspectContainerOptions,
    ) -> Result<ContainerInspectResponse, EngineError>;

    async fn list_containers(
        &self,
        options: ListContainersOptions,
    ) -> Result<Vec<ContainerSummary>, EngineError>;

    async fn connect_network(
        &self,
        network: &str,
        request: NetworkConnectRequest,
    ) -> Result<(), EngineError>;

    /// Tar archive of a path inside the container, in chunks.
    async fn download_from_container(
        &self,
        id: &str,
        options: DownloadFromContainerOptions,
    ) -> Result<EngineStream<Bytes>, EngineError>;

    /// Yields once the wait condition is met. A non-zero exit arrives as a
    /// normal response carrying the status code.
    async fn wait_container(
        &self,
        id: &str,
        options: WaitContainerOptions,
    ) -> Result<EngineStream<ContainerWaitResponse>, EngineError>;

    async fn tag_image(&self, image: &str, options: TagImageOptions) -> Result<(), EngineError>;

    async fn logs(
        &self,
        id: &str,
        options: LogsOptions,
    ) -> Result<EngineStream<LogOutput>, EngineError>;

    /// Pull progress. The pull is done when the stream ends without error.
    async fn create_image(
        &self,
        options: CreateImageOptions,
        credentials: Option<DockerCredentials>,
    ) -> Result<EngineStream<CreateImageInfo>, EngineError>;

    async fn inspect_image(&self, image: &str) -> Result<ImageInspect, EngineError>;
}
