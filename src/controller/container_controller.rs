// ABOUTME: Facade producing engine-bound intents plus the warmup and pull policies.
// ABOUTME: Holds no per-operation state, so one controller serves concurrent tests.

use super::error::EngineError;
use super::intents::{
    ConnectToNetworkIntent, CopyArchiveFromContainerIntent, CreateContainerIntent,
    InspectContainerIntent, ListContainersIntent, LogContainerIntent, StartContainerIntent,
    TagImageIntent, WaitContainerIntent,
};
use super::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;

/// Entry point for container operations against one engine.
///
/// Each factory returns a fresh intent bound to the engine client; intents
/// from the same controller never share mutable state.
#[async_trait]
pub trait ContainerController: Sealed + Send + Sync {
    type CreateContainer: CreateContainerIntent;
    type StartContainer: StartContainerIntent;
    type InspectContainer: InspectContainerIntent;
    type ListContainers: ListContainersIntent;
    type ConnectToNetwork: ConnectToNetworkIntent;
    type CopyArchiveFromContainer: CopyArchiveFromContainerIntent;
    type WaitContainer: WaitContainerIntent;
    type TagImage: TagImageIntent;
    type LogContainer: LogContainerIntent;

    /// Resolve the engine client and make a cheap round-trip now, so that
    /// connection failures surface here and not inside some later call.
    async fn warmup(&self) -> Result<(), EngineError>;

    fn create_container_intent(&self, image: &str) -> Self::CreateContainer;

    fn start_container_intent(&self, container: &ContainerId) -> Self::StartContainer;

    fn inspect_container_intent(&self, container: &ContainerId) -> Self::InspectContainer;

    fn list_containers_intent(&self) -> Self::ListContainers;

    fn connect_to_network_intent(&self) -> Self::ConnectToNetwork;

    /// Copy `path` out of the container as a tar archive.
    fn copy_archive_from_container_intent(
        &self,
        container: &ContainerId,
        path: &str,
    ) -> Self::CopyArchiveFromContainer;

    fn wait_container_intent(&self, container: &ContainerId) -> Self::WaitContainer;

    /// Tag `source` as `repository:tag`.
    fn tag_image_intent(&self, source: &str, repository: &str, tag: &str) -> Self::TagImage;

    fn log_container_intent(&self, container: &ContainerId) -> Self::LogContainer;

    /// Make sure `image` exists locally.
    ///
    /// Inspects the image; if the engine does not know it, pulls it. A pull
    /// that fails on the client side or is interrupted is retried once for
    /// `linux/amd64`, and the outcome of that retry is returned. Other
    /// inspection or pull failures are returned unchanged.
    async fn check_and_pull_image(&self, image: &str) -> Result<(), EngineError>;
}
