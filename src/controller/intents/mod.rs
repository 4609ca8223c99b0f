// ABOUTME: One fluent intent trait per container-engine operation.
// ABOUTME: Result types live next to the intent that produces them.

mod connect_to_network;
mod copy_archive;
mod create_container;
mod inspect_container;
mod list_containers;
mod log_container;
mod start_container;
mod tag_image;
mod wait_container;

pub use connect_to_network::ConnectToNetworkIntent;
pub use copy_archive::{CopyArchiveFromContainerIntent, CopyArchiveResult};
pub use create_container::{CreateContainerIntent, CreateContainerResult};
pub use inspect_container::{
    ContainerConfigSnapshot, ContainerStateSnapshot, ContainerStatus, HealthState,
    InspectContainerIntent, InspectContainerResult, NetworkInfo, NetworkSettings,
};
pub use list_containers::{ContainerSummary, ListContainersIntent};
pub use log_container::{ContainerLogs, LogContainerIntent, LogFrame, StreamKind};
pub use start_container::StartContainerIntent;
pub use tag_image::TagImageIntent;
pub use wait_container::{WaitContainerIntent, WaitContainerResult};
