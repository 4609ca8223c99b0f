// ABOUTME: Docker implementations of the intent traits.
// ABOUTME: Each adapter owns its request state and a shared handle to the engine client.

mod connect_to_network;
mod copy_archive;
mod create_container;
mod inspect_container;
mod list_containers;
mod log_container;
mod start_container;
mod tag_image;
mod wait_container;

pub use connect_to_network::ConnectToNetworkDockerIntent;
pub use copy_archive::CopyArchiveFromContainerDockerIntent;
pub use create_container::CreateContainerDockerIntent;
pub use inspect_container::InspectContainerDockerIntent;
pub use list_containers::ListContainersDockerIntent;
pub use log_container::LogContainerDockerIntent;
pub use start_container::StartContainerDockerIntent;
pub use tag_image::TagImageDockerIntent;
pub use wait_container::WaitContainerDockerIntent;
