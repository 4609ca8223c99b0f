// ABOUTME: Engine-neutral contract: intents, results, controller and provider.
// ABOUTME: No engine client type appears in any signature exported from here.

mod container_controller;
mod error;
mod host_config;
pub mod intents;
mod provider;
pub(crate) mod sealed;

pub use container_controller::ContainerController;
pub use error::{EngineError, EngineErrorKind};
pub use host_config::{
    AccessMode, Bind, Capability, ExposedPort, HostConfig, Link, PortBinding, Protocol,
    VolumesFrom,
};
pub use intents::*;
pub use provider::ContainerProvider;
