// ABOUTME: Fluent, engine-neutral intents for driving a container engine from tests.
// ABOUTME: The Docker-compatible implementation lives in `docker` and uses bollard.

pub mod config;
pub mod controller;
pub mod docker;
pub mod error;
pub mod runtime;
pub mod types;

pub use config::EngineConfig;
pub use controller::{ContainerController, ContainerProvider, EngineError};
pub use docker::DockerContainerProvider;
