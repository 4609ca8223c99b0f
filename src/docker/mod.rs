// ABOUTME: Docker-compatible engine support built on bollard.
// ABOUTME: Client seam, lazy client, intent adapters, controller and provider.

mod api;
mod client;
mod controller;
pub mod intents;
mod provider;
mod pull;

pub use api::{DockerApi, EngineStream};
pub use client::{BollardClient, LazyClient};
pub use controller::DockerContainerController;
pub use provider::DockerContainerProvider;
pub use pull::{FALLBACK_PLATFORM, PullAttempt};
