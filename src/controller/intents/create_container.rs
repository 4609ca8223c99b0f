// ABOUTME: Intent for creating a container from an image.
// ABOUTME: The richest builder: command, ports, host config, env, labels, flags.

use crate::controller::error::EngineError;
use crate::controller::host_config::{Bind, Capability, ExposedPort, HostConfig, Link, VolumesFrom};
use crate::controller::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::collections::HashMap;

/// Builder for a container creation.
///
/// Every mutator consumes and returns the intent, so a chain of calls
/// configures one builder. Calling a mutator twice keeps only the last value.
/// `with_host_config` replaces the whole host configuration; the dedicated
/// host mutators (`with_binds`, `with_links`, `with_network_mode`, ...) write
/// into whatever host configuration is current.
#[async_trait]
pub trait CreateContainerIntent: Sealed + Send + Sized {
    /// Command arguments, overriding the image `CMD`.
    fn with_cmd<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_exposed_ports(self, ports: impl IntoIterator<Item = ExposedPort>) -> Self;

    fn with_host_config(self, host_config: HostConfig) -> Self;

    fn host_config(&self) -> &HostConfig;

    /// Environment entries in `KEY=value` form.
    fn with_env<I, S>(self, env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_binds(self, binds: impl IntoIterator<Item = Bind>) -> Self;

    fn with_volumes_from(self, volumes_from: impl IntoIterator<Item = VolumesFrom>) -> Self;

    fn with_links(self, links: impl IntoIterator<Item = Link>) -> Self;

    fn network_mode(&self) -> Option<&str>;

    fn with_network_mode(self, network_mode: impl Into<String>) -> Self;

    fn with_extra_hosts<I, S>(self, extra_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Aliases on the network named by the network mode.
    fn with_aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_working_dir(self, working_dir: impl Into<String>) -> Self;

    fn with_privileged(self, privileged: bool) -> Self;

    fn with_hostname(self, hostname: impl Into<String>) -> Self;

    /// Labels set so far. Empty, never absent, when none were set.
    fn labels(&self) -> HashMap<String, String>;

    fn with_labels(self, labels: HashMap<String, String>) -> Self;

    fn with_entrypoint<I, S>(self, entrypoint: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_name(self, name: impl Into<String>) -> Self;

    fn with_attach_stdin(self, attach_stdin: bool) -> Self;

    fn with_stdin_open(self, stdin_open: bool) -> Self;

    fn with_tty(self, tty: bool) -> Self;

    fn with_cap_add(self, capabilities: impl IntoIterator<Item = Capability>) -> Self;

    async fn perform(self) -> Result<CreateContainerResult, EngineError>;
}

/// Outcome of a container creation.
#[derive(Debug, Clone)]
pub struct CreateContainerResult {
    pub id: ContainerId,
    /// Non-fatal warnings reported by the engine.
    pub warnings: Vec<String>,
}
