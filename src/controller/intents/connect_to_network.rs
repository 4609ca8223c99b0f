// ABOUTME: Intent for attaching a running container to a network.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use crate::types::{ContainerId, NetworkId};
use async_trait::async_trait;

/// Builder for a network attachment. Network and container are both set
/// through mutators; leaving one out is reported by the engine, not here.
#[async_trait]
pub trait ConnectToNetworkIntent: Sealed + Send + Sized {
    fn with_network_id(self, network: &NetworkId) -> Self;

    fn with_container_id(self, container: &ContainerId) -> Self;

    fn with_aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_ipv4_address(self, address: impl Into<String>) -> Self;

    async fn perform(self) -> Result<(), EngineError>;
}
