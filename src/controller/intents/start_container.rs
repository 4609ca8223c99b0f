// ABOUTME: Intent for starting a created container.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use async_trait::async_trait;

#[async_trait]
pub trait StartContainerIntent: Sealed + Send + Sized {
    async fn perform(self) -> Result<(), EngineError>;
}
