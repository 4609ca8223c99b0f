// ABOUTME: Intent for tagging a local image under another repository and tag.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use async_trait::async_trait;

#[async_trait]
pub trait TagImageIntent: Sealed + Send + Sized {
    async fn perform(self) -> Result<(), EngineError>;
}
