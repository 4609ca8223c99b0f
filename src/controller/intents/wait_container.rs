// ABOUTME: Intent for blocking until a container stops.
// ABOUTME: A non-zero exit is a normal result, not an error.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use async_trait::async_trait;

#[async_trait]
pub trait WaitContainerIntent: Sealed + Send + Sized {
    /// `not-running` (default), `next-exit` or `removed`.
    fn with_condition(self, condition: impl Into<String>) -> Self;

    async fn perform(self) -> Result<WaitContainerResult, EngineError>;
}

/// Exit status of a container that stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitContainerResult {
    pub status_code: i64,
    /// Error the engine attached to the exit, if any.
    pub error: Option<String>,
}

impl WaitContainerResult {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}
