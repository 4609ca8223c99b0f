// ABOUTME: Engine-neutral error returned by every intent and controller operation.
// ABOUTME: Classifies failures so the pull policy can decide what is recoverable.

use crate::runtime::ConnectError;

/// Failure of an engine operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The image, container or network does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The client side of the exchange failed: a stream error reported by the
    /// engine mid-operation, an undecodable response, a broken transport.
    #[error("engine client error: {0}")]
    Client(String),

    /// The operation was cut short before completing.
    #[error("interrupted: {0}")]
    Interrupted(String),

    /// Any other error status from the engine.
    #[error("engine returned {status_code}: {message}")]
    Server { status_code: u16, message: String },

    /// The lazy client could not be resolved.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("invalid image reference: {0}")]
    InvalidReference(String),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    NotFound,
    Client,
    Interrupted,
    Server,
    Connect,
    InvalidReference,
}

impl EngineError {
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            EngineError::NotFound(_) => EngineErrorKind::NotFound,
            EngineError::Client(_) => EngineErrorKind::Client,
            EngineError::Interrupted(_) => EngineErrorKind::Interrupted,
            EngineError::Server { .. } => EngineErrorKind::Server,
            EngineError::Connect(_) => EngineErrorKind::Connect,
            EngineError::InvalidReference(_) => EngineErrorKind::InvalidReference,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == EngineErrorKind::NotFound
    }

    /// Client errors and interruptions of any origin. These are the failures
    /// after which a pull is retried with the fallback platform.
    pub fn is_client_or_interrupted(&self) -> bool {
        matches!(
            self.kind(),
            EngineErrorKind::Client | EngineErrorKind::Interrupted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_client_and_interrupted_qualify_for_fallback() {
        assert!(EngineError::Client("boom".into()).is_client_or_interrupted());
        assert!(EngineError::Interrupted("stalled".into()).is_client_or_interrupted());
        assert!(!EngineError::NotFound("x".into()).is_client_or_interrupted());
        assert!(
            !EngineError::Server {
                status_code: 500,
                message: "x".into()
            }
            .is_client_or_interrupted()
        );
        assert!(!EngineError::InvalidReference("x".into()).is_client_or_interrupted());
    }

    #[test]
    fn display_includes_details() {
        let err = EngineError::Server {
            status_code: 409,
            message: "conflict".into(),
        };
        assert_eq!(err.to_string(), "engine returned 409: conflict");
        assert!(EngineError::NotFound("alpine:3".into()).is_not_found());
    }
}
