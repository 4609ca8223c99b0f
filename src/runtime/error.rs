// ABOUTME: Connection error types with SNAFU pattern.
// ABOUTME: Unifies detection and connection failures raised while resolving the engine client.

use snafu::Snafu;

use super::detection::DetectionError;

/// Failure to turn configuration into a usable engine client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("failed to connect to {endpoint}: {message}"))]
    Connection { endpoint: String, message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// No container runtime found on the system.
    NoRuntimeFound,
    /// Configured endpoint is missing or malformed.
    BadEndpoint,
    /// Endpoint exists but the engine did not answer.
    ConnectionFailed,
}

impl ConnectError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::Detection { source } => match source {
                DetectionError::NoRuntimeFound => ConnectErrorKind::NoRuntimeFound,
                DetectionError::SocketMissing(_) | DetectionError::UnsupportedAddress(_) => {
                    ConnectErrorKind::BadEndpoint
                }
            },
            ConnectError::Connection { .. } => ConnectErrorKind::ConnectionFailed,
        }
    }

    /// Returns connection error details if this is a connection failure.
    pub fn connection_details(&self) -> Option<&str> {
        match self {
            ConnectError::Connection { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<DetectionError> for ConnectError {
    fn from(source: DetectionError) -> Self {
        ConnectError::Detection { source }
    }
}
