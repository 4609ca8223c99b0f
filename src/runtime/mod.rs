// ABOUTME: Container runtime detection and connection errors.
// ABOUTME: Finds a Docker or Podman endpoint locally or from configuration.

mod detection;
mod error;
mod types;

pub use detection::{DetectionError, detect_local, resolve_endpoint};
pub use error::{ConnectError, ConnectErrorKind};
pub use types::{Endpoint, RuntimeInfo, RuntimeType};
