// ABOUTME: Image pull attempts: the platform fallback state machine and progress handling.
// ABOUTME: A pull that stops reporting progress is aborted as interrupted.

use super::api::DockerApi;
use crate::config::RegistryAuth;
use crate::controller::EngineError;
use crate::types::ImageRef;
use bollard::auth::DockerCredentials;
use bollard::query_parameters::CreateImageOptionsBuilder;
use futures::StreamExt;
use std::time::Duration;

/// Platform requested when a native pull fails on the client side.
pub const FALLBACK_PLATFORM: &str = "linux/amd64";

/// One pull of an image. A native pull may be followed by exactly one
/// fallback pull; the fallback has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullAttempt {
    /// Let the engine pick the platform.
    Native,
    /// Force [`FALLBACK_PLATFORM`].
    Fallback,
}

impl PullAttempt {
    pub fn platform(&self) -> Option<&'static str> {
        match self {
            PullAttempt::Native => None,
            PullAttempt::Fallback => Some(FALLBACK_PLATFORM),
        }
    }

    /// The attempt to make after this one failed with `error`, if any.
    pub fn next(&self, error: &EngineError) -> Option<PullAttempt> {
        match self {
            PullAttempt::Native if error.is_client_or_interrupted() => Some(PullAttempt::Fallback),
            _ => None,
        }
    }
}

pub(crate) fn credentials(auth: &RegistryAuth) -> DockerCredentials {
    DockerCredentials {
        username: Some(auth.username.clone()),
        password: Some(auth.password.clone()),
        serveraddress: auth.server.clone(),
        ..Default::default()
    }
}

/// Run one pull attempt to completion.
///
/// Every progress event is logged at debug level. If the engine sends nothing
/// for `pause_timeout`, the attempt fails with [`EngineError::Interrupted`].
pub(crate) async fn pull<C: DockerApi + ?Sized>(
    client: &C,
    image: &ImageRef,
    attempt: PullAttempt,
    credentials: Option<DockerCredentials>,
    pause_timeout: Duration,
) -> Result<(), EngineError> {
    let reference = image.to_string();
    let mut builder = CreateImageOptionsBuilder::default().from_image(&reference);
    if let Some(platform) = attempt.platform() {
        builder = builder.platform(platform);
    }

    let mut progress = client.create_image(builder.build(), credentials).await?;

    loop {
        match tokio::time::timeout(pause_timeout, progress.next()).await {
            Ok(Some(Ok(info))) => {
                tracing::debug!(
                    image = %reference,
                    layer = ?info.id,
                    status = ?info.status,
                    progress = ?info.progress_detail,
                    "pull progress"
                );
            }
            Ok(Some(Err(e))) => return Err(e),
            Ok(None) => return Ok(()),
            Err(_) => {
                return Err(EngineError::Interrupted(format!(
                    "pull of {} made no progress for {}",
                    reference,
                    humantime::format_duration(pause_timeout)
                )));
            }
        }
    }
}
