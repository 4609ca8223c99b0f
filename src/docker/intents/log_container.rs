// ABOUTME: Docker adapter for reading container output.
// ABOUTME: Multiplexed bollard frames become tagged LogFrames.

use crate::controller::sealed::Sealed;
use crate::controller::{ContainerLogs, EngineError, LogContainerIntent, LogFrame, StreamKind};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::container::LogOutput;
use bollard::query_parameters::LogsOptions;
use futures::StreamExt;
use std::sync::Arc;

pub struct LogContainerDockerIntent<C> {
    client: Arc<C>,
    container: ContainerId,
    options: LogsOptions,
}

impl<C: DockerApi> LogContainerDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>, container: &ContainerId) -> Self {
        Self {
            client,
            container: container.clone(),
            options: LogsOptions {
                tail: "all".to_string(),
                ..Default::default()
            },
        }
    }
}

pub(crate) fn to_frame(output: LogOutput) -> LogFrame {
    let (stream, payload) = match output {
        LogOutput::StdOut { message } => (StreamKind::Stdout, message),
        LogOutput::StdErr { message } => (StreamKind::Stderr, message),
        LogOutput::StdIn { message } => (StreamKind::Stdin, message),
        LogOutput::Console { message } => (StreamKind::Console, message),
    };
    LogFrame { stream, payload }
}

impl<C: DockerApi> Sealed for LogContainerDockerIntent<C> {}

#[async_trait]
impl<C: DockerApi> LogContainerIntent for LogContainerDockerIntent<C> {
    fn with_stdout(mut self, stdout: bool) -> Self {
        self.options.stdout = stdout;
        self
    }

    fn with_stderr(mut self, stderr: bool) -> Self {
        self.options.stderr = stderr;
        self
    }

    fn with_follow_stream(mut self, follow: bool) -> Self {
        self.options.follow = follow;
        self
    }

    fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.options.timestamps = timestamps;
        self
    }

    fn with_tail(mut self, lines: u64) -> Self {
        self.options.tail = lines.to_string();
        self
    }

    fn with_tail_all(mut self) -> Self {
        self.options.tail = "all".to_string();
        self
    }

    fn with_since(mut self, unix_seconds: i32) -> Self {
        self.options.since = unix_seconds;
        self
    }

    async fn perform(self) -> Result<ContainerLogs, EngineError> {
        tracing::debug!(
            container = %self.container.short(),
            follow = self.options.follow,
            tail = %self.options.tail,
            "reading container logs"
        );
        let frames = self
            .client
            .logs(self.container.as_str(), self.options)
            .await?;

        Ok(ContainerLogs::new(frames.map(|frame| frame.map(to_frame))))
    }
}
