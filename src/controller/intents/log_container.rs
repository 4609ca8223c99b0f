// ABOUTME: Intent for reading or following container output.
// ABOUTME: The result is a stream of frames tagged with the stream they came from.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

#[async_trait]
pub trait LogContainerIntent: Sealed + Send + Sized {
    fn with_stdout(self, stdout: bool) -> Self;

    fn with_stderr(self, stderr: bool) -> Self;

    /// Keep the stream open and deliver new output as it is written.
    fn with_follow_stream(self, follow: bool) -> Self;

    fn with_timestamps(self, timestamps: bool) -> Self;

    /// Only the last `lines` lines.
    fn with_tail(self, lines: u64) -> Self;

    fn with_tail_all(self) -> Self;

    /// Only output written after this UNIX timestamp.
    fn with_since(self, unix_seconds: i32) -> Self;

    async fn perform(self) -> Result<ContainerLogs, EngineError>;
}

/// Which stream a frame was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
    Stdin,
    /// TTY output, where stdout and stderr are not separated.
    Console,
}

/// One chunk of container output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFrame {
    pub stream: StreamKind,
    pub payload: Bytes,
}

impl LogFrame {
    pub fn content(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

type FrameStream = Pin<Box<dyn Stream<Item = Result<LogFrame, EngineError>> + Send>>;

/// Container output. Ends when the engine closes the stream, which for a
/// followed stream happens when the container stops.
pub struct ContainerLogs {
    frames: FrameStream,
}

impl ContainerLogs {
    pub fn new(frames: impl Stream<Item = Result<LogFrame, EngineError>> + Send + 'static) -> Self {
        Self {
            frames: Box::pin(frames),
        }
    }

    /// Drain the stream and join all frames into one string.
    pub async fn collect_string(mut self) -> Result<String, EngineError> {
        let mut output = String::new();
        while let Some(frame) = self.frames.next().await {
            output.push_str(&frame?.content());
        }
        Ok(output)
    }

    /// Drain the stream keeping stdout and stderr apart. Console output counts as stdout.
    pub async fn collect_split(mut self) -> Result<(String, String), EngineError> {
        let mut stdout = String::new();
        let mut stderr = String::new();
        while let Some(frame) = self.frames.next().await {
            let frame = frame?;
            match frame.stream {
                StreamKind::Stderr => stderr.push_str(&frame.content()),
                _ => stdout.push_str(&frame.content()),
            }
        }
        Ok((stdout, stderr))
    }
}

impl Stream for ContainerLogs {
    type Item = Result<LogFrame, EngineError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for ContainerLogs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerLogs").finish_non_exhaustive()
    }
}
