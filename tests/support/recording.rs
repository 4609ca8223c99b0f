// ABOUTME: Recording DockerApi fake for exercising adapters and the pull policy.
// ABOUTME: Records every call in order and replays scripted engine responses.

use async_trait::async_trait;
use bollard::auth::DockerCredentials;
use bollard::container::LogOutput;
use bollard::models::{
    ContainerCreateBody, ContainerCreateResponse, ContainerInspectResponse, ContainerSummary,
    ContainerWaitResponse, CreateImageInfo, ImageInspect, NetworkConnectRequest, ProgressDetail,
};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, DownloadFromContainerOptions,
    InspectContainerOptions, ListContainersOptions, LogsOptions, TagImageOptions,
    WaitContainerOptions,
};
use bytes::Bytes;
use container_intents::controller::EngineError;
use container_intents::docker::{DockerApi, EngineStream};
use futures::stream;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// One engine command as the fake saw it. Query options are kept as JSON.
#[derive(Debug, Clone)]
pub enum Call {
    Ping,
    CreateContainer {
        name: Option<String>,
        body: ContainerCreateBody,
    },
    StartContainer(String),
    InspectContainer {
        id: String,
        options: Value,
    },
    ListContainers(ListContainersOptions),
    ConnectNetwork {
        network: String,
        request: NetworkConnectRequest,
    },
    DownloadFromContainer {
        id: String,
        options: Value,
    },
    WaitContainer {
        id: String,
        options: Value,
    },
    TagImage {
        image: String,
        options: Value,
    },
    Logs {
        id: String,
        options: LogsOptions,
    },
    CreateImage {
        options: Value,
        credentials: Option<DockerCredentials>,
    },
    InspectImage(String),
}

/// Scripted outcome of one pull.
pub enum PullScript {
    /// Two layer progress events, then the stream ends.
    Complete,
    /// One progress event, then the stream yields this error.
    FailWith(EngineError),
    /// The engine refuses the request outright.
    Reject(EngineError),
    /// The stream never yields anything.
    Stall,
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<Call>>,
    ping: Mutex<VecDeque<EngineError>>,
    inspect_image: Mutex<VecDeque<EngineError>>,
    pulls: Mutex<VecDeque<PullScript>>,
    inspect_container: Mutex<VecDeque<Result<ContainerInspectResponse, EngineError>>>,
    containers: Mutex<Vec<ContainerSummary>>,
    wait: Mutex<VecDeque<ContainerWaitResponse>>,
    logs: Mutex<Vec<LogOutput>>,
    archive: Mutex<Bytes>,
    created: Mutex<u32>,
}

#[derive(Clone, Default)]
pub struct RecordingDocker {
    inner: Arc<Inner>,
}

impl RecordingDocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().clone()
    }

    pub fn pulls(&self) -> Vec<(Value, Option<DockerCredentials>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateImage {
                    options,
                    credentials,
                } => Some((options, credentials)),
                _ => None,
            })
            .collect()
    }

    pub fn created_bodies(&self) -> Vec<(Option<String>, ContainerCreateBody)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateContainer { name, body } => Some((name, body)),
                _ => None,
            })
            .collect()
    }

    /// Next image inspection fails with `error`.
    pub fn fail_inspect_image(&self, error: EngineError) {
        self.inner.inspect_image.lock().push_back(error);
    }

    /// Next image inspection reports the image as unknown.
    pub fn missing_image(&self) {
        self.fail_inspect_image(EngineError::NotFound("No such image".to_string()));
    }

    pub fn script_pull(&self, script: PullScript) {
        self.inner.pulls.lock().push_back(script);
    }

    pub fn fail_ping(&self, error: EngineError) {
        self.inner.ping.lock().push_back(error);
    }

    pub fn script_inspect_container(&self, response: Result<ContainerInspectResponse, EngineError>) {
        self.inner.inspect_container.lock().push_back(response);
    }

    pub fn set_containers(&self, containers: Vec<ContainerSummary>) {
        *self.inner.containers.lock() = containers;
    }

    pub fn script_wait(&self, response: ContainerWaitResponse) {
        self.inner.wait.lock().push_back(response);
    }

    pub fn set_logs(&self, frames: Vec<LogOutput>) {
        *self.inner.logs.lock() = frames;
    }

    pub fn set_archive(&self, archive: Bytes) {
        *self.inner.archive.lock() = archive;
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().push(call);
    }
}

fn to_json<T: serde::Serialize>(options: &T) -> Value {
    serde_json::to_value(options).unwrap_or(Value::Null)
}

fn progress(status: &str, current: i64) -> CreateImageInfo {
    CreateImageInfo {
        id: Some("4abcf2066143".to_string()),
        status: Some(status.to_string()),
        progress_detail: Some(ProgressDetail {
            current: Some(current),
            total: Some(3_623_807),
        }),
        ..Default::default()
    }
}

#[async_trait]
impl DockerApi for RecordingDocker {
    async fn ping(&self) -> Result<(), EngineError> {
        self.record(Call::Ping);
        match self.inner.ping.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn create_container(
        &self,
        options: CreateContainerOptions,
        body: ContainerCreateBody,
    ) -> Result<ContainerCreateResponse, EngineError> {
        self.record(Call::CreateContainer {
            name: options.name.clone(),
            body,
        });
        let mut created = self.inner.created.lock();
        *created += 1;
        Ok(ContainerCreateResponse {
            id: format!("container-{}", *created),
            warnings: Vec::new(),
        })
    }

    async fn start_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(Call::StartContainer(id.to_string()));
        Ok(())
    }

    async fn inspect_container(
        &self,
        id: &str,
        options: InspectContainerOptions,
    ) -> Result<ContainerInspectResponse, EngineError> {
        self.record(Call::InspectContainer {
            id: id.to_string(),
            options: to_json(&options),
        });
        self.inner
            .inspect_container
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ContainerInspectResponse {
                    id: Some(id.to_string()),
                    ..Default::default()
                })
            })
    }

    async fn list_containers(
        &self,
        options: ListContainersOptions,
    ) -> Result<Vec<ContainerSummary>, EngineError> {
        self.record(Call::ListContainers(options));
        Ok(self.inner.containers.lock().clone())
    }

    async fn connect_network(
        &self,
        network: &str,
        request: NetworkConnectRequest,
    ) -> Result<(), EngineError> {
        self.record(Call::ConnectNetwork {
            network: network.to_string(),
            request,
        });
        Ok(())
    }

    async fn download_from_container(
        &self,
        id: &str,
        options: DownloadFromContainerOptions,
    ) -> Result<EngineStream<Bytes>, EngineError> {
        self.record(Call::DownloadFromContainer {
            id: id.to_string(),
            options: to_json(&options),
        });
        // Deliver the archive in two chunks, as the engine streams it.
        let archive = self.inner.archive.lock().clone();
        let middle = archive.len() / 2;
        let chunks = vec![Ok(archive.slice(..middle)), Ok(archive.slice(middle..))];
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn wait_container(
        &self,
        id: &str,
        options: WaitContainerOptions,
    ) -> Result<EngineStream<ContainerWaitResponse>, EngineError> {
        self.record(Call::WaitContainer {
            id: id.to_string(),
            options: to_json(&options),
        });
        let response = self.inner.wait.lock().pop_front().unwrap_or_default();
        Ok(Box::pin(stream::iter(vec![Ok(response)])))
    }

    async fn tag_image(&self, image: &str, options: TagImageOptions) -> Result<(), EngineError> {
        self.record(Call::TagImage {
            image: image.to_string(),
            options: to_json(&options),
        });
        Ok(())
    }

    async fn logs(
        &self,
        id: &str,
        options: LogsOptions,
    ) -> Result<EngineStream<LogOutput>, EngineError> {
        self.record(Call::Logs {
            id: id.to_string(),
            options,
        });
        let frames: Vec<_> = self.inner.logs.lock().iter().cloned().map(Ok).collect();
        Ok(Box::pin(stream::iter(frames)))
    }

    async fn create_image(
        &self,
        options: CreateImageOptions,
        credentials: Option<DockerCredentials>,
    ) -> Result<EngineStream<CreateImageInfo>, EngineError> {
        self.record(Call::CreateImage {
            options: to_json(&options),
            credentials,
        });
        let script = self
            .inner
            .pulls
            .lock()
            .pop_front()
            .unwrap_or(PullScript::Complete);

        match script {
            PullScript::Complete => Ok(Box::pin(stream::iter(vec![
                Ok(progress("Downloading", 1_048_576)),
                Ok(progress("Download complete", 3_623_807)),
            ]))),
            PullScript::FailWith(error) => Ok(Box::pin(stream::iter(vec![
                Ok(progress("Downloading", 1_048_576)),
                Err(error),
            ]))),
            PullScript::Reject(error) => Err(error),
            PullScript::Stall => Ok(Box::pin(stream::pending())),
        }
    }

    async fn inspect_image(&self, image: &str) -> Result<ImageInspect, EngineError> {
        self.record(Call::InspectImage(image.to_string()));
        match self.inner.inspect_image.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(ImageInspect {
                id: Some(format!("sha256:{}", image.len())),
                ..Default::default()
            }),
        }
    }
}
