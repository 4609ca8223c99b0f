// ABOUTME: Intent for listing containers with engine-side filters.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::collections::HashMap;

/// Builder for a container listing. Filters of different kinds combine with AND.
#[async_trait]
pub trait ListContainersIntent: Sealed + Send + Sized {
    /// Include stopped containers.
    fn with_show_all(self, show_all: bool) -> Self;

    fn with_limit(self, limit: u32) -> Self;

    /// Containers carrying all of these labels with these values.
    fn with_label_filter(self, labels: HashMap<String, String>) -> Self;

    fn with_name_filter<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_id_filter<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// `created`, `running`, `exited`, ...
    fn with_status_filter<I, S>(self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    fn with_network_filter<I, S>(self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    async fn perform(self) -> Result<Vec<ContainerSummary>, EngineError>;
}

/// Summary information about a container.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    pub id: ContainerId,
    /// First name, without the leading slash.
    pub name: String,
    pub image: String,
    /// Current state, e.g. `running`.
    pub state: String,
    /// Human readable status, e.g. `Up 3 minutes`.
    pub status: String,
    pub labels: HashMap<String, String>,
}
