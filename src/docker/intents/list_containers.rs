// ABOUTME: Docker adapter for listing containers.
// ABOUTME: Filters accumulate into the engine's filter map; results map to summaries.

use crate::controller::sealed::Sealed;
use crate::controller::{ContainerSummary, EngineError, ListContainersIntent};
use crate::docker::api::DockerApi;
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::query_parameters::ListContainersOptions;
use std::collections::HashMap;
use std::sync::Arc;

pub struct ListContainersDockerIntent<C> {
    client: Arc<C>,
    show_all: bool,
    limit: Option<u32>,
    filters: HashMap<String, Vec<String>>,
}

impl<C: DockerApi> ListContainersDockerIntent<C> {
    pub(crate) fn new(client: Arc<C>) -> Self {
        Self {
            client,
            show_all: false,
            limit: None,
            filters: HashMap::new(),
        }
    }

    fn with_filter<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_string(), values);
        }
        self
    }
}

impl<C: DockerApi> Sealed for ListContainersDockerIntent<C> {}

fn to_summary(c: bollard::models::ContainerSummary) -> ContainerSummary {
    let name = c
        .names
        .unwrap_or_default()
        .first()
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_default();

    ContainerSummary {
        id: ContainerId::new(c.id.unwrap_or_default()),
        name,
        image: c.image.unwrap_or_default(),
        state: c.state.map(|s| s.to_string()).unwrap_or_default(),
        status: c.status.unwrap_or_default(),
        labels: c.labels.unwrap_or_default(),
    }
}

#[async_trait]
impl<C: DockerApi> ListContainersIntent for ListContainersDockerIntent<C> {
    fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn with_label_filter(self, labels: HashMap<String, String>) -> Self {
        let mut pairs: Vec<String> = labels
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        pairs.sort();
        self.with_filter("label", pairs)
    }

    fn with_name_filter<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_filter("name", names)
    }

    fn with_id_filter<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_filter("id", ids)
    }

    fn with_status_filter<I, S>(self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_filter("status", statuses)
    }

    fn with_network_filter<I, S>(self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_filter("network", networks)
    }

    async fn perform(self) -> Result<Vec<ContainerSummary>, EngineError> {
        let options = ListContainersOptions {
            all: self.show_all,
            limit: self.limit.map(|l| i32::try_from(l).unwrap_or(i32::MAX)),
            filters: Some(self.filters.clone()),
            ..Default::default()
        };

        tracing::debug!(all = self.show_all, filters = ?self.filters, "listing containers");

        let containers = self.client.list_containers(options).await?;
        Ok(containers.into_iter().map(to_summary).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::ContainerSummaryStateEnum;

    fn summary(state: Option<ContainerSummaryStateEnum>) -> bollard::models::ContainerSummary {
        bollard::models::ContainerSummary {
            id: Some("0123456789abcdef".to_string()),
            names: Some(vec!["/api".to_string(), "/api-alias".to_string()]),
            state,
            ..Default::default()
        }
    }

    #[test]
    fn state_uses_engine_wire_value() {
        let running = to_summary(summary(Some(ContainerSummaryStateEnum::RUNNING)));
        assert_eq!(running.state, "running");
        assert_eq!(running.name, "api");

        let exited = to_summary(summary(Some(ContainerSummaryStateEnum::EXITED)));
        assert_eq!(exited.state, "exited");
    }

    #[test]
    fn empty_or_missing_state_is_blank() {
        assert_eq!(to_summary(summary(Some(ContainerSummaryStateEnum::EMPTY))).state, "");
        assert_eq!(to_summary(summary(None)).state, "");
    }
}
