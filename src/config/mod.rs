// ABOUTME: Engine connection configuration.
// ABOUTME: Parsed from YAML or the environment; durations use humantime syntax.

mod registry;

pub use registry::RegistryAuth;

use crate::error::{Error, Result};
use crate::runtime::RuntimeType;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Engine address, same syntax the docker CLI accepts.
pub const ENV_DOCKER_HOST: &str = "DOCKER_HOST";
pub const ENV_RUNTIME: &str = "CONTAINER_INTENTS_RUNTIME";
pub const ENV_PULL_PAUSE_TIMEOUT: &str = "CONTAINER_INTENTS_PULL_PAUSE_TIMEOUT";

/// How to reach the container engine and how patient to be with it.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Explicit runtime type (overrides auto-detection).
    #[serde(default)]
    pub runtime: Option<RuntimeType>,

    /// Explicit engine address: a socket path, `unix://` or `tcp://` URL.
    #[serde(default)]
    pub socket: Option<String>,

    /// Per-request timeout of the engine client.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Abort a pull that reports no progress for this long.
    #[serde(default = "default_pull_pause_timeout", with = "humantime_serde")]
    pub pull_pause_timeout: Duration,

    #[serde(default)]
    pub registry_auth: Option<RegistryAuth>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_pull_pause_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            socket: None,
            timeout: default_timeout(),
            pull_pause_timeout: default_pull_pause_timeout(),
            registry_auth: None,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `DOCKER_HOST` and the `CONTAINER_INTENTS_*` variables on top of self.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(host) = read_env(ENV_DOCKER_HOST) {
            self.socket = Some(host);
        }

        if let Some(runtime) = read_env(ENV_RUNTIME) {
            let runtime = runtime.parse::<RuntimeType>().map_err(|message| {
                Error::InvalidEnvVar {
                    var: ENV_RUNTIME.to_string(),
                    message,
                }
            })?;
            self.runtime = Some(runtime);
        }

        if let Some(timeout) = read_env(ENV_PULL_PAUSE_TIMEOUT) {
            self.pull_pause_timeout =
                humantime::parse_duration(&timeout).map_err(|e| Error::InvalidEnvVar {
                    var: ENV_PULL_PAUSE_TIMEOUT.to_string(),
                    message: e.to_string(),
                })?;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.pull_pause_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "pull_pause_timeout must be greater than zero".to_string(),
            ));
        }
        if self.timeout.as_secs() == 0 {
            return Err(Error::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
