use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chat_core::Controls;
use chat_gateway::GatewaySettings;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

/// Deployment config, read from the working directory at startup.
pub(crate) const CONFIG_FILENAME: &str = "chat_client.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Operator-provided settings. The end user cannot change these in-session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct DeploymentConfig {
    pub base_url: String,
    pub load_trigger: bool,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        let gateway = GatewaySettings::default();
        Self {
            base_url: gateway.base_url,
            load_trigger: Controls::default().load_trigger,
            connect_timeout_secs: gateway.connect_timeout.as_secs(),
            request_timeout_secs: gateway.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
        }
    }
}

impl DeploymentConfig {
    pub(crate) fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..GatewaySettings::default()
        }
    }

    pub(crate) fn controls(&self) -> Controls {
        Controls {
            load_trigger: self.load_trigger,
        }
    }
}

/// Loads the deployment config; a missing file means defaults.
pub(crate) fn load_config(path: &Path) -> Result<DeploymentConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(DeploymentConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
