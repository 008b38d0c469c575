use std::path::Path;

use serde::{Deserialize, Serialize};
use smartbus_gateway::GatewaySettings;
use smartbus_transport::SerialConfig;

use crate::exit::{CliError, CliResult, CONFIG_ERROR};

/// Broker connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive: u64,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "smartbus".to_string(),
            keep_alive: 60,
        }
    }
}

/// Process configuration, loaded from a JSON file.
///
/// Every field is optional; missing ones take the Zone Beast defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub gateway: GatewaySettings,
    pub serial: SerialConfig,
    pub mqtt: MqttSettings,
}

impl Config {
    /// Load from `path`, or the built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CliError::new(
                CONFIG_ERROR,
                format!("failed reading {}: {err}", path.display()),
            )
        })?;
        Self::from_json(&raw)
            .map_err(|err| CliError::new(CONFIG_ERROR, format!("{}: {err}", path.display())))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
