use std::fs;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dataplane::{DATAPLANE_URL_ENV, DEFAULT_DATAPLANE_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_dataplane_url")]
    pub dataplane_api_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_dataplane_url() -> String {
    DEFAULT_DATAPLANE_URL.to_string()
}

impl Config {
    /// Load from a YAML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Build the runtime configuration: an optional YAML file named by
    /// `CONFIG_PATH`, with `MEMORA_CP_DATAPLANE_API_URL` taking
    /// precedence for the dataplane base URL.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::load(&path)?,
            Err(_) => Self::default(),
        };
        if let Ok(url) = std::env::var(DATAPLANE_URL_ENV) {
            config.dataplane_api_url = url;
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dataplane_api_url: default_dataplane_url(),
        }
    }
}
