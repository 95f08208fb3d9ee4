//! Service configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration, read from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Root directory holding `data/data.csv` (`REPO_ROOT`)
    #[serde(default = "default_repo_root")]
    pub repo_root: PathBuf,

    /// API server port (`DELAY_API_PORT`)
    #[serde(default = "default_api_port", rename = "delay_api_port")]
    pub api_port: u16,
}

fn default_repo_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_api_port() -> u16 {
    8080
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            repo_root: default_repo_root(),
            api_port: default_api_port(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::default())
    }

    fn from_source(source: config::Environment) -> Result<Self> {
        let config = config::Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }
}
