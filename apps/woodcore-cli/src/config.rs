use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use woodcore_sdk::ClientConfig;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "woodcore.yaml";

const ENV_PREFIX: &str = "WOODCORE_";

/// Connection settings, layered from the YAML file, then `WOODCORE_*`
/// variables, then command line flags.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load the file at `path`, or `woodcore.yaml` if it exists, and merge the environment over it.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        match path {
            Some(path) => {
                anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
                figment = figment.merge(Yaml::file(path));
            }
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    figment = figment.merge(Yaml::file(default));
                }
            }
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("failed to load configuration")
    }

    /// Apply command line flags over the loaded settings.
    #[must_use]
    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if base_url.is_some() {
            self.base_url = base_url;
        }
        self
    }

    pub fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let api_key = self.api_key.context(
            "no API key: pass --api-key, set WOODCORE_API_KEY or add api_key to the config file",
        )?;
        let mut config = ClientConfig::new(api_key)?;
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
