use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DISCORD_TOKEN: &str = "DISCORD_TOKEN";
pub const CLIENT_ID: &str = "CLIENT_ID";
pub const GUILD_ID: &str = "GUILD_ID";
pub const APPS_SCRIPT_URL: &str = "APPS_SCRIPT_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing one or more environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Resolved runtime configuration. Every field is required.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Bot token used for the platform REST API.
    pub discord_token: String,
    /// Application id the commands are registered under.
    pub client_id: String,
    /// Guild (server) the commands are registered in.
    pub guild_id: String,
    /// Automation endpoint every command POSTs to.
    pub apps_script_url: String,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("discord_token", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("guild_id", &self.guild_id)
            .field("apps_script_url", &self.apps_script_url)
            .finish()
    }
}

/// Optional file layer. Environment variables override it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub discord_token: Option<String>,
    pub client_id: Option<String>,
    pub guild_id: Option<String>,
    pub apps_script_url: Option<String>,
}

impl ConfigFile {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }
}

impl RelayConfig {
    /// Merge the file layer with an environment lookup. Blank values count as
    /// missing, and every missing setting is reported at once.
    pub fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut pick = |key: &'static str, fallback: Option<String>| -> String {
            let value = env(key)
                .filter(|v| !v.trim().is_empty())
                .or(fallback.filter(|v| !v.trim().is_empty()));
            value.unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let config = Self {
            discord_token: pick(DISCORD_TOKEN, file.discord_token),
            client_id: pick(CLIENT_ID, file.client_id),
            guild_id: pick(GUILD_ID, file.guild_id),
            apps_script_url: pick(APPS_SCRIPT_URL, file.apps_script_url),
        };

        if missing.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}
