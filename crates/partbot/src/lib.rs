//! partbot - relays the team's part-request slash commands to the parts sheet.
//!
//! Slash command invocations are parsed into typed commands, sent as one JSON
//! POST to the sheet's automation endpoint, and the reply is rendered back as
//! chat text.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use partbot::models::{CommandInvocation, RelayConfig};
//! use partbot::relay::{Dispatcher, Responder};
//! ```

pub use partbot_models as models;
pub use partbot_relay as relay;

pub mod console;
pub mod registration;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use partbot_models::{ConfigFile, RelayConfig};
use partbot_relay::{Dispatcher, HttpAutomationClient};

/// Resolve configuration from an optional TOML file and the environment.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, anyhow::Error> {
    let file = match path {
        Some(path) => {
            let toml_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            ConfigFile::from_toml(&toml_str)?
        }
        None => ConfigFile::default(),
    };
    Ok(RelayConfig::resolve(file, |key| std::env::var(key).ok())?)
}

/// Build a dispatcher that talks to the configured automation endpoint.
pub fn build_dispatcher(config: &RelayConfig) -> Dispatcher {
    Dispatcher::new(Arc::new(HttpAutomationClient::new(
        config.apps_script_url.clone(),
    )))
}
