use anyhow::{Context, Result};
use partbot_models::command::registration_payload;
use partbot_models::RelayConfig;
use reqwest::Client;
use tracing::info;

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Registers the bot's slash commands in one guild, replacing whatever set
/// was registered before.
pub struct CommandRegistrar {
    client: Client,
    api_base: String,
    token: String,
    application_id: String,
    guild_id: String,
}

impl CommandRegistrar {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: DISCORD_API_BASE.to_string(),
            token: config.discord_token.clone(),
            application_id: config.client_id.clone(),
            guild_id: config.guild_id.clone(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.api_base, self.application_id, self.guild_id
        )
    }

    /// PUT the full command set. Returns how many commands were registered.
    pub async fn register(&self) -> Result<usize> {
        let payload = registration_payload();
        let count = payload.as_array().map(Vec::len).unwrap_or_default();

        info!(guild = %self.guild_id, commands = count, "Registering slash commands");

        self.client
            .put(self.url())
            .header("Authorization", format!("Bot {}", self.token))
            .json(&payload)
            .send()
            .await
            .context("Failed to reach the Discord API")?
            .error_for_status()
            .context("Discord rejected the command registration")?;

        info!(guild = %self.guild_id, "Slash commands registered");
        Ok(count)
    }
}
