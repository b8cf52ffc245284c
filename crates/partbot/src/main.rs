use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use partbot::console::{parse_invocation, ConsoleResponder};
use partbot::registration::CommandRegistrar;
use partbot_models::command::registration_payload;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "partbot",
    about = "Relay part-request slash commands to the team parts sheet"
)]
struct Cli {
    /// Optional TOML file with settings; environment variables take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Register the slash commands in the configured guild
    Register,

    /// Print the slash command registration JSON
    Schema,

    /// Run one command against the sheet and print the reply
    Run {
        /// Command name, e.g. `inventory`
        command: String,

        /// Command option as NAME=VALUE (repeatable)
        #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,

        /// Requester name sent with part requests
        #[arg(short, long, default_value = "console")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Every setting is required before anything else runs.
    let config = partbot::load_config(cli.config.as_deref()).context("Invalid configuration")?;

    match cli.command {
        CliCommand::Register => {
            let count = CommandRegistrar::new(&config)
                .register()
                .await
                .context("Failed to register commands")?;
            println!("Registered {count} commands.");
        }
        CliCommand::Schema => {
            println!("{}", serde_json::to_string_pretty(&registration_payload())?);
        }
        CliCommand::Run {
            command,
            options,
            user,
        } => {
            let invocation = parse_invocation(&command, &user, &options)?;
            let dispatcher = partbot::build_dispatcher(&config);
            dispatcher
                .dispatch(&invocation, &ConsoleResponder::stdout())
                .await;
        }
    }

    Ok(())
}
