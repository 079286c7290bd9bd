//! lilyhook CLI
//!
//! Send and edit Discord webhook messages from the command line.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lilyhook_client::{WebhookClient, WebhookConfig};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// lilyhook CLI: post messages to one or more Discord webhooks.
#[derive(Parser, Debug)]
#[command(name = "lilyhook", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "lilyhook.toml", global = true)]
    config: PathBuf,

    /// Webhook URL; repeat to fan out. Replaces the configured targets.
    #[arg(
        long = "webhook",
        env = "LILYHOOK_WEBHOOK_URL",
        value_delimiter = ',',
        global = true
    )]
    webhooks: Vec<String>,

    /// Display name override; repeat to give each target its own.
    #[arg(long = "username", global = true)]
    usernames: Vec<String>,

    /// Avatar URL override; repeat to give each target its own.
    #[arg(long = "avatar-url", global = true)]
    avatar_urls: Vec<String>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a short test message to every target.
    Ping,
    /// Send a message with content, an embed, components, or a file.
    Send(commands::send::SendArgs),
    /// Edit a message previously sent through a single webhook.
    Edit(commands::edit::EditArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if !cli.webhooks.is_empty() {
        config.targets = cli.webhooks.clone().into();
    }
    if let Some(username) = override_from(&cli.usernames) {
        config.username = Some(username);
    }
    if let Some(avatar_url) = override_from(&cli.avatar_urls) {
        config.avatar_url = Some(avatar_url);
    }

    let client = WebhookClient::from_config(config).context("invalid webhook configuration")?;

    let result = match cli.command {
        Command::Ping => commands::ping::run(&client, &cli.format).await,
        Command::Send(args) => commands::send::run(&client, &args, &cli.format).await,
        Command::Edit(args) => commands::edit::run(&client, &args, &cli.format).await,
    };

    client.close().await;
    result
}

/// Read the configuration file, falling back to defaults when it is absent.
fn load_config(path: &Path) -> anyhow::Result<WebhookConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(WebhookConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn override_from(values: &[String]) -> Option<lilyhook_client::Override> {
    match values {
        [] => None,
        [single] => Some(single.clone().into()),
        many => Some(many.to_vec().into()),
    }
}
