use anyhow::Context;
use clap::Args;
use lilyhook_client::{Attachment, ComponentTree, LinkButton, MessageParts, WebhookClient};
use tracing::info;

use super::{EmbedArgs, print_results};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message text.
    #[arg(long)]
    pub content: Option<String>,
    #[command(flatten)]
    pub embed: EmbedArgs,
    /// Components as a JSON array (string or @file path).
    #[arg(long)]
    pub components: Option<String>,
    /// Add a link button pointing at this URL.
    #[arg(long)]
    pub button_url: Option<String>,
    /// Link button label.
    #[arg(long, requires = "button_url")]
    pub button_label: Option<String>,
    /// Link button emoji.
    #[arg(long, requires = "button_url")]
    pub button_emoji: Option<String>,
    /// File to attach.
    #[arg(long)]
    pub file: Option<std::path::PathBuf>,
    /// Display name of the attached file.
    #[arg(long, requires = "file")]
    pub file_name: Option<String>,
}

pub async fn run(
    client: &WebhookClient,
    args: &SendArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let embeds = args.embed.build()?;
    let tree = build_tree(args)?;

    let mut attachment = match &args.file {
        Some(path) => {
            let attachment = Attachment::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Some(match &args.file_name {
                Some(name) => attachment.with_name(name),
                None => attachment,
            })
        }
        None => None,
    };

    let parts = MessageParts {
        content: args.content.as_deref(),
        embeds: embeds.as_ref(),
        components: tree.as_ref(),
    };
    let result = client.send(parts, attachment.as_mut()).await;
    if let Some(attachment) = attachment.as_mut() {
        attachment.close(false);
    }

    let results = result?;
    info!(targets = results.len(), "message delivered");
    print_results(&results, format)
}

fn build_tree(args: &SendArgs) -> anyhow::Result<Option<ComponentTree>> {
    let mut tree = ComponentTree::new();

    if let Some(raw) = &args.components {
        let json = if let Some(path) = raw.strip_prefix('@') {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        } else {
            raw.clone()
        };
        let values: Vec<serde_json::Value> =
            serde_json::from_str(&json).context("components must be a JSON array")?;
        for value in values {
            tree.add_value(value)?;
        }
    }

    if let Some(url) = &args.button_url {
        tree.add(LinkButton::new(
            url,
            args.button_label.clone(),
            args.button_emoji.clone(),
        )?);
    }

    Ok((!tree.is_empty()).then_some(tree))
}
