use clap::Args;
use lilyhook_client::WebhookClient;

use super::{EmbedArgs, print_results};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// ID of the message to edit.
    pub message_id: u64,
    /// New message text.
    #[arg(long)]
    pub content: Option<String>,
    #[command(flatten)]
    pub embed: EmbedArgs,
}

pub async fn run(
    client: &WebhookClient,
    args: &EditArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let embeds = args.embed.build()?;
    let result = client
        .edit(args.message_id, args.content.as_deref(), embeds.as_ref())
        .await?;
    print_results(&[result], format)
}
