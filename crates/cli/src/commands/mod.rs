pub mod edit;
pub mod ping;
pub mod send;

use lilyhook_client::DispatchResult;

use crate::OutputFormat;

pub(crate) fn print_results(
    results: &[DispatchResult],
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Text => {
            for (index, result) in results.iter().enumerate() {
                println!(
                    "[{index}] message {} in channel {}",
                    result.message_id, result.channel_id
                );
            }
        }
    }
    Ok(())
}

/// Embed options shared by `send` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct EmbedArgs {
    /// Embed title.
    #[arg(long)]
    pub title: Option<String>,
    /// Embed description.
    #[arg(long)]
    pub description: Option<String>,
    /// Embed color as hex, e.g. `#5865f2`.
    #[arg(long)]
    pub color: Option<String>,
    /// Embed image URL.
    #[arg(long)]
    pub image: Option<String>,
    /// Embed footer text.
    #[arg(long)]
    pub footer: Option<String>,
    /// Embed fields (name=value).
    #[arg(long = "field", value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,
    /// Stamp the embed with the current time.
    #[arg(long)]
    pub timestamp: bool,
}

impl EmbedArgs {
    /// Build the embed, or `None` when no embed option was given.
    pub fn build(&self) -> anyhow::Result<Option<lilyhook_client::EmbedInput>> {
        if self.title.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.image.is_none()
            && self.footer.is_none()
            && self.fields.is_empty()
            && !self.timestamp
        {
            return Ok(None);
        }

        let mut embed = lilyhook_client::Embed::new();
        if let Some(title) = &self.title {
            embed = embed.with_title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.with_description(description);
        }
        if let Some(color) = &self.color {
            embed = embed.with_color_hex(color)?;
        }
        if let Some(image) = &self.image {
            embed.set_image(image);
        }
        if let Some(footer) = &self.footer {
            embed.set_footer(footer, None);
        }
        for (name, value) in &self.fields {
            embed.add_field(name, value, true);
        }
        embed.set_timestamp(self.timestamp);
        Ok(Some(embed.into()))
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
