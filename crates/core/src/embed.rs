use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::MessageError;

/// Timestamp input that expands to the current UTC time.
pub const TIMESTAMP_NOW: &str = "now";

/// A classic rich embed.
///
/// Absent fields are omitted from the wire form, and so is an empty field
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// Color as a decimal integer (e.g. `16711680` for red).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Hyperlink for the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    /// ISO 8601 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A name/value pair inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An image or thumbnail reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the color from a hex string such as `"#ff8800"` or `"ff8800"`.
    pub fn with_color_hex(mut self, hex: &str) -> Result<Self, MessageError> {
        let digits = hex.trim().trim_start_matches('#');
        let color = u32::from_str_radix(digits, 16).map_err(|e| {
            MessageError::invalid_argument(format!("invalid hex color {hex:?}: {e}"))
        })?;
        self.color = Some(color);
        Ok(self)
    }

    /// Set the timestamp. The sentinel [`TIMESTAMP_NOW`] expands to the
    /// current UTC time.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        self.timestamp = if timestamp == TIMESTAMP_NOW {
            Some(utc_now())
        } else {
            Some(timestamp)
        };
        self
    }

    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.set_image(url);
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.set_thumbnail(url);
        self
    }

    /// Append a field. Fields render inline unless `inline` is false.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> &mut Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Append an inline field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_field(name, value, true);
        self
    }

    pub fn set_author(
        &mut self,
        name: impl Into<String>,
        icon_url: Option<String>,
        url: Option<String>,
    ) -> &mut Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url,
            url,
        });
        self
    }

    pub fn set_thumbnail(&mut self, url: impl Into<String>) -> &mut Self {
        self.thumbnail = Some(EmbedMedia { url: url.into() });
        self
    }

    pub fn set_image(&mut self, url: impl Into<String>) -> &mut Self {
        self.image = Some(EmbedMedia { url: url.into() });
        self
    }

    pub fn set_footer(&mut self, text: impl Into<String>, icon_url: Option<String>) -> &mut Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
        });
        self
    }

    /// Stamp the embed with the current UTC time when `now` is true;
    /// otherwise the existing timestamp is kept.
    pub fn set_timestamp(&mut self, now: bool) -> &mut Self {
        if now {
            self.timestamp = Some(utc_now());
        }
        self
    }
}

fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// One embed or an ordered list of embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedInput {
    One(Embed),
    Many(Vec<Embed>),
}

impl EmbedInput {
    /// Embeds in wire order. A single embed becomes a one-element list.
    pub fn to_vec(&self) -> Vec<Embed> {
        match self {
            Self::One(embed) => vec![embed.clone()],
            Self::Many(embeds) => embeds.clone(),
        }
    }
}

impl From<Embed> for EmbedInput {
    fn from(embed: Embed) -> Self {
        Self::One(embed)
    }
}

impl From<Vec<Embed>> for EmbedInput {
    fn from(embeds: Vec<Embed>) -> Self {
        Self::Many(embeds)
    }
}
