use serde::{Deserialize, Deserializer, Serialize};

/// Where a message landed: one per delivered target, in target order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DispatchResult {
    /// Message ID.
    pub message_id: u64,
    /// Channel ID.
    pub channel_id: u64,
}

/// Message object returned by the webhook endpoint when `?wait=true` is set.
///
/// Only the identifiers are read; snowflakes arrive as strings but plain
/// numbers are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WebhookMessageResponse {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    #[serde(deserialize_with = "snowflake")]
    pub channel_id: u64,
}

impl From<WebhookMessageResponse> for DispatchResult {
    fn from(resp: WebhookMessageResponse) -> Self {
        Self {
            message_id: resp.id,
            channel_id: resp.channel_id,
        }
    }
}

fn snowflake<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
