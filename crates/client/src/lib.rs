//! Webhook delivery for lilyhook.
//!
//! [`WebhookClient`] assembles a message with `lilyhook-core` and posts it to
//! one or more
//! [Discord webhooks](https://discord.com/developers/docs/resources/webhook),
//! optionally with a file attached. Messages sent through a single webhook
//! can be edited afterwards.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use lilyhook_client::{MessageParts, WebhookClient, WebhookConfig};
//!
//! # async fn example() -> Result<(), lilyhook_client::WebhookError> {
//! let config = WebhookConfig::new("https://discord.com/api/webhooks/123/abc")
//!     .with_username("lilyhook");
//! let client = WebhookClient::from_config(config)?;
//!
//! let parts = MessageParts { content: Some("Hello!"), ..Default::default() };
//! let sent = client.send(parts, None).await;
//! client.close().await;
//! println!("{:?}", sent?);
//! # Ok(())
//! # }
//! ```

pub mod attachment;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use attachment::{Attachment, Ownership};
pub use client::WebhookClient;
pub use config::{Targets, WebhookConfig};
pub use error::WebhookError;
pub use transport::{
    HttpMethod, HttpTransport, RequestBody, Transport, TransportResponse, WebhookRequest,
};
pub use types::DispatchResult;

// Re-export the message model so callers need a single dependency.
pub use lilyhook_core::{
    Component, ComponentTree, Container, Embed, EmbedInput, LinkButton, MessageParts, Override,
    Separator, Spacing, TextBlock, Thumbnail,
};
