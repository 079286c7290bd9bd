//! Message model for lilyhook.
//!
//! Components, embeds, and the assembler that turns them into a webhook
//! payload. Nothing in this crate performs I/O; see `lilyhook-client` for
//! delivery.
//!
//! ```
//! use lilyhook_core::{ComponentTree, Container, MessageParts, Overrides, TextBlock, assemble};
//!
//! let mut tree = ComponentTree::new();
//! tree.add(Container::new().add(TextBlock::new("Hello")));
//!
//! let parts = MessageParts { components: Some(&tree), ..Default::default() };
//! let payload = assemble(&parts, &Overrides::default(), 0).unwrap();
//! assert!(payload.is_rich_layout());
//! ```

pub mod component;
pub mod embed;
pub mod error;
pub mod payload;
pub mod tree;

pub use component::{
    ButtonEmoji, ButtonStyle, Component, ComponentType, Container, LinkButton, Separator,
    Spacing, TextBlock, Thumbnail,
};
pub use embed::{
    Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedInput, EmbedMedia, TIMESTAMP_NOW,
};
pub use error::MessageError;
pub use payload::{
    IS_COMPONENTS_V2, MessageParts, Override, Overrides, WebhookPayload, assemble,
};
pub use tree::ComponentTree;
