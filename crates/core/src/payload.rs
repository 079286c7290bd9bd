use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::component::ComponentType;
use crate::embed::{Embed, EmbedInput};
use crate::error::MessageError;
use crate::tree::ComponentTree;

/// Message flag marking a rich-layout (components v2) message.
pub const IS_COMPONENTS_V2: u32 = 1 << 15;

/// A per-target display override (username or avatar URL).
///
/// A uniform value applies to every target; a per-target list is aligned
/// with the target list by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Override {
    Uniform(String),
    PerTarget(Vec<String>),
}

impl Override {
    /// Fails if the override carries no value at all.
    pub fn ensure_present(&self, what: &str) -> Result<(), MessageError> {
        let empty = match self {
            Self::Uniform(value) => value.is_empty(),
            Self::PerTarget(values) => values.is_empty(),
        };
        if empty {
            return Err(MessageError::invalid_argument(format!("{what} is not defined")));
        }
        Ok(())
    }

    /// Fails if a per-target list does not line up with `target_count`.
    pub fn check_alignment(&self, what: &str, target_count: usize) -> Result<(), MessageError> {
        match self {
            Self::PerTarget(values) if values.len() != target_count => {
                Err(MessageError::invalid_argument(format!(
                    "{what} has {} entries but there are {target_count} targets",
                    values.len()
                )))
            }
            _ => Ok(()),
        }
    }

    /// The value for the target at `index`.
    pub fn resolve(&self, what: &str, index: usize) -> Result<&str, MessageError> {
        match self {
            Self::Uniform(value) => Ok(value),
            Self::PerTarget(values) => values.get(index).map(String::as_str).ok_or_else(|| {
                MessageError::invalid_argument(format!("no {what} for target {index}"))
            }),
        }
    }
}

impl From<&str> for Override {
    fn from(value: &str) -> Self {
        Self::Uniform(value.to_owned())
    }
}

impl From<String> for Override {
    fn from(value: String) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<String>> for Override {
    fn from(values: Vec<String>) -> Self {
        Self::PerTarget(values)
    }
}

impl From<Vec<&str>> for Override {
    fn from(values: Vec<&str>) -> Self {
        Self::PerTarget(values.into_iter().map(str::to_owned).collect())
    }
}

/// The caller-supplied body of a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageParts<'a> {
    pub content: Option<&'a str>,
    pub embeds: Option<&'a EmbedInput>,
    pub components: Option<&'a ComponentTree>,
}

impl MessageParts<'_> {
    /// True when content, embeds and components are all absent.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.embeds.is_none() && self.components.is_none()
    }
}

/// Username and avatar overrides configured on a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub username: Option<&'a Override>,
    pub avatar_url: Option<&'a Override>,
}

/// Request body for executing or editing a webhook message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
}

impl WebhookPayload {
    /// Whether this payload uses the rich-layout wire format.
    pub fn is_rich_layout(&self) -> bool {
        self.flags.is_some_and(|f| f & IS_COMPONENTS_V2 != 0)
    }

    pub fn has_components(&self) -> bool {
        self.components.is_some()
    }
}

/// Assemble the payload for the target at `index`.
///
/// A rich-layout tree excludes content and embeds. A tree made only of link
/// buttons degrades to a classic action row and may be combined with both.
pub fn assemble(
    parts: &MessageParts<'_>,
    overrides: &Overrides<'_>,
    index: usize,
) -> Result<WebhookPayload, MessageError> {
    let mut payload = WebhookPayload::default();

    if let Some(tree) = parts.components {
        let legacy = tree.legacy_compatible();
        if !legacy && (parts.content.is_some() || parts.embeds.is_some()) {
            return Err(MessageError::invalid_argument(
                "rich component messages cannot include content or embeds",
            ));
        }

        let built = tree.build()?;
        if legacy {
            payload.components = Some(vec![json!({
                "type": ComponentType::ActionRow,
                "components": built,
            })]);
        } else {
            payload.flags = Some(IS_COMPONENTS_V2);
            payload.components = Some(built);
        }
    }

    if let Some(username) = overrides.username {
        payload.username = Some(username.resolve("username", index)?.to_owned());
    }

    if let Some(avatar_url) = overrides.avatar_url {
        payload.avatar_url = Some(avatar_url.resolve("avatar url", index)?.to_owned());
    }

    if let Some(content) = parts.content {
        payload.content = Some(content.to_owned());
    }

    if let Some(embeds) = parts.embeds {
        payload.embeds = Some(embeds.to_vec());
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Container, LinkButton, TextBlock};

    fn rich_tree() -> ComponentTree {
        let mut tree = ComponentTree::new();
        tree.add(Container::new().add(TextBlock::new("Hello")));
        tree
    }

    fn button_tree() -> ComponentTree {
        let mut tree = ComponentTree::new();
        tree.add(LinkButton::labeled("https://example.com", "Open"));
        tree
    }

    #[test]
    fn content_only_payload() {
        let parts = MessageParts {
            content: Some("Hello!"),
            ..Default::default()
        };
        let payload = assemble(&parts, &Overrides::default(), 0).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, json!({"content": "Hello!"}));
    }

    #[test]
    fn rich_tree_sets_flag_and_top_level_components() {
        let tree = rich_tree();
        let parts = MessageParts {
            components: Some(&tree),
            ..Default::default()
        };
        let payload = assemble(&parts, &Overrides::default(), 0).unwrap();
        assert!(payload.is_rich_layout());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "flags": 32768,
                "components": [{
                    "type": 17,
                    "spoiler": false,
                    "components": [{"type": 10, "content": "Hello"}]
                }]
            })
        );
    }

    #[test]
    fn rich_tree_rejects_content() {
        let tree = rich_tree();
        let parts = MessageParts {
            content: Some("hi"),
            components: Some(&tree),
            ..Default::default()
        };
        let err = assemble(&parts, &Overrides::default(), 0).unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));
    }

    #[test]
    fn rich_tree_rejects_embed() {
        let tree = rich_tree();
        let embed = EmbedInput::from(Embed::new().with_title("t"));
        let parts = MessageParts {
            embeds: Some(&embed),
            components: Some(&tree),
            ..Default::default()
        };
        let err = assemble(&parts, &Overrides::default(), 0).unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));
    }

    #[test]
    fn legacy_tree_wraps_in_action_row_alongside_content_and_embed() {
        let tree = button_tree();
        let embed = EmbedInput::from(Embed::new().with_title("t"));
        let parts = MessageParts {
            content: Some("hi"),
            embeds: Some(&embed),
            components: Some(&tree),
        };
        let payload = assemble(&parts, &Overrides::default(), 0).unwrap();
        assert!(!payload.is_rich_layout());
        assert!(payload.flags.is_none());

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["components"][0]["type"], 1);
        assert_eq!(json["components"][0]["components"][0]["type"], 2);
        assert_eq!(json["components"][0]["components"][0]["style"], 5);
        assert_eq!(json["content"], "hi");
        assert_eq!(json["embeds"][0]["title"], "t");
    }

    #[test]
    fn per_target_overrides_select_by_index() {
        let username = Override::from(vec!["A", "B"]);
        let avatar = Override::from("https://example.com/a.png");
        let overrides = Overrides {
            username: Some(&username),
            avatar_url: Some(&avatar),
        };
        let parts = MessageParts {
            content: Some("hi"),
            ..Default::default()
        };

        let first = assemble(&parts, &overrides, 0).unwrap();
        let second = assemble(&parts, &overrides, 1).unwrap();
        assert_eq!(first.username.as_deref(), Some("A"));
        assert_eq!(second.username.as_deref(), Some("B"));
        assert_eq!(first.avatar_url, second.avatar_url);
    }

    #[test]
    fn out_of_range_override_fails() {
        let username = Override::from(vec!["A"]);
        let overrides = Overrides {
            username: Some(&username),
            ..Default::default()
        };
        let parts = MessageParts {
            content: Some("hi"),
            ..Default::default()
        };
        let err = assemble(&parts, &overrides, 1).unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));
    }

    #[test]
    fn embed_list_serializes_elementwise() {
        let embeds = EmbedInput::from(vec![
            Embed::new().with_title("one"),
            Embed::new().with_title("two"),
        ]);
        let parts = MessageParts {
            embeds: Some(&embeds),
            ..Default::default()
        };
        let json = serde_json::to_value(assemble(&parts, &Overrides::default(), 0).unwrap())
            .unwrap();
        assert_eq!(json["embeds"], json!([{"title": "one"}, {"title": "two"}]));
    }

    #[test]
    fn override_alignment_and_presence() {
        let list = Override::from(vec!["A", "B"]);
        assert!(list.check_alignment("username", 2).is_ok());
        assert!(list.check_alignment("username", 3).is_err());
        assert!(Override::from("A").check_alignment("username", 5).is_ok());

        assert!(Override::from("").ensure_present("username").is_err());
        assert!(Override::PerTarget(Vec::new()).ensure_present("username").is_err());
        assert!(list.ensure_present("username").is_ok());
    }

    #[test]
    fn override_deserializes_from_string_or_list() {
        let one: Override = serde_json::from_value(json!("bot")).unwrap();
        assert_eq!(one, Override::Uniform("bot".into()));
        let many: Override = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(many, Override::PerTarget(vec!["a".into(), "b".into()]));
    }
}
