use serde::Serialize;
use serde_json::{Map, Value};
use serde_repr::Serialize_repr;

use crate::error::MessageError;

/// Wire discriminant of a message component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    /// Legacy row holding interactive components.
    ActionRow = 1,
    Button = 2,
    TextDisplay = 10,
    Thumbnail = 11,
    Separator = 14,
    Container = 17,
}

impl ComponentType {
    /// Look up a discriminant by its wire code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::ActionRow),
            2 => Some(Self::Button),
            10 => Some(Self::TextDisplay),
            11 => Some(Self::Thumbnail),
            14 => Some(Self::Separator),
            17 => Some(Self::Container),
            _ => None,
        }
    }
}

/// Button style. Only link buttons can be sent by a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Link = 5,
}

/// Vertical padding of a [`Separator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum Spacing {
    #[default]
    Small = 1,
    Large = 2,
}

/// A renderable node of a rich-layout message.
///
/// Every variant validates its own invariants when it is constructed, so a
/// `Component` value is always serializable as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    TextBlock(TextBlock),
    Separator(Separator),
    LinkButton(LinkButton),
    Thumbnail(Thumbnail),
    Container(Container),
}

impl Component {
    /// The wire discriminant of this node.
    pub fn kind(&self) -> ComponentType {
        match self {
            Self::TextBlock(_) => ComponentType::TextDisplay,
            Self::Separator(_) => ComponentType::Separator,
            Self::LinkButton(_) => ComponentType::Button,
            Self::Thumbnail(_) => ComponentType::Thumbnail,
            Self::Container(_) => ComponentType::Container,
        }
    }

    pub fn is_link_button(&self) -> bool {
        matches!(self, Self::LinkButton(_))
    }

    /// Serialize this node to its wire mapping.
    pub fn to_value(&self) -> Result<Value, MessageError> {
        serde_json::to_value(self).map_err(|e| {
            MessageError::invalid_component(format!("failed to serialize component: {e}"))
        })
    }
}

/// A markdown text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    kind: ComponentType,
    content: String,
}

impl TextBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            kind: ComponentType::TextDisplay,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A spacer between components, optionally drawn as a divider line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Separator {
    #[serde(rename = "type")]
    kind: ComponentType,
    spacing: Spacing,
    divider: bool,
}

impl Separator {
    pub fn new(spacing: Spacing, divider: bool) -> Self {
        Self {
            kind: ComponentType::Separator,
            spacing,
            divider,
        }
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn divider(&self) -> bool {
        self.divider
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::new(Spacing::Small, true)
    }
}

/// Emoji shown on a button. Unicode emoji carry a `null` id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonEmoji {
    pub name: String,
    pub id: Option<String>,
}

/// A button that opens a URL.
///
/// At least one of `label` and `emoji` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButton {
    #[serde(rename = "type")]
    kind: ComponentType,
    style: ButtonStyle,
    url: String,
    disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<ButtonEmoji>,
}

impl LinkButton {
    /// Create a link button, failing if both `label` and `emoji` are absent.
    pub fn new(
        url: impl Into<String>,
        label: Option<String>,
        emoji: Option<String>,
    ) -> Result<Self, MessageError> {
        if label.is_none() && emoji.is_none() {
            return Err(MessageError::invalid_argument(
                "a link button needs a label or an emoji",
            ));
        }
        Ok(Self {
            kind: ComponentType::Button,
            style: ButtonStyle::Link,
            url: url.into(),
            disabled: false,
            label,
            emoji: emoji.map(|name| ButtonEmoji { name, id: None }),
        })
    }

    /// Create a link button with a text label.
    pub fn labeled(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: ComponentType::Button,
            style: ButtonStyle::Link,
            url: url.into(),
            disabled: false,
            label: Some(label.into()),
            emoji: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_ref().map(|e| e.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MediaItem {
    url: String,
}

/// A small image, usually placed next to a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    #[serde(rename = "type")]
    kind: ComponentType,
    spoiler: bool,
    media: MediaItem,
}

impl Thumbnail {
    /// Create a thumbnail, failing if `url` is empty.
    pub fn new(url: impl Into<String>) -> Result<Self, MessageError> {
        let url = url.into();
        if url.is_empty() {
            return Err(MessageError::invalid_argument("thumbnail media url is empty"));
        }
        Ok(Self {
            kind: ComponentType::Thumbnail,
            spoiler: false,
            media: MediaItem { url },
        })
    }

    #[must_use]
    pub fn with_spoiler(mut self, spoiler: bool) -> Self {
        self.spoiler = spoiler;
        self
    }

    pub fn url(&self) -> &str {
        &self.media.url
    }

    pub fn is_spoiler(&self) -> bool {
        self.spoiler
    }
}

/// A box grouping child components, with an optional accent stripe.
///
/// Children are appended while the container is being built and are owned
/// exclusively by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    accent_color: Option<u32>,
    spoiler: bool,
    components: Vec<Component>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            kind: ComponentType::Container,
            accent_color: None,
            spoiler: false,
            components: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_accent_color(mut self, color: u32) -> Self {
        self.accent_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_spoiler(mut self, spoiler: bool) -> Self {
        self.spoiler = spoiler;
        self
    }

    /// Append a child component.
    #[must_use]
    pub fn add(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Append a child given in its raw wire form.
    pub fn try_with_value(mut self, value: Value) -> Result<Self, MessageError> {
        self.components.push(Component::try_from(value)?);
        Ok(self)
    }

    pub fn children(&self) -> &[Component] {
        &self.components
    }

    pub fn accent_color(&self) -> Option<u32> {
        self.accent_color
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl From<TextBlock> for Component {
    fn from(c: TextBlock) -> Self {
        Self::TextBlock(c)
    }
}

impl From<Separator> for Component {
    fn from(c: Separator) -> Self {
        Self::Separator(c)
    }
}

impl From<LinkButton> for Component {
    fn from(c: LinkButton) -> Self {
        Self::LinkButton(c)
    }
}

impl From<Thumbnail> for Component {
    fn from(c: Thumbnail) -> Self {
        Self::Thumbnail(c)
    }
}

impl From<Container> for Component {
    fn from(c: Container) -> Self {
        Self::Container(c)
    }
}

/// Parse a component from its wire mapping, validating it the same way the
/// typed constructors do.
impl TryFrom<Value> for Component {
    type Error = MessageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(MessageError::invalid_component("expected a JSON object"));
        };
        let code = map
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| MessageError::invalid_component("missing numeric `type`"))?;

        match ComponentType::from_code(code) {
            Some(ComponentType::TextDisplay) => {
                let content = required_str(&map, "content")?;
                Ok(TextBlock::new(content).into())
            }
            Some(ComponentType::Separator) => {
                let spacing = match map.get("spacing").and_then(Value::as_u64) {
                    None | Some(1) => Spacing::Small,
                    Some(2) => Spacing::Large,
                    Some(other) => {
                        return Err(MessageError::invalid_component(format!(
                            "unknown separator spacing {other}"
                        )));
                    }
                };
                let divider = optional_bool(&map, "divider")?.unwrap_or(true);
                Ok(Separator::new(spacing, divider).into())
            }
            Some(ComponentType::Button) => {
                if map.get("style").and_then(Value::as_u64) != Some(ButtonStyle::Link as u64) {
                    return Err(MessageError::invalid_component(
                        "only link buttons can be sent by a webhook",
                    ));
                }
                let url = required_str(&map, "url")?;
                let label = optional_str(&map, "label")?;
                let emoji = match map.get("emoji") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(name)) => Some(name.clone()),
                    Some(Value::Object(emoji)) => Some(required_str(emoji, "name")?),
                    Some(_) => {
                        return Err(MessageError::invalid_component(
                            "`emoji` must be a string or an object",
                        ));
                    }
                };
                Ok(LinkButton::new(url, label, emoji)?.into())
            }
            Some(ComponentType::Thumbnail) => {
                let media = match map.get("media") {
                    Some(Value::Object(media)) => media,
                    _ => return Err(MessageError::invalid_component("missing `media` object")),
                };
                let url = required_str(media, "url")?;
                let spoiler = optional_bool(&map, "spoiler")?.unwrap_or(false);
                Ok(Thumbnail::new(url)?.with_spoiler(spoiler).into())
            }
            Some(ComponentType::Container) => {
                let mut container =
                    Container::new().with_spoiler(optional_bool(&map, "spoiler")?.unwrap_or(false));
                if let Some(color) = map.get("accent_color").filter(|v| !v.is_null()) {
                    let color = color
                        .as_u64()
                        .and_then(|c| u32::try_from(c).ok())
                        .ok_or_else(|| MessageError::invalid_component("invalid `accent_color`"))?;
                    container = container.with_accent_color(color);
                }
                match map.get("components") {
                    None => {}
                    Some(Value::Array(children)) => {
                        for child in children {
                            container = container.try_with_value(child.clone())?;
                        }
                    }
                    Some(_) => {
                        return Err(MessageError::invalid_component(
                            "`components` must be an array",
                        ));
                    }
                }
                Ok(container.into())
            }
            Some(ComponentType::ActionRow) | None => Err(MessageError::invalid_component(format!(
                "unsupported component type {code}"
            ))),
        }
    }
}

fn optional_str(map: &Map<String, Value>, key: &str) -> Result<Option<String>, MessageError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(MessageError::invalid_component(format!(
            "`{key}` must be a string"
        ))),
    }
}

fn required_str(map: &Map<String, Value>, key: &str) -> Result<String, MessageError> {
    optional_str(map, key)?
        .ok_or_else(|| MessageError::invalid_component(format!("missing `{key}`")))
}

fn optional_bool(map: &Map<String, Value>, key: &str) -> Result<Option<bool>, MessageError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(MessageError::invalid_component(format!(
            "`{key}` must be a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_block_serializes() {
        let value = Component::from(TextBlock::new("Hello")).to_value().unwrap();
        assert_eq!(value, json!({"type": 10, "content": "Hello"}));
    }

    #[test]
    fn separator_defaults_to_small_divider() {
        let value = Component::from(Separator::default()).to_value().unwrap();
        assert_eq!(value, json!({"type": 14, "spacing": 1, "divider": true}));

        let value = Component::from(Separator::new(Spacing::Large, false))
            .to_value()
            .unwrap();
        assert_eq!(value, json!({"type": 14, "spacing": 2, "divider": false}));
    }

    #[test]
    fn link_button_requires_label_or_emoji() {
        let err = LinkButton::new("https://example.com", None, None).unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));

        assert!(LinkButton::new("https://example.com", Some("Docs".into()), None).is_ok());
        assert!(LinkButton::new("https://example.com", None, Some("😳".into())).is_ok());
    }

    #[test]
    fn link_button_serializes_fixed_style() {
        let button =
            LinkButton::new("https://example.com", Some("Docs".into()), Some("📘".into())).unwrap();
        assert_eq!(
            Component::from(button).to_value().unwrap(),
            json!({
                "type": 2,
                "style": 5,
                "url": "https://example.com",
                "disabled": false,
                "label": "Docs",
                "emoji": {"name": "📘", "id": null}
            })
        );
    }

    #[test]
    fn emoji_only_button_omits_label() {
        let button = LinkButton::new("https://example.com", None, Some("😳".into())).unwrap();
        let value = Component::from(button).to_value().unwrap();
        assert!(value.get("label").is_none());
        assert_eq!(value["emoji"]["name"], "😳");
    }

    #[test]
    fn thumbnail_requires_url() {
        let err = Thumbnail::new("").unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));

        let thumb = Thumbnail::new("https://example.com/a.png")
            .unwrap()
            .with_spoiler(true);
        assert_eq!(
            Component::from(thumb).to_value().unwrap(),
            json!({"type": 11, "spoiler": true, "media": {"url": "https://example.com/a.png"}})
        );
    }

    #[test]
    fn container_keeps_children_in_order() {
        let container = Container::new()
            .with_accent_color(0x00ff_8800)
            .add(TextBlock::new("Hello"))
            .add(Separator::default())
            .add(TextBlock::new("# HELLO"));

        assert_eq!(container.children().len(), 3);
        assert_eq!(
            Component::from(container).to_value().unwrap(),
            json!({
                "type": 17,
                "accent_color": 0x00ff_8800,
                "spoiler": false,
                "components": [
                    {"type": 10, "content": "Hello"},
                    {"type": 14, "spacing": 1, "divider": true},
                    {"type": 10, "content": "# HELLO"}
                ]
            })
        );
    }

    #[test]
    fn every_variant_serializes_to_a_typed_object() {
        let components: Vec<Component> = vec![
            TextBlock::new("a").into(),
            Separator::default().into(),
            LinkButton::labeled("https://example.com", "Go").into(),
            Thumbnail::new("https://example.com/a.png").unwrap().into(),
            Container::new().add(TextBlock::new("b")).into(),
        ];
        for component in components {
            let value = component.to_value().unwrap();
            assert!(value.is_object());
            assert_eq!(value["type"], component.kind() as u8);
        }
    }

    #[test]
    fn container_without_accent_omits_it() {
        let value = Component::from(Container::new()).to_value().unwrap();
        assert!(value.get("accent_color").is_none());
        assert_eq!(value["components"], json!([]));
    }

    #[test]
    fn parses_nested_wire_value() {
        let raw = json!({
            "type": 17,
            "components": [{"type": 10, "content": "Hello"}]
        });
        let component = Component::try_from(raw).unwrap();
        let Component::Container(container) = &component else {
            panic!("expected container");
        };
        assert_eq!(
            container.children(),
            &[Component::TextBlock(TextBlock::new("Hello"))]
        );
    }

    #[test]
    fn parse_rejects_unknown_type() {
        let err = Component::try_from(json!({"type": 99})).unwrap_err();
        assert!(matches!(err, MessageError::InvalidComponent(_)));

        let err = Component::try_from(json!("not a component")).unwrap_err();
        assert!(matches!(err, MessageError::InvalidComponent(_)));

        let err = Component::try_from(json!({"type": 1, "components": []})).unwrap_err();
        assert!(matches!(err, MessageError::InvalidComponent(_)));
    }

    #[test]
    fn parse_applies_variant_invariants() {
        let err = Component::try_from(json!({"type": 2, "style": 5, "url": "https://x"}))
            .unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));

        let err =
            Component::try_from(json!({"type": 11, "media": {"url": ""}})).unwrap_err();
        assert!(matches!(err, MessageError::InvalidArgument(_)));
    }

    #[test]
    fn parse_rejects_non_link_button() {
        let err = Component::try_from(json!({"type": 2, "style": 1, "label": "Click"}))
            .unwrap_err();
        assert!(matches!(err, MessageError::InvalidComponent(_)));
    }
}
