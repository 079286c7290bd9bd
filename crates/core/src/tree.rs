use serde_json::Value;

use crate::component::Component;
use crate::error::MessageError;

/// Ordered list of top-level components for one message.
///
/// Insertion order is render order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentTree {
    components: Vec<Component>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level component.
    pub fn add(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    /// Append a top-level component given in its raw wire form.
    pub fn add_value(&mut self, value: Value) -> Result<&mut Self, MessageError> {
        self.components.push(Component::try_from(value)?);
        Ok(self)
    }

    /// Serialized top-level components, in insertion order.
    pub fn build(&self) -> Result<Vec<Value>, MessageError> {
        self.components.iter().map(Component::to_value).collect()
    }

    /// Whether the tree can be sent as a classic action row.
    ///
    /// True iff the tree is non-empty and holds only link buttons.
    pub fn legacy_compatible(&self) -> bool {
        !self.components.is_empty() && self.components.iter().all(Component::is_link_button)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<C: Into<Component>> FromIterator<C> for ComponentTree {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::component::{Container, LinkButton, Separator, TextBlock};

    fn button(label: &str) -> LinkButton {
        LinkButton::labeled("https://example.com", label)
    }

    #[test]
    fn empty_tree_is_not_legacy_compatible() {
        assert!(!ComponentTree::new().legacy_compatible());
    }

    #[test]
    fn button_only_tree_is_legacy_compatible() {
        let mut tree = ComponentTree::new();
        tree.add(button("a")).add(button("b"));
        assert!(tree.legacy_compatible());
    }

    #[test]
    fn appending_a_non_button_breaks_legacy_compatibility() {
        let mut tree = ComponentTree::new();
        tree.add(button("a"));
        assert!(tree.legacy_compatible());

        tree.add(Separator::default());
        assert!(!tree.legacy_compatible());
    }

    #[test]
    fn button_inside_container_is_not_legacy() {
        let mut tree = ComponentTree::new();
        tree.add(Container::new().add(button("a")));
        assert!(!tree.legacy_compatible());
    }

    #[test]
    fn build_preserves_order_and_does_not_mutate() {
        let mut tree = ComponentTree::new();
        tree.add(TextBlock::new("Hi"))
            .add(TextBlock::new("there"))
            .add(Container::new().add(TextBlock::new("Hello")));

        let first = tree.build().unwrap();
        let second = tree.build().unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.len(), 3);
        assert_eq!(first[0], json!({"type": 10, "content": "Hi"}));
        assert_eq!(first[1], json!({"type": 10, "content": "there"}));
        assert_eq!(first[2]["type"], 17);
    }

    #[test]
    fn add_value_rejects_unknown_nodes() {
        let mut tree = ComponentTree::new();
        let err = tree.add_value(json!({"type": 42})).unwrap_err();
        assert!(matches!(err, MessageError::InvalidComponent(_)));
        assert!(tree.is_empty());

        tree.add_value(json!({"type": 10, "content": "ok"})).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn collects_from_iterator() {
        let tree: ComponentTree = vec![button("a"), button("b")].into_iter().collect();
        assert_eq!(tree.len(), 2);
        assert!(tree.legacy_compatible());
    }
}
