//! The schema-less value used for free-form sections (pages, UI strings,
//! forms, business policies, service areas).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which text mixed with child elements is stored.
pub const TEXT_KEY: &str = "_text";

static EMPTY: Node = Node::Object(BTreeMap::new());

/// A tagged tree value: a text leaf, an object of named children, or an
/// array of repeated siblings sharing one tag name.
///
/// Serializes to the natural JSON shape (string / array / object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Array(Vec<Node>),
    Object(BTreeMap<String, Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Object(BTreeMap::new())
    }
}

impl Node {
    /// A shared empty object, returned by lookups that find nothing.
    pub fn empty() -> &'static Node {
        &EMPTY
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// True for empty objects, empty arrays and blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Text(s) => s.is_empty(),
            Node::Array(items) => items.is_empty(),
            Node::Object(map) => map.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a direct child of an object node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Walks a dot-separated path of object keys.
    pub fn path(&self, dotted: &str) -> Option<&Node> {
        dotted
            .split('.')
            .try_fold(self, |node, segment| node.get(segment))
    }

    /// The child at `key`, or the shared empty object.
    pub fn child_or_empty(&self, key: &str) -> &Node {
        self.get(key).unwrap_or(Node::empty())
    }

    /// Text at `dotted`, or `fallback` when the path is absent, blank or
    /// not a text leaf.
    pub fn text_at<'a>(&'a self, dotted: &str, fallback: &'a str) -> &'a str {
        match self.path(dotted) {
            Some(Node::Text(s)) if !s.is_empty() => s,
            _ => fallback,
        }
    }

    /// Normalizes the "one sibling vs. many siblings" distinction: an array
    /// yields its items, anything else yields itself as a single item.
    pub fn items(&self) -> Vec<&Node> {
        match self {
            Node::Array(items) => items.iter().collect(),
            other => vec![other],
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl FromIterator<(String, Node)> for Node {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        Node::Object(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        [
            (
                "messages".to_string(),
                [(
                    "error".to_string(),
                    [("general".to_string(), Node::text("Something went wrong"))]
                        .into_iter()
                        .collect::<Node>(),
                )]
                .into_iter()
                .collect(),
            ),
            (
                "field".to_string(),
                Node::Array(vec![Node::text("a"), Node::text("b")]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_path_lookup() {
        let node = sample();
        assert_eq!(
            node.path("messages.error.general").and_then(Node::as_text),
            Some("Something went wrong")
        );
        assert!(node.path("messages.missing.general").is_none());
        assert_eq!(node.text_at("messages.nope", "messages.nope"), "messages.nope");
    }

    #[test]
    fn test_items_normalizes_single_and_array() {
        let node = sample();
        assert_eq!(node.child_or_empty("field").items().len(), 2);
        assert_eq!(node.child_or_empty("messages").items().len(), 1);
    }

    #[test]
    fn test_serializes_to_plain_json() {
        let node = sample();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["field"][1], "b");
        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
