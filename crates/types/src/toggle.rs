use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The key that carries a branch's own on/off state.
pub const ENABLED_KEY: &str = "enabled";

/// A node in the feature-toggle tree.
///
/// Mirrors the JSON shape of the toggle section: a branch maps names to
/// further nodes (its own state lives under `"enabled"`), while leaves are
/// either real booleans or hand-authored `"true"`/`"false"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToggleNode {
    Flag(bool),
    Text(String),
    Branch(BTreeMap<String, ToggleNode>),
}

impl Default for ToggleNode {
    fn default() -> Self {
        ToggleNode::Branch(BTreeMap::new())
    }
}

impl ToggleNode {
    /// A branch carrying only its `enabled` flag.
    pub fn with_enabled(enabled: bool) -> Self {
        let mut map = BTreeMap::new();
        map.insert(ENABLED_KEY.to_string(), ToggleNode::Flag(enabled));
        ToggleNode::Branch(map)
    }

    /// Interprets a leaf as a boolean. Text leaves are enabled only when they
    /// read `true` (case-insensitive); branches are not leaves.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ToggleNode::Flag(b) => Some(*b),
            ToggleNode::Text(s) => Some(s.trim().eq_ignore_ascii_case("true")),
            ToggleNode::Branch(_) => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&ToggleNode> {
        match self {
            ToggleNode::Branch(map) => map.get(name),
            _ => None,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = (&String, &ToggleNode)> {
        let map = match self {
            ToggleNode::Branch(map) => Some(map),
            _ => None,
        };
        map.into_iter().flat_map(|m| m.iter())
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, ToggleNode::Branch(_))
    }
}
