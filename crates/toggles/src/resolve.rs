use crate::error::ToggleError;
use sitecfg_types::ToggleNode;
use sitecfg_types::toggle::ENABLED_KEY;
use std::collections::BTreeMap;

/// Resolves a dotted toggle path against the tree.
///
/// - A missing segment resolves to `true`. A leaf has no children, so any
///   segment past a leaf is missing too.
/// - A branch resolves to its `enabled` entry, or `true` without one.
/// - A leaf resolves to its own value.
pub fn is_enabled(tree: &ToggleNode, path: &str) -> bool {
    let mut node = tree;
    for segment in path.split('.') {
        match node.child(segment) {
            Some(next) => node = next,
            None => return true,
        }
    }
    node_state(node)
}

fn node_state(node: &ToggleNode) -> bool {
    match node.as_flag() {
        Some(flag) => flag,
        None => node
            .child(ENABLED_KEY)
            .and_then(ToggleNode::as_flag)
            .unwrap_or(true),
    }
}

/// Flattens the tree into a `path -> enabled` table.
///
/// A branch contributes its own entry only when it carries an `enabled`
/// key; the `enabled` key itself never appears as a path segment.
pub fn flatten(tree: &ToggleNode) -> BTreeMap<String, bool> {
    let mut map = BTreeMap::new();
    flatten_into(tree, "", &mut map);
    map
}

fn flatten_into(node: &ToggleNode, prefix: &str, map: &mut BTreeMap<String, bool>) {
    for (key, value) in node.children() {
        if key == ENABLED_KEY {
            continue;
        }
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value.as_flag() {
            Some(flag) => {
                map.insert(path, flag);
            }
            None => {
                if let Some(flag) = value.child(ENABLED_KEY).and_then(ToggleNode::as_flag) {
                    map.insert(path.clone(), flag);
                }
                flatten_into(value, &path, map);
            }
        }
    }
}

/// Checks that every segment is a non-empty run of ASCII letters, digits,
/// `-` or `_`.
pub fn validate_path(path: &str) -> Result<(), ToggleError> {
    let valid = path.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    });
    if valid {
        Ok(())
    } else {
        Err(ToggleError::InvalidPath(path.to_string()))
    }
}

/// Writes `enabled` for `path`, creating branches as needed, so that
/// [`is_enabled`] afterwards returns `enabled` for exactly that path.
///
/// Leaves met along the way are promoted to branches that keep their old
/// value under `enabled`. A trailing `enabled` segment addresses the parent's
/// own flag; `enabled` anywhere else is rejected.
pub fn set_enabled(tree: &mut ToggleNode, path: &str, enabled: bool) -> Result<(), ToggleError> {
    validate_path(path)?;
    let target = path
        .strip_suffix(ENABLED_KEY)
        .and_then(|p| p.strip_suffix('.'))
        .unwrap_or(path);
    if target.split('.').any(|segment| segment == ENABLED_KEY) {
        return Err(ToggleError::InvalidPath(path.to_string()));
    }
    let mut node = tree;
    for segment in target.split('.') {
        node = branch_mut(node).entry(segment.to_string()).or_default();
    }
    branch_mut(node).insert(ENABLED_KEY.to_string(), ToggleNode::Flag(enabled));
    log::debug!("Toggle '{path}' set to {enabled}");
    Ok(())
}

fn branch_mut(node: &mut ToggleNode) -> &mut BTreeMap<String, ToggleNode> {
    if let Some(flag) = node.as_flag() {
        *node = ToggleNode::with_enabled(flag);
    }
    match node {
        ToggleNode::Branch(map) => map,
        _ => unreachable!("leaf nodes are promoted to branches above"),
    }
}
