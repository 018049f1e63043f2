//! The generic extractor and the element helpers the section extractors
//! share.

use roxmltree::Node as XmlNode;
use sitecfg_types::Node;
use sitecfg_types::node::TEXT_KEY;
use std::collections::BTreeMap;

/// Converts an element into a [`Node`] without any schema knowledge.
///
/// - An element with neither child elements nor attributes is a trimmed
///   text leaf.
/// - Otherwise it becomes an object: attributes are text entries, text mixed
///   with child elements is kept under `_text`, and each distinct child tag
///   maps either to a single nested node (one sibling) or to an array of
///   nodes in document order (several siblings).
pub fn extract_node(element: XmlNode<'_, '_>) -> Node {
    let has_children = element.children().any(|c| c.is_element());
    if !has_children && element.attributes().next().is_none() {
        return Node::Text(own_text(element));
    }

    let mut map: BTreeMap<String, Node> = element
        .attributes()
        .map(|a| (a.name().to_string(), Node::text(a.value().trim())))
        .collect();

    let text = own_text(element);
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Node::Text(text));
    }

    let mut grouped: Vec<(&str, Vec<Node>)> = Vec::new();
    for child in element.children().filter(|c| c.is_element()) {
        let tag = child.tag_name().name();
        let value = extract_node(child);
        match grouped.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, values)) => values.push(value),
            None => grouped.push((tag, vec![value])),
        }
    }

    for (tag, mut values) in grouped {
        let node = if values.len() == 1 {
            values.remove(0)
        } else {
            Node::Array(values)
        };
        map.insert(tag.to_string(), node);
    }

    Node::Object(map)
}

/// Trimmed concatenation of the element's direct text children.
pub(crate) fn own_text(element: XmlNode<'_, '_>) -> String {
    element
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// First child element with the given tag name.
pub(crate) fn child<'a, 'input>(
    element: XmlNode<'a, 'input>,
    name: &str,
) -> Option<XmlNode<'a, 'input>> {
    element
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// All child elements with the given tag name, in document order.
pub(crate) fn children<'a, 'input>(
    element: XmlNode<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = XmlNode<'a, 'input>> + 'a {
    element
        .children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

/// All child elements, in document order.
pub(crate) fn elements<'a, 'input>(
    element: XmlNode<'a, 'input>,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    element.children().filter(|c| c.is_element())
}

/// Trimmed text of the named child, or `""` when absent.
pub(crate) fn text(element: XmlNode<'_, '_>, name: &str) -> String {
    child(element, name).map(own_text).unwrap_or_default()
}

/// Trimmed attribute value, or `""` when absent.
pub(crate) fn attr(element: XmlNode<'_, '_>, name: &str) -> String {
    element
        .attribute(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Attribute value, falling back to a child element of the same name.
pub(crate) fn attr_or_text(element: XmlNode<'_, '_>, name: &str) -> String {
    match element.attribute(name) {
        Some(v) => v.trim().to_string(),
        None => text(element, name),
    }
}

/// Reads a boolean attribute by comparing against the literal `"true"`.
/// An absent attribute yields `default`.
pub(crate) fn flag(element: XmlNode<'_, '_>, name: &str, default: bool) -> bool {
    match element.attribute(name) {
        Some(v) => v.trim() == "true",
        None => default,
    }
}

/// Parses a number from the named attribute or child, if present and valid.
pub(crate) fn number<T: std::str::FromStr>(element: XmlNode<'_, '_>, name: &str) -> Option<T> {
    attr_or_text(element, name).parse().ok()
}
