use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::ParseError;
use crate::model::{ConfigNode, Server, Settings};

/// Parse a `settings.xml` document.
///
/// Only `settings/servers/server` entries are extracted. Each server keeps its
/// `<id>` and, when present, its `<configuration>` element as a [`ConfigNode`]
/// tree. Other settings sections are ignored.
pub fn parse_settings(input: &str) -> Result<Settings, ParseError> {
    let doc = Document::parse(input)?;
    let root = doc.root_element();

    if root.tag_name().name() != "settings" {
        return Err(ParseError::UnexpectedRoot(root.tag_name().name().to_string()));
    }

    let mut servers = Vec::new();
    let entries = element_children(root)
        .filter(|n| n.tag_name().name() == "servers")
        .flat_map(element_children)
        .filter(|n| n.tag_name().name() == "server");

    for (index, entry) in entries.enumerate() {
        servers.push(parse_server(entry, index)?);
    }

    Ok(Settings { servers })
}

/// Parse a settings file from a path.
pub fn parse_settings_file(path: &Path) -> Result<Settings, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

fn parse_server(node: Node<'_, '_>, index: usize) -> Result<Server, ParseError> {
    let id = first_child(node, "id")
        .and_then(leaf_text)
        .ok_or(ParseError::MissingServerId { index })?;

    Ok(Server {
        id,
        configuration: first_child(node, "configuration").map(to_config_node),
    })
}

/// Convert an element into a tree node.
///
/// Leaf text is trimmed; empty leaves and elements with element children have
/// no value. Namespace prefixes are dropped.
fn to_config_node(element: Node<'_, '_>) -> ConfigNode {
    let mut node = ConfigNode::new(element.tag_name().name());

    let mut has_children = false;
    for child in element_children(element) {
        has_children = true;
        node.push_child(to_config_node(child));
    }

    if !has_children {
        node.set_value(leaf_text(element));
    }
    node
}

fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|n| n.tag_name().name() == name)
}

fn leaf_text(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
