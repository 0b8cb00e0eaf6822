use indexmap::IndexMap;
use serde::Deserialize;

use crate::I18nError;

const MAX_DEPTH: usize = 16;

/// One node of a message tree
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
enum Node {
    Text(String),
    Table(IndexMap<String, Node>),
    /// Numbers, booleans, lists: kept so lookups can report "not a string"
    Other(serde_yaml::Value),
}

/// Nested message table for one locale, navigated with dotted paths
///
/// ```yaml
/// themes:
///   light: "Light"
/// actions:
///   switchTo: "Switch to {theme} theme"
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageCatalog {
    root: IndexMap<String, Node>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML mapping of nested string tables
    pub fn from_yaml(src: &str) -> Result<Self, I18nError> {
        let root = match serde_yaml::from_str::<Node>(src)? {
            Node::Table(root) => root,
            _ => {
                return Err(I18nError::InvalidCatalog(
                    "catalog root must be a mapping".to_string(),
                ))
            }
        };
        check_depth(&root, 1)?;
        Ok(Self { root })
    }

    /// Set a message at a dotted path, creating intermediate tables
    pub fn insert(&mut self, path: &str, message: impl Into<String>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut table = &mut self.root;
        for segment in segments {
            let node = table
                .entry(segment.to_string())
                .or_insert_with(|| Node::Table(IndexMap::new()));
            if !matches!(node, Node::Table(_)) {
                *node = Node::Table(IndexMap::new());
            }
            table = match node {
                Node::Table(inner) => inner,
                _ => return,
            };
        }
        table.insert(leaf.to_string(), Node::Text(message.into()));
    }

    /// Message at a dotted path; `None` when a segment is missing or the
    /// leaf is not a string
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                Node::Table(table) => node = table.get(segment)?,
                _ => return None,
            }
        }
        match node {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Every string leaf as `(dotted path, message)`, in file order
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, table: &IndexMap<String, Node>, out: &mut Vec<(String, String)>) {
            for (key, node) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match node {
                    Node::Text(text) => out.push((path, text.clone())),
                    Node::Table(inner) => walk(&path, inner, out),
                    Node::Other(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        walk("", &self.root, &mut out);
        out
    }
}

fn check_depth(table: &IndexMap<String, Node>, depth: usize) -> Result<(), I18nError> {
    if depth > MAX_DEPTH {
        return Err(I18nError::InvalidCatalog(format!(
            "nesting deeper than {MAX_DEPTH} levels"
        )));
    }
    for node in table.values() {
        if let Node::Table(inner) = node {
            check_depth(inner, depth + 1)?;
        }
    }
    Ok(())
}

/// Replace `{key}` with its value for each parameter, in order.
///
/// Only the first occurrence of each placeholder is replaced; unknown
/// placeholders stay visible.
pub fn apply_params(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in params {
        let token = format!("{{{key}}}");
        out = out.replacen(&token, value, 1);
    }
    out
}
