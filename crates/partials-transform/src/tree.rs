//! Selector trees.
//!
//! All selectors of one directive kind are folded into a trie keyed by
//! property name. Scoping into a property returns the subtree under that
//! name merged with the subtree under `*`, so the same tree serves a nested
//! object or every element of a collection.

use std::collections::BTreeMap;

use crate::selector::{Segment, Selector};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    /// A selector ends at this node.
    terminal: bool,
    children: SelectorTree,
}

impl Node {
    fn merge(&mut self, other: &Node) {
        self.terminal |= other.terminal;
        self.children.merge(&other.children);
    }
}

/// Trie of parsed selectors for one directive kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorTree {
    fields: BTreeMap<String, Node>,
    wildcard: Option<Box<Node>>,
}

impl SelectorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: &Selector) {
        self.insert_segments(selector.segments());
    }

    fn insert_segments(&mut self, segments: &[Segment]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let attach = |node: &mut Node| {
            if rest.is_empty() {
                node.terminal = true;
            } else {
                node.children.insert_segments(rest);
            }
        };
        match first {
            Segment::Field(name) => attach(self.fields.entry(name.clone()).or_default()),
            Segment::Group(names) => {
                for name in names {
                    attach(self.fields.entry(name.clone()).or_default());
                }
            }
            Segment::Wildcard => attach(self.wildcard.get_or_insert_with(Box::default)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.wildcard.is_none()
    }

    /// Some selector passes through or ends at `name` on this level.
    ///
    /// `nested.string` contains `nested`: selecting a descendant selects
    /// its ancestors.
    pub fn contains(&self, name: &str) -> bool {
        self.wildcard.is_some() || self.fields.contains_key(name)
    }

    /// Some selector names `name` itself on this level, not through `*`.
    pub fn names(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Some selector ends exactly at `name` on this level.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.wildcard.as_ref().is_some_and(|node| node.terminal)
            || self.fields.get(name).is_some_and(|node| node.terminal)
    }

    /// The selectors that continue below `name`, with `name` stripped.
    pub fn scope(&self, name: &str) -> SelectorTree {
        let mut scoped = SelectorTree::new();
        if let Some(node) = self.fields.get(name) {
            scoped.merge(&node.children);
        }
        if let Some(node) = &self.wildcard {
            scoped.merge(&node.children);
        }
        scoped
    }

    pub fn merge(&mut self, other: &SelectorTree) {
        for (name, node) in &other.fields {
            self.fields.entry(name.clone()).or_default().merge(node);
        }
        if let Some(node) = &other.wildcard {
            self.wildcard.get_or_insert_with(Box::default).merge(node);
        }
    }

    /// Drop top-level named entries rejected by `keep`, returning the names
    /// that were dropped.
    pub fn retain_fields(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut dropped = Vec::new();
        self.fields.retain(|name, _| {
            let kept = keep(name);
            if !kept {
                dropped.push(name.clone());
            }
            kept
        });
        dropped
    }

    /// Drop the top-level wildcard entry. Returns whether one was present.
    pub fn clear_wildcard(&mut self) -> bool {
        self.wildcard.take().is_some()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.wildcard = None;
    }

    /// Flatten back into dotted selector strings, one per terminal path.
    pub fn to_selectors(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect("", &mut out);
        out
    }

    fn collect(&self, prefix: &str, out: &mut Vec<String>) {
        let entries = self
            .fields
            .iter()
            .map(|(name, node)| (name.as_str(), node))
            .chain(self.wildcard.as_deref().map(|node| ("*", node)));
        for (name, node) in entries {
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            if node.terminal {
                out.push(path.clone());
            }
            node.children.collect(&path, out);
        }
    }
}

impl<'a> FromIterator<&'a Selector> for SelectorTree {
    fn from_iter<I: IntoIterator<Item = &'a Selector>>(iter: I) -> Self {
        let mut tree = SelectorTree::new();
        for selector in iter {
            tree.insert(selector);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(selectors: &[&str]) -> SelectorTree {
        let parsed: Vec<Selector> = selectors
            .iter()
            .map(|input| Selector::parse(input).unwrap())
            .collect();
        parsed.iter().collect()
    }

    #[test]
    fn nested_selector_marks_parent_as_contained_not_terminal() {
        let tree = tree(&["nested.string"]);
        assert!(tree.contains("nested"));
        assert!(!tree.is_terminal("nested"));
        assert!(tree.scope("nested").is_terminal("string"));
    }

    #[test]
    fn groups_expand_to_each_name() {
        let tree = tree(&["songs.{name,artist}"]);
        let songs = tree.scope("songs");
        assert!(songs.is_terminal("name"));
        assert!(songs.is_terminal("artist"));
        assert!(!songs.contains("year"));
    }

    #[test]
    fn scope_merges_wildcard_children() {
        let tree = tree(&["*.name", "songs.artist"]);
        let songs = tree.scope("songs");
        assert!(songs.is_terminal("name"));
        assert!(songs.is_terminal("artist"));
        let albums = tree.scope("albums");
        assert!(albums.is_terminal("name"));
        assert!(!albums.contains("artist"));
    }

    #[test]
    fn wildcard_contains_every_name() {
        let tree = tree(&["*"]);
        assert!(tree.contains("anything"));
        assert!(tree.is_terminal("anything"));
        assert!(tree.scope("anything").is_empty());
        assert!(!tree.names("anything"));
    }

    #[test]
    fn flattens_back_to_selectors() {
        let tree = tree(&["nested.{first,second}", "name", "nested"]);
        assert_eq!(
            tree.to_selectors(),
            vec!["name", "nested", "nested.first", "nested.second"]
        );
    }

    #[test]
    fn retain_reports_dropped_names() {
        let mut tree = tree(&["name", "email", "*"]);
        let dropped = tree.retain_fields(|name| name == "name");
        assert_eq!(dropped, vec!["email".to_string()]);
        assert!(tree.clear_wildcard());
        assert_eq!(tree.to_selectors(), vec!["name"]);
    }
}
