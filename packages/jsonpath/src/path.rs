//! Normalized paths and node lists
//!
//! A [`NormalizedPath`] uniquely identifies a node's location per
//! RFC 9535 §2.7, serializable in canonical form (`$['a'][0]`) and as an
//! RFC 6901 JSON Pointer. Located evaluation returns [`LocatedNode`]s
//! pairing each selected value with its path.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{self, Write as _};

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One element of a normalized path: an object member name or an array
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathElement {
    /// Array index element. Indexes sort before names.
    Index(usize),
    /// Object member name element.
    Name(String),
}

/// A normalized path: the canonical identifier of a single node location.
///
/// Ordering is lexicographic element-wise with indexes before names; a
/// proper prefix sorts before any extension of it. This gives a total
/// order suitable for deterministic sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath(Vec<PathElement>);

impl NormalizedPath {
    /// The empty path, identifying the document root (`$`).
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from elements.
    #[must_use]
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }

    /// The path's elements in order.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path extending this one with a member name. Always allocates
    /// a fresh path so sibling results never alias.
    #[must_use]
    pub fn child_name(&self, name: &str) -> Self {
        let mut elements = Vec::with_capacity(self.0.len() + 1);
        elements.extend_from_slice(&self.0);
        elements.push(PathElement::Name(name.to_string()));
        Self(elements)
    }

    /// A new path extending this one with an array index.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        let mut elements = Vec::with_capacity(self.0.len() + 1);
        elements.extend_from_slice(&self.0);
        elements.push(PathElement::Index(index));
        Self(elements)
    }

    /// The RFC 6901 JSON Pointer form, e.g. `/store/book/0`. The root
    /// path yields the empty pointer.
    #[must_use]
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for element in &self.0 {
            out.push('/');
            match element {
                PathElement::Name(name) => {
                    // Only ~ and / are escaped, in that order.
                    for c in name.chars() {
                        match c {
                            '~' => out.push_str("~0"),
                            '/' => out.push_str("~1"),
                            c => out.push(c),
                        }
                    }
                }
                PathElement::Index(index) => {
                    let _ = write!(out, "{index}");
                }
            }
        }
        out
    }
}

impl fmt::Display for NormalizedPath {
    /// Canonical form per RFC 9535 §2.7, e.g. `$['store']['book'][0]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('$')?;
        for element in &self.0 {
            match element {
                PathElement::Name(name) => {
                    f.write_str("['")?;
                    write_normalized_name(f, name)?;
                    f.write_str("']")?;
                }
                PathElement::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Write a member name in normalized single-quoted form. Shorthand escapes
/// cover `\b \f \n \r \t \' \\`; the remaining controls below 0x10 use
/// `\u000X`; everything else is copied verbatim.
fn write_normalized_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    for c in name.chars() {
        match c {
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\u{0000}'..='\u{0007}' | '\u{000B}' | '\u{000E}' | '\u{000F}' => {
                write!(f, "\\u000{:x}", c as u32)?;
            }
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

impl Serialize for NormalizedPath {
    /// Serializes as the canonical path string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A value selected by located evaluation, paired with its normalized
/// path. The value borrows from the input document; the path is owned.
#[derive(Debug, Clone)]
pub struct LocatedNode<'a> {
    pub value: &'a Value,
    pub path: NormalizedPath,
}

/// An ordered list of nodes selected by a query. May contain duplicate
/// values; ordering follows the source order of the query's selectors.
#[derive(Debug, Clone, Default)]
pub struct NodeList<'a>(Vec<&'a Value>);

impl<'a> NodeList<'a> {
    pub(crate) fn new(nodes: Vec<&'a Value>) -> Self {
        Self(nodes)
    }

    /// Number of selected nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the query selected nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first selected node, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&'a Value> {
        self.0.first().copied()
    }

    /// Iterate over the selected nodes.
    pub fn iter(&self) -> impl Iterator<Item = &'a Value> + '_ {
        self.0.iter().copied()
    }

    /// The selected nodes as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[&'a Value] {
        &self.0
    }

    /// Consume the list, returning the underlying vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<&'a Value> {
        self.0
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = &'a Value;
    type IntoIter = std::vec::IntoIter<&'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> From<NodeList<'a>> for Vec<&'a Value> {
    fn from(list: NodeList<'a>) -> Self {
        list.0
    }
}

/// An ordered list of located nodes.
#[derive(Debug, Clone, Default)]
pub struct LocatedNodeList<'a>(Vec<LocatedNode<'a>>);

impl<'a> LocatedNodeList<'a> {
    pub(crate) fn new(nodes: Vec<LocatedNode<'a>>) -> Self {
        Self(nodes)
    }

    /// Number of located nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the query selected nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the located nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, LocatedNode<'a>> {
        self.0.iter()
    }

    /// Iterate over the node values.
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + '_ {
        self.0.iter().map(|node| node.value)
    }

    /// Iterate over the normalized paths.
    pub fn paths(&self) -> impl Iterator<Item = &NormalizedPath> + '_ {
        self.0.iter().map(|node| &node.path)
    }

    /// Sort by normalized path. Stable and deterministic; idempotent.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Remove duplicate locations, keeping the first occurrence of each
    /// path. Idempotent; the length may shrink.
    pub fn dedup(&mut self) {
        if self.0.len() <= 1 {
            return;
        }
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.retain(|node| seen.insert(node.path.clone()));
    }

    /// The located nodes as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[LocatedNode<'a>] {
        &self.0
    }

    /// Consume the list, returning the underlying vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<LocatedNode<'a>> {
        self.0
    }
}

impl<'a> IntoIterator for LocatedNodeList<'a> {
    type Item = LocatedNode<'a>;
    type IntoIter = std::vec::IntoIter<LocatedNode<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl PartialOrd for LocatedNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.path.cmp(&other.path))
    }
}

impl PartialEq for LocatedNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_escapes() {
        let path = NormalizedPath::from_elements(vec![
            PathElement::Name("a'b".into()),
            PathElement::Name("c\\d".into()),
            PathElement::Name("tab\there".into()),
            PathElement::Index(2),
        ]);
        assert_eq!(path.to_string(), "$['a\\'b']['c\\\\d']['tab\\there'][2]");
    }

    #[test]
    fn canonical_form_control_escapes() {
        let path =
            NormalizedPath::from_elements(vec![PathElement::Name("\u{0001}\u{000b}".into())]);
        assert_eq!(path.to_string(), "$['\\u0001\\u000b']");
    }

    #[test]
    fn pointer_escapes_only_tilde_and_slash() {
        let path = NormalizedPath::from_elements(vec![
            PathElement::Name("a/b".into()),
            PathElement::Name("m~n".into()),
            PathElement::Index(0),
        ]);
        assert_eq!(path.pointer(), "/a~1b/m~0n/0");
        assert_eq!(NormalizedPath::root().pointer(), "");
    }

    #[test]
    fn compare_orders_indexes_before_names() {
        let idx = NormalizedPath::from_elements(vec![PathElement::Index(10)]);
        let name = NormalizedPath::from_elements(vec![PathElement::Name("0".into())]);
        assert!(idx < name);

        // Prefixes sort before their extensions.
        let short = NormalizedPath::from_elements(vec![PathElement::Name("a".into())]);
        let long = short.child_index(0);
        assert!(short < long);
    }

    #[test]
    fn child_paths_do_not_alias() {
        let base = NormalizedPath::root().child_name("a");
        let left = base.child_index(0);
        let right = base.child_index(1);
        assert_eq!(base.len(), 1);
        assert_ne!(left, right);
    }
}
