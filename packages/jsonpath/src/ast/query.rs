//! Compiled path queries

use std::fmt;

use super::Segment;

/// The root of a compiled `JSONPath` expression: an ordered sequence of
/// segments anchored either at the document root (`$`) or, inside filter
/// sub-expressions, at the current node (`@`).
///
/// A `PathQuery` is immutable after parsing and safe for concurrent
/// read-only evaluation.
#[derive(Debug, Clone)]
pub struct PathQuery {
    root: bool,
    segments: Vec<Segment>,
}

impl PathQuery {
    /// Create a query. `root` is true for `$`-anchored queries and false
    /// for `@`-anchored (relative) queries.
    #[must_use]
    pub fn new(root: bool, segments: Vec<Segment>) -> Self {
        Self { root, segments }
    }

    /// The query's segments.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the query is anchored at the document root (`$`).
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Whether the query selects at most one node on every document:
    /// every segment is a singular child segment.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.segments.iter().all(Segment::is_singular)
    }
}

impl fmt::Display for PathQuery {
    /// Canonical form: `$` or `@` followed by bracketed segments,
    /// e.g. `$["store"]["book"][0]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.root { "$" } else { "@" })?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
