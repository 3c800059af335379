//! Child and descendant segments

use std::fmt;

use super::Selector;

/// A child or descendant segment per RFC 9535 §1.4.2. Holds one or more
/// selectors; the parser never produces an empty selector list.
#[derive(Debug, Clone)]
pub struct Segment {
    selectors: Vec<Selector>,
    descendant: bool,
}

impl Segment {
    /// Create a child segment applying `selectors` to direct children.
    #[must_use]
    pub fn child(selectors: Vec<Selector>) -> Self {
        Self {
            selectors,
            descendant: false,
        }
    }

    /// Create a descendant segment applying `selectors` to the node and
    /// all of its descendants.
    #[must_use]
    pub fn descendant(selectors: Vec<Selector>) -> Self {
        Self {
            selectors,
            descendant: true,
        }
    }

    /// The segment's selectors.
    #[inline]
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Whether this is a descendant segment.
    #[inline]
    #[must_use]
    pub fn is_descendant(&self) -> bool {
        self.descendant
    }

    /// Whether the segment selects at most one node: a child segment with
    /// exactly one singular selector.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        !self.descendant && self.selectors.len() == 1 && self.selectors[0].is_singular()
    }
}

impl fmt::Display for Segment {
    /// Canonical form: `[<selectors>]` for child segments,
    /// `..[<selectors>]` for descendant segments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descendant {
            f.write_str("..")?;
        }
        f.write_str("[")?;
        for (i, sel) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{sel}")?;
        }
        f.write_str("]")
    }
}
