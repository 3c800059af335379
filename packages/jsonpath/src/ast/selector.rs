//! Selector variants and slice bounds

use std::fmt;

use super::FilterExpr;
use super::write_json_string;

/// One of the five RFC 9535 selector types.
///
/// The enum keeps selector payloads inline so a segment's `Vec<Selector>`
/// stays contiguous in memory; only filter expressions live behind a box.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Member name selector (`'name'` or `.name`).
    Name(String),
    /// Array index selector (`[0]`, `[-1]`).
    Index(i64),
    /// Array slice selector (`[start:end:step]`).
    Slice(SliceBounds),
    /// Wildcard selector (`*`).
    Wildcard,
    /// Filter selector (`?expr`).
    Filter(Box<FilterExpr>),
}

/// Optional start, end, and step of a slice selector. `None` components use
/// the RFC 9535 §2.3.4 defaults at evaluation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceBounds {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl Selector {
    /// Whether the selector can select at most one node. Only name and
    /// index selectors are singular.
    #[inline]
    #[must_use]
    pub fn is_singular(&self) -> bool {
        matches!(self, Selector::Name(_) | Selector::Index(_))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => write_json_string(f, name),
            Selector::Index(idx) => write!(f, "{idx}"),
            Selector::Slice(bounds) => write!(f, "{bounds}"),
            Selector::Wildcard => f.write_str("*"),
            Selector::Filter(expr) => write!(f, "?{expr}"),
        }
    }
}

impl fmt::Display for SliceBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str(":")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}
