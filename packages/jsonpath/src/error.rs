//! Error types for `JSONPath` compilation and querying
//!
//! Compilation produces a single [`JsonPathError`] carrying the error kind,
//! a one-line message, and the byte offset of the offending input where one
//! is known. Evaluation is total and never produces errors.

use std::error::Error;
use std::fmt;

/// Classifies a [`JsonPathError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid token in the expression source (bad character, escape,
    /// surrogate pair, number form, unterminated string, lone operator).
    Lex,
    /// Structurally invalid expression or violation of an RFC 9535 static
    /// rule (singular-query comparison rule, function typing, ...).
    Parse,
    /// JSON document deserialization failed in a query convenience function.
    Json,
}

/// Error produced when a `JSONPath` expression cannot be compiled or a JSON
/// document cannot be deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPathError {
    kind: ErrorKind,
    message: String,
    /// Byte offset into the expression source. `None` for parse errors
    /// raised at end of input and for JSON errors.
    position: Option<usize>,
}

/// Result type for `JSONPath` operations.
pub type JsonPathResult<T> = Result<T, JsonPathError>;

impl JsonPathError {
    /// Create an error with an explicit kind, message, and position.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    /// Lexical error at the given byte offset.
    #[must_use]
    pub fn lex(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Lex, message, Some(position))
    }

    /// Parse error at the given byte offset.
    #[must_use]
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Parse, message, Some(position))
    }

    /// Parse error raised at end of input, where no offending token exists.
    #[must_use]
    pub fn parse_at_end(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message, None)
    }

    /// JSON deserialization error from a query convenience function.
    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Json, message, None)
    }

    /// The error classification.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The one-line error message, without position information.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the offending input, when known.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Replace a missing position with `position`. Used by the parser to
    /// anchor registry validation errors at the function-call site.
    pub(crate) fn or_position(mut self, position: usize) -> Self {
        if self.position.is_none() && self.kind != ErrorKind::Json {
            self.position = Some(position);
        }
        self
    }
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ErrorKind::Lex => "jsonpath lex error",
            ErrorKind::Parse => "jsonpath parse error",
            ErrorKind::Json => "jsonpath json error",
        };
        match self.position {
            Some(pos) => write!(f, "{label} at position {pos}: {}", self.message),
            None if self.kind == ErrorKind::Parse => {
                write!(f, "{label} at end of input: {}", self.message)
            }
            None => write!(f, "{label}: {}", self.message),
        }
    }
}

impl Error for JsonPathError {}
