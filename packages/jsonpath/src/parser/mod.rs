//! Recursive descent parser for `JSONPath` expressions
//!
//! Consumes the token vector produced by the tokenizer and builds a
//! [`PathQuery`], enforcing the RFC 9535 static rules along the way:
//! whitespace placement, index ranges, singular-query comparison rules,
//! and function typing. Parse errors carry the byte offset of the
//! offending token; errors at end of input are reported distinctly.

mod filter;
mod functions;
mod selectors;

use crate::ast::{PathQuery, Segment, Selector};
use crate::error::{JsonPathError, JsonPathResult};
use crate::functions::FunctionRegistry;
use crate::tokenizer;
use crate::tokens::{Token, TokenKind};

/// Index values must lie within the I-JSON interoperable range.
pub(crate) const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991; // 2^53 - 1

/// Parse `src` into a [`PathQuery`] using the given function registry.
pub(crate) fn parse_query(src: &str, registry: &FunctionRegistry) -> JsonPathResult<PathQuery> {
    // RFC 9535 forbids leading and trailing whitespace in the query.
    const BLANK: &[char] = &[' ', '\t', '\n', '\r'];
    if src.starts_with(BLANK) {
        return Err(JsonPathError::parse("leading whitespace not allowed", 0));
    }
    let trimmed = src.trim_end_matches(BLANK);
    if trimmed.len() != src.len() {
        return Err(JsonPathError::parse(
            "trailing whitespace not allowed",
            trimmed.len(),
        ));
    }

    let tokens = tokenizer::tokenize(src);
    if let Some(token) = tokens.last() {
        if token.kind == TokenKind::Invalid {
            let message = token.value.clone().unwrap_or_else(|| "invalid token".into());
            return Err(JsonPathError::lex(message, token.start));
        }
    }

    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
        registry,
    };
    parser.parse()
}

/// Parser state: a cursor over the token vector. The token vector always
/// terminates in an EOF token, so `peek` is total.
pub(super) struct Parser<'a> {
    pub(super) src: &'a str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) registry: &'a FunctionRegistry,
}

impl Parser<'_> {
    /// Parse the full query: `('$' | '@') segments`, then require EOF.
    fn parse(&mut self) -> JsonPathResult<PathQuery> {
        let root = if self.eat(TokenKind::Dollar) {
            true
        } else if self.eat(TokenKind::At) {
            false
        } else {
            return Err(self.error("expected '$' or '@'"));
        };

        let segments = self.parse_segments()?;

        if !self.at_end() {
            return Err(self.error("unexpected token after path"));
        }

        Ok(PathQuery::new(root, segments))
    }

    /// Parse zero or more segments. Shared by the top-level query and by
    /// filter sub-queries, which stop at the first token that cannot start
    /// a segment.
    pub(super) fn parse_segments(&mut self) -> JsonPathResult<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            if self.eat(TokenKind::DotDot) {
                segments.push(self.parse_descendant_segment()?);
            } else if self.eat(TokenKind::LeftBracket) {
                segments.push(Segment::child(self.parse_bracketed_selection()?));
            } else if self.eat(TokenKind::Dot) {
                let selector = self.parse_dot_child()?;
                segments.push(Segment::child(vec![selector]));
            } else {
                return Ok(segments);
            }
        }
    }

    /// Parse a descendant segment after `..`.
    fn parse_descendant_segment(&mut self) -> JsonPathResult<Segment> {
        self.require_adjacent("..")?;

        if self.eat(TokenKind::LeftBracket) {
            return Ok(Segment::descendant(self.parse_bracketed_selection()?));
        }
        if self.eat(TokenKind::Star) {
            return Ok(Segment::descendant(vec![Selector::Wildcard]));
        }
        if self.peek().kind.is_name_shorthand() {
            let name = self.advance().text(self.src).to_string();
            return Ok(Segment::descendant(vec![Selector::Name(name)]));
        }
        Err(self.error("expected '[', '*', or member name after '..'"))
    }

    /// Parse a dot-child selector: `.` followed by `*` or a member name.
    /// Keywords remain usable as member names here.
    fn parse_dot_child(&mut self) -> JsonPathResult<Selector> {
        self.require_adjacent(".")?;

        if self.eat(TokenKind::Star) {
            return Ok(Selector::Wildcard);
        }
        if self.peek().kind.is_name_shorthand() {
            let name = self.advance().text(self.src).to_string();
            return Ok(Selector::Name(name));
        }
        Err(self.error("expected '*' or member name after '.'"))
    }

    /// Parse the selector list of a bracketed segment; the opening `[` has
    /// already been consumed.
    fn parse_bracketed_selection(&mut self) -> JsonPathResult<Vec<Selector>> {
        if self.check(TokenKind::RightBracket) {
            return Err(self.error("empty bracketed segment"));
        }

        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_selector()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        if !self.eat(TokenKind::RightBracket) {
            return Err(self.error("expected ']' or ','"));
        }
        Ok(selectors)
    }

    // Token cursor helpers.

    /// The current token. The vector always ends in EOF, so this is total.
    #[inline]
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The most recently consumed token.
    #[inline]
    pub(super) fn prev(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Whether the current token is of `kind`.
    #[inline]
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Whether the cursor sits on EOF.
    #[inline]
    pub(super) fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume and return the current token. The cursor never moves past
    /// EOF.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token when it is of `kind`.
    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// A parse error at the current token, or an at-end error on EOF.
    pub(super) fn error(&self, message: impl Into<String>) -> JsonPathError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            JsonPathError::parse_at_end(message)
        } else {
            JsonPathError::parse(message, token.start)
        }
    }

    /// Reject whitespace between the previously consumed token and the
    /// next one. RFC 9535 forbids blank space after `.` and `..` and
    /// between a function name and its `(`.
    pub(super) fn require_adjacent(&self, what: &str) -> JsonPathResult<()> {
        let next = self.peek();
        if next.kind != TokenKind::Eof && next.start > self.prev().end {
            return Err(JsonPathError::parse(
                format!("whitespace not allowed after '{what}'"),
                self.prev().end,
            ));
        }
        Ok(())
    }
}
