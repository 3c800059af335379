//! Selector parsing: wildcard, filter, name, index, and slice
//!
//! Index values are range-checked against the I-JSON interoperable range
//! and `-0` is rejected in every index position by inspecting the raw
//! lexeme (the parsed value alone cannot distinguish `-0` from `0`).

use super::{MAX_SAFE_INTEGER, Parser};
use crate::ast::{Selector, SliceBounds};
use crate::error::{JsonPathError, JsonPathResult};
use crate::tokens::{Token, TokenKind};

impl Parser<'_> {
    /// Parse a single selector inside a bracketed segment.
    pub(super) fn parse_selector(&mut self) -> JsonPathResult<Selector> {
        if self.eat(TokenKind::Star) {
            return Ok(Selector::Wildcard);
        }
        if self.eat(TokenKind::Question) {
            let expr = self.parse_filter_expr()?;
            return Ok(Selector::Filter(Box::new(expr)));
        }
        if self.check(TokenKind::Str) {
            let token = self.advance();
            return Ok(Selector::Name(token.value.unwrap_or_default()));
        }
        if self.check(TokenKind::Int) {
            return self.parse_index_or_slice();
        }
        if self.eat(TokenKind::Colon) {
            return self.parse_slice(None);
        }
        Err(self.error("expected selector"))
    }

    /// Parse an index selector, or a slice selector when the integer is
    /// followed by `:`.
    fn parse_index_or_slice(&mut self) -> JsonPathResult<Selector> {
        let token = self.advance();
        let index = self.parse_index_token(&token)?;

        if self.eat(TokenKind::Colon) {
            return self.parse_slice(Some(index));
        }
        Ok(Selector::Index(index))
    }

    /// Parse the remainder of a slice selector; the first colon has been
    /// consumed and `start` holds the component before it, if any.
    fn parse_slice(&mut self, start: Option<i64>) -> JsonPathResult<Selector> {
        let mut bounds = SliceBounds {
            start,
            ..SliceBounds::default()
        };

        if self.check(TokenKind::Int) {
            let token = self.advance();
            bounds.end = Some(self.parse_index_token(&token)?);
        }

        if self.eat(TokenKind::Colon) {
            if self.check(TokenKind::Int) {
                let token = self.advance();
                bounds.step = Some(self.parse_index_token(&token)?);
            }
        }

        Ok(Selector::Slice(bounds))
    }

    /// Parse an integer token used in an index position, enforcing the
    /// `-0` prohibition and the ±(2^53−1) range.
    pub(super) fn parse_index_token(&self, token: &Token) -> JsonPathResult<i64> {
        let raw = token.text(self.src);
        let value: i64 = raw
            .parse()
            .map_err(|_| JsonPathError::parse("index out of range", token.start))?;

        if value == 0 && raw.starts_with('-') {
            return Err(JsonPathError::parse("-0 is not allowed", token.start));
        }
        if !(-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
            return Err(JsonPathError::parse("index out of range", token.start));
        }
        Ok(value)
    }
}
