//! Hand-written lexer for RFC 9535 `JSONPath` expressions
//!
//! The scanner walks the UTF-8 source by byte offset, producing [`Token`]s
//! whose spans index directly into the source. String literals are the only
//! tokens that allocate; everything else is recovered by slicing.

mod core;
mod numbers;
mod strings;

pub use self::core::Lexer;

use crate::tokens::{Token, TokenKind};

/// Tokenize `src` completely. The returned vector always ends in an
/// [`TokenKind::Eof`] or [`TokenKind::Invalid`] token.
#[must_use]
pub fn tokenize(src: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(src);
    // Most expressions run about one token per three bytes.
    let mut tokens = Vec::with_capacity(src.len() / 3 + 2);
    loop {
        let token = lexer.scan();
        let done = matches!(token.kind, TokenKind::Eof | TokenKind::Invalid);
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
