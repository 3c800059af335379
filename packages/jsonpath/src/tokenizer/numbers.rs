//! Integer and number literal scanning
//!
//! Implements the RFC 9535 number grammar: an optional leading minus, an
//! integer part without leading zeros, and optional fraction and exponent
//! parts. A lexeme with a fraction or exponent becomes a
//! [`TokenKind::Number`]; otherwise it is a [`TokenKind::Int`].

use super::core::Lexer;
use crate::tokens::{Token, TokenKind};

/// Scan an integer or number literal. The current character must be `-` or
/// an ASCII digit on entry.
pub(crate) fn scan_number(lexer: &mut Lexer<'_>) -> Token {
    let start = lexer.pos;

    if lexer.cur() == Some('-') {
        lexer.bump();
        if !lexer.cur().is_some_and(|c| c.is_ascii_digit()) {
            return lexer.invalid(start, "expected digit after '-'");
        }
    }

    // Integer part: "0" or a non-zero digit followed by digits.
    if lexer.cur() == Some('0') {
        lexer.bump();
        if lexer.cur().is_some_and(|c| c.is_ascii_digit()) {
            return lexer.invalid(start, "leading zeros not allowed");
        }
    } else {
        while lexer.cur().is_some_and(|c| c.is_ascii_digit()) {
            lexer.bump();
        }
    }

    let mut kind = TokenKind::Int;

    // Optional fraction: "." 1*DIGIT
    if lexer.cur() == Some('.') && lexer.peek_second().is_some_and(|c| c.is_ascii_digit()) {
        kind = TokenKind::Number;
        lexer.bump();
        while lexer.cur().is_some_and(|c| c.is_ascii_digit()) {
            lexer.bump();
        }
    } else if lexer.cur() == Some('.') && !matches!(lexer.peek_second(), Some('.')) {
        // A lone "." after digits is only valid as a fraction; ".." starts
        // a descendant segment and is left for the next scan.
        lexer.bump();
        return lexer.invalid(start, "expected digit after '.'");
    }

    // Optional exponent: ("e" / "E") [ "-" / "+" ] 1*DIGIT
    if matches!(lexer.cur(), Some('e' | 'E')) {
        kind = TokenKind::Number;
        lexer.bump();
        if matches!(lexer.cur(), Some('+' | '-')) {
            lexer.bump();
        }
        if !lexer.cur().is_some_and(|c| c.is_ascii_digit()) {
            return lexer.invalid(start, "expected digit in exponent");
        }
        while lexer.cur().is_some_and(|c| c.is_ascii_digit()) {
            lexer.bump();
        }
    }

    Token::new(kind, start, lexer.pos)
}
