//! String literal scanning with escape sequence handling
//!
//! Handles single- and double-quoted strings per RFC 9535 §2.3.1, including
//! `\uXXXX` escapes and UTF-16 surrogate pairs. The decoded content is
//! attached to the token; the span still covers the raw quoted source.

use super::core::Lexer;
use crate::tokens::{Token, TokenKind};

/// Scan a string literal. The current character must be `"` or `'` on entry.
pub(crate) fn scan_string(lexer: &mut Lexer<'_>) -> Token {
    let start = lexer.pos;
    let quote = match lexer.cur() {
        Some(q) => q,
        None => return lexer.invalid(start, "expected string"),
    };
    lexer.bump(); // opening quote

    let mut value = String::new();

    while let Some(c) = lexer.cur() {
        if c == quote {
            lexer.bump(); // closing quote
            return Token {
                kind: TokenKind::Str,
                start,
                end: lexer.pos,
                value: Some(value),
            };
        }
        if c == '\\' {
            if let Err(message) = scan_escape(lexer, quote, &mut value) {
                return lexer.invalid(start, message);
            }
            continue;
        }
        if !is_unescaped(c, quote) {
            return lexer.invalid(start, format!("invalid character {c:?} in string"));
        }
        value.push(c);
        lexer.bump();
    }

    lexer.invalid(start, "unterminated string")
}

/// Handle a single escape sequence. The current character must be `\` on
/// entry; on success the cursor sits after the escape.
fn scan_escape(lexer: &mut Lexer<'_>, quote: char, value: &mut String) -> Result<(), String> {
    lexer.bump(); // consume '\'

    let Some(c) = lexer.cur() else {
        return Err("unterminated escape sequence".into());
    };

    match c {
        c if c == quote => value.push(quote),
        'b' => value.push('\u{0008}'),
        'f' => value.push('\u{000C}'),
        'n' => value.push('\n'),
        'r' => value.push('\r'),
        't' => value.push('\t'),
        '/' => value.push('/'),
        '\\' => value.push('\\'),
        'u' => return scan_unicode_escape(lexer, value),
        _ => return Err("invalid escape sequence".into()),
    }
    lexer.bump();
    Ok(())
}

/// Handle a `\uXXXX` escape, including surrogate pairs. The current
/// character must be `u` on entry.
fn scan_unicode_escape(lexer: &mut Lexer<'_>, value: &mut String) -> Result<(), String> {
    lexer.bump(); // consume 'u'

    let high = scan_hex4(lexer)?;

    // Not a surrogate: a scalar value directly.
    if !(0xD800..=0xDFFF).contains(&high) {
        match char::from_u32(high) {
            Some(c) => {
                value.push(c);
                return Ok(());
            }
            None => return Err("invalid unicode escape".into()),
        }
    }

    // A low surrogate cannot stand alone.
    if high >= 0xDC00 {
        return Err("low surrogate without preceding high surrogate".into());
    }

    // High surrogate: the next sequence must be \uXXXX with a low surrogate.
    if lexer.cur() != Some('\\') {
        return Err("high surrogate not followed by low surrogate".into());
    }
    lexer.bump();
    if lexer.cur() != Some('u') {
        return Err("high surrogate not followed by low surrogate".into());
    }
    lexer.bump();

    let low = scan_hex4(lexer)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err("high surrogate not followed by low surrogate".into());
    }

    let scalar = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    match char::from_u32(scalar) {
        Some(c) => {
            value.push(c);
            Ok(())
        }
        None => Err("invalid surrogate pair".into()),
    }
}

/// Scan exactly four hex digits and return the code point.
fn scan_hex4(lexer: &mut Lexer<'_>) -> Result<u32, String> {
    let mut code = 0u32;
    for _ in 0..4 {
        let digit = lexer
            .cur()
            .and_then(|c| c.to_digit(16))
            .ok_or("invalid unicode escape")?;
        code = code * 16 + digit;
        lexer.bump();
    }
    Ok(code)
}

/// Whether `c` may appear unescaped in a string with the given quote
/// character, per RFC 9535 §2.3.1:
/// `%x20-5B / %x5D-D7FF / %xE000-10FFFF` excluding the quote itself.
/// The gap at `%x5C` excludes the backslash; `%x00-1F` excludes raw
/// control characters.
#[inline]
fn is_unescaped(c: char, quote: char) -> bool {
    if c == quote {
        return false;
    }
    matches!(c, '\u{0020}'..='\u{005B}' | '\u{005D}'..='\u{D7FF}') || c >= '\u{E000}'
}

#[cfg(test)]
mod tests {
    use super::super::tokenize;
    use crate::tokens::TokenKind;

    fn parsed(src: &str) -> String {
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::Str, "source {src:?}");
        tokens[0].value.clone().unwrap_or_default()
    }

    #[test]
    fn decodes_simple_escapes() {
        assert_eq!(parsed(r#""a\nb""#), "a\nb");
        assert_eq!(parsed(r#""tab\there""#), "tab\there");
        assert_eq!(parsed(r#""\\\/""#), "\\/");
        assert_eq!(parsed(r#"'it\'s'"#), "it's");
        assert_eq!(parsed(r#""\b\f\r""#), "\u{0008}\u{000C}\r");
    }

    #[test]
    fn decodes_unicode_escapes() {
        assert_eq!(parsed("\"\\u00e9\""), "\u{00e9}");
        assert_eq!(parsed("\"\\u0041\\u005A\""), "AZ");
        // Raw non-ASCII scalars pass through unescaped.
        assert_eq!(parsed("\"caf\u{00e9}\""), "caf\u{00e9}");
        // Surrogate pair for U+1D11E MUSICAL SYMBOL G CLEF.
        assert_eq!(parsed("\"\\uD834\\uDD1E\""), "\u{1D11E}");
    }

    #[test]
    fn rejects_bad_surrogates() {
        for src in [
            "\"\\uD834\"",        // lone high surrogate
            "\"\\uDD1E\"",        // lone low surrogate
            "\"\\uD834\\uD834\"", // high followed by high
            "\"\\uD834\\n\"",     // high followed by ordinary escape
            "\"\\uD834x\"",       // high followed by raw character
        ] {
            let tokens = tokenize(src);
            assert_eq!(tokens[0].kind, TokenKind::Invalid, "source {src:?}");
        }
    }

    #[test]
    fn rejects_raw_controls_and_unterminated() {
        assert_eq!(tokenize("\"a\u{0001}b\"")[0].kind, TokenKind::Invalid);
        assert_eq!(tokenize("\"abc")[0].kind, TokenKind::Invalid);
        assert_eq!(tokenize(r#""bad\q""#)[0].kind, TokenKind::Invalid);
    }

    #[test]
    fn quote_kind_only_escapes_own_quote() {
        // A double quote inside a single-quoted string needs no escape.
        assert_eq!(parsed(r#"'say "hi"'"#), "say \"hi\"");
    }
}
