//! I-Regexp compilation and process-wide regex cache
//!
//! RFC 9485 I-Regexp differs from the `regex` crate dialect in one
//! load-bearing way: `.` must not match `\n` or `\r`. Patterns are
//! translated by rewriting every any-char atom (an unescaped `.` outside a
//! character class) to `[^\n\r]` before compilation.
//!
//! Compiled regexes are cached in a process-wide map keyed by the final
//! pattern string. Reads and inserts may race; compilation is idempotent so
//! last-writer-wins is harmless. Invalid patterns are not cached and are
//! re-attempted on each call.

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REGEX_CACHE: RwLock<HashMap<String, Regex>> = RwLock::new(HashMap::new());
}

/// Insertion stops past this size; further patterns compile per call.
const REGEX_CACHE_LIMIT: usize = 64;

/// Full-match test: the pattern must match the entire text.
pub(crate) fn match_full(text: &str, pattern: &str) -> bool {
    let anchored = format!(r"\A(?:{})\z", translate_iregexp(pattern));
    get_or_compile(&anchored).is_some_and(|re| re.is_match(text))
}

/// Substring test: the pattern must match somewhere in the text.
pub(crate) fn search(text: &str, pattern: &str) -> bool {
    let translated = translate_iregexp(pattern);
    get_or_compile(&translated).is_some_and(|re| re.is_match(text))
}

/// Fetch a compiled regex from the cache, compiling and inserting on miss.
/// Returns `None` for invalid patterns.
fn get_or_compile(pattern: &str) -> Option<Regex> {
    if let Ok(cache) = REGEX_CACHE.read() {
        if let Some(re) = cache.get(pattern) {
            return Some(re.clone());
        }
    }

    match Regex::new(pattern) {
        Ok(re) => {
            if let Ok(mut cache) = REGEX_CACHE.write() {
                if cache.len() < REGEX_CACHE_LIMIT {
                    cache.insert(pattern.to_string(), re.clone());
                }
            }
            Some(re)
        }
        Err(err) => {
            log::debug!("invalid I-Regexp pattern {pattern:?}: {err}");
            None
        }
    }
}

/// Rewrite any-char atoms to `[^\n\r]` per RFC 9485 §5.3.
///
/// An unescaped `.` outside a character class is exactly the any-char atom
/// of the regex grammar; `.` inside a class and escaped `\.` are literals
/// and pass through unchanged.
fn translate_iregexp(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '.' if !in_class => out.push_str("[^\\n\\r]"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_dot_outside_classes() {
        assert_eq!(translate_iregexp("a.c"), "a[^\\n\\r]c");
        assert_eq!(translate_iregexp(r"a\.c"), r"a\.c");
        assert_eq!(translate_iregexp("[.]"), "[.]");
        assert_eq!(translate_iregexp("[a-z.]x."), "[a-z.]x[^\\n\\r]");
    }

    #[test]
    fn dot_rejects_line_terminators() {
        assert!(match_full("ab", "a."));
        assert!(!match_full("a\n", "a."));
        assert!(!match_full("a\r", "a."));
        assert!(!search("a\nb", "a.b"));
    }

    #[test]
    fn match_is_anchored_search_is_not() {
        assert!(match_full("1974", "1974"));
        assert!(!match_full("x1974y", "1974"));
        assert!(search("x1974y", "1974"));
        // Alternation binds inside the anchoring group.
        assert!(match_full("cat", "cat|dog"));
        assert!(!match_full("catx", "cat|dog"));
    }

    #[test]
    fn invalid_patterns_are_false() {
        assert!(!match_full("abc", "a[unclosed"));
        assert!(!search("abc", "a[unclosed"));
    }
}
