//! The RFC 9535 §2.4 built-in functions
//!
//! `length`, `count`, `match`, `search`, and `value`. Runtime type
//! mismatches never error: value-typed results fall back to Nothing and
//! logical-typed results to false.

use std::borrow::Cow;

use serde_json::Value;

use super::regex_cache;
use super::{ArgType, FuncArg, FuncResult, FuncType, Function, arg_converts_to};
use crate::error::{ErrorKind, JsonPathError, JsonPathResult};

/// Validation error for a wrong argument count. Position is attached by
/// the parser at the call site.
fn wrong_arg_count(name: &str, want: usize, got: usize) -> JsonPathError {
    JsonPathError::new(
        ErrorKind::Parse,
        format!("{name}() expects {want} argument(s), got {got}"),
        None,
    )
}

/// Validation error for an argument that cannot convert to `target`.
fn incompatible_arg(name: &str, index: usize, target: FuncType) -> JsonPathError {
    JsonPathError::new(
        ErrorKind::Parse,
        format!("{name}() argument {} cannot convert to {target}", index + 1),
        None,
    )
}

/// Validate a single argument convertible to `target`.
fn validate_one(name: &str, args: &[ArgType], target: FuncType) -> JsonPathResult<()> {
    if args.len() != 1 {
        return Err(wrong_arg_count(name, 1, args.len()));
    }
    if !arg_converts_to(args[0], target) {
        return Err(incompatible_arg(name, 0, target));
    }
    Ok(())
}

/// Validate two arguments, each convertible to ValueType.
fn validate_two_values(name: &str, args: &[ArgType]) -> JsonPathResult<()> {
    if args.len() != 2 {
        return Err(wrong_arg_count(name, 2, args.len()));
    }
    for (i, arg) in args.iter().enumerate() {
        if !arg_converts_to(*arg, FuncType::Value) {
            return Err(incompatible_arg(name, i, FuncType::Value));
        }
    }
    Ok(())
}

/// The `length()` function (RFC 9535 §2.4.4).
///
/// Strings report their number of Unicode scalar values (not bytes, not
/// UTF-16 code units); arrays their element count; objects their member
/// count. Anything else, including Nothing, yields Nothing.
pub struct LengthFunc;

impl Function for LengthFunc {
    fn name(&self) -> &str {
        "length"
    }

    fn result_type(&self) -> FuncType {
        FuncType::Value
    }

    fn validate(&self, args: &[ArgType]) -> JsonPathResult<()> {
        validate_one("length", args, FuncType::Value)
    }

    fn call<'a>(&self, args: Vec<FuncArg<'a>>) -> FuncResult<'a> {
        let Some(FuncArg::Value(value)) = args.into_iter().next() else {
            return FuncResult::Nothing;
        };
        let len = match &*value {
            Value::String(s) => s.chars().count(),
            Value::Array(arr) => arr.len(),
            Value::Object(obj) => obj.len(),
            _ => return FuncResult::Nothing,
        };
        FuncResult::Value(Cow::Owned(Value::from(len)))
    }
}

/// The `count()` function (RFC 9535 §2.4.6).
///
/// Reports the cardinality of its node-list argument; a non-list argument
/// counts as zero.
pub struct CountFunc;

impl Function for CountFunc {
    fn name(&self) -> &str {
        "count"
    }

    fn result_type(&self) -> FuncType {
        FuncType::Value
    }

    fn validate(&self, args: &[ArgType]) -> JsonPathResult<()> {
        validate_one("count", args, FuncType::Nodes)
    }

    fn call<'a>(&self, args: Vec<FuncArg<'a>>) -> FuncResult<'a> {
        let count = match args.into_iter().next() {
            Some(FuncArg::Nodes(nodes)) => nodes.len(),
            _ => 0,
        };
        FuncResult::Value(Cow::Owned(Value::from(count)))
    }
}

/// Extract the two string operands shared by `match()` and `search()`.
fn two_strings<'a>(args: Vec<FuncArg<'a>>) -> Option<(Cow<'a, Value>, Cow<'a, Value>)> {
    let mut iter = args.into_iter();
    match (iter.next(), iter.next()) {
        (Some(FuncArg::Value(a)), Some(FuncArg::Value(b))) => Some((a, b)),
        _ => None,
    }
}

/// The `match()` function (RFC 9535 §2.4.7): full-match I-Regexp test,
/// anchored at both ends. Non-string operands or an invalid pattern yield
/// false.
pub struct MatchFunc;

impl Function for MatchFunc {
    fn name(&self) -> &str {
        "match"
    }

    fn result_type(&self) -> FuncType {
        FuncType::Logical
    }

    fn validate(&self, args: &[ArgType]) -> JsonPathResult<()> {
        validate_two_values("match", args)
    }

    fn call<'a>(&self, args: Vec<FuncArg<'a>>) -> FuncResult<'a> {
        let Some((text, pattern)) = two_strings(args) else {
            return FuncResult::Logical(false);
        };
        match (&*text, &*pattern) {
            (Value::String(text), Value::String(pattern)) => {
                FuncResult::Logical(regex_cache::match_full(text, pattern))
            }
            _ => FuncResult::Logical(false),
        }
    }
}

/// The `search()` function (RFC 9535 §2.4.7): substring I-Regexp test.
/// Non-string operands or an invalid pattern yield false.
pub struct SearchFunc;

impl Function for SearchFunc {
    fn name(&self) -> &str {
        "search"
    }

    fn result_type(&self) -> FuncType {
        FuncType::Logical
    }

    fn validate(&self, args: &[ArgType]) -> JsonPathResult<()> {
        validate_two_values("search", args)
    }

    fn call<'a>(&self, args: Vec<FuncArg<'a>>) -> FuncResult<'a> {
        let Some((text, pattern)) = two_strings(args) else {
            return FuncResult::Logical(false);
        };
        match (&*text, &*pattern) {
            (Value::String(text), Value::String(pattern)) => {
                FuncResult::Logical(regex_cache::search(text, pattern))
            }
            _ => FuncResult::Logical(false),
        }
    }
}

/// The `value()` function (RFC 9535 §2.4.8).
///
/// A node list with exactly one node yields that node's value; anything
/// else yields Nothing.
pub struct ValueFunc;

impl Function for ValueFunc {
    fn name(&self) -> &str {
        "value"
    }

    fn result_type(&self) -> FuncType {
        FuncType::Value
    }

    fn validate(&self, args: &[ArgType]) -> JsonPathResult<()> {
        validate_one("value", args, FuncType::Nodes)
    }

    fn call<'a>(&self, args: Vec<FuncArg<'a>>) -> FuncResult<'a> {
        match args.into_iter().next() {
            Some(FuncArg::Nodes(nodes)) if nodes.len() == 1 => {
                FuncResult::Value(Cow::Borrowed(nodes[0]))
            }
            Some(FuncArg::Value(value)) => FuncResult::Value(value),
            _ => FuncResult::Nothing,
        }
    }
}
