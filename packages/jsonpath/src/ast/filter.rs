//! Filter expression tree
//!
//! The tree mirrors RFC 9535 precedence directly: a [`FilterExpr`] is a
//! [`LogicalOr`] of [`LogicalAnd`]s of [`BasicExpr`]s. Filter expressions
//! own their sub-queries; the top-level query owns its filters
//! transitively, so unique ownership suffices throughout.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::PathQuery;
use crate::functions::{ArgType, FuncType, Function};

/// A filter selector's expression (`?logical-expr`).
#[derive(Debug, Clone)]
pub struct FilterExpr {
    pub expr: LogicalOr,
}

/// A sequence of [`LogicalAnd`] expressions joined by `||`.
/// Evaluation short-circuits on the first true branch.
#[derive(Debug, Clone)]
pub struct LogicalOr(pub Vec<LogicalAnd>);

/// A sequence of [`BasicExpr`]s joined by `&&`.
/// Evaluation short-circuits on the first false branch.
#[derive(Debug, Clone)]
pub struct LogicalAnd(pub Vec<BasicExpr>);

/// A single boolean-valued filter expression.
#[derive(Debug, Clone)]
pub enum BasicExpr {
    /// Existence test: true when the query selects at least one node.
    /// A bare `@` or `$` always exists.
    Exist(PathQuery),
    /// Negated existence test (`!@.a`).
    NonExist(PathQuery),
    /// Parenthesized logical expression.
    Paren(LogicalOr),
    /// Negated parenthesized logical expression (`!(...)`).
    NotParen(LogicalOr),
    /// Comparison between two comparable operands.
    Compare(Box<CompareExpr>),
    /// Logical-typed function call used as a test (`match(...)`).
    FuncTest(FuncExpr),
    /// Negated logical-typed function call (`!match(...)`).
    NegFuncTest(FuncExpr),
}

/// A comparison expression.
#[derive(Debug, Clone)]
pub struct CompareExpr {
    pub left: Comparable,
    pub op: CompOp,
    pub right: Comparable,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompOp::Equal => "==",
            CompOp::NotEqual => "!=",
            CompOp::Less => "<",
            CompOp::LessEqual => "<=",
            CompOp::Greater => ">",
            CompOp::GreaterEqual => ">=",
        })
    }
}

/// A comparable operand of a comparison expression.
#[derive(Debug, Clone)]
pub enum Comparable {
    /// A literal JSON value.
    Literal(Value),
    /// A singular query; the parser rejects non-singular queries here.
    Query(PathQuery),
    /// A value-typed function call.
    FuncCall(FuncExpr),
}

/// A function call in a filter expression.
///
/// `arg_types` holds the parse-time tag for each argument slot after
/// two-pass resolution; the evaluator uses it to decide whether a query
/// argument materializes as a node list or as a single value.
#[derive(Clone)]
pub struct FuncExpr {
    name: String,
    func: Arc<dyn Function>,
    arg_types: Vec<ArgType>,
    args: Vec<FuncArgExpr>,
}

/// A function argument expression.
#[derive(Debug, Clone)]
pub enum FuncArgExpr {
    /// A literal JSON value.
    Literal(Value),
    /// A path query (`@...` or `$...`).
    Query(PathQuery),
    /// A nested function call.
    Call(FuncExpr),
    /// A logical expression.
    Logical(LogicalOr),
}

impl FuncExpr {
    /// Create a function call node. `arg_types` must be parallel to `args`.
    #[must_use]
    pub fn new(
        name: String,
        func: Arc<dyn Function>,
        arg_types: Vec<ArgType>,
        args: Vec<FuncArgExpr>,
    ) -> Self {
        Self {
            name,
            func,
            arg_types,
            args,
        }
    }

    /// The function name as written in the expression.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved function definition.
    #[inline]
    #[must_use]
    pub fn func(&self) -> &Arc<dyn Function> {
        &self.func
    }

    /// The return type of the underlying function.
    #[inline]
    #[must_use]
    pub fn result_type(&self) -> FuncType {
        self.func.result_type()
    }

    /// Parse-time argument-type tags, parallel to [`FuncExpr::args`].
    #[inline]
    #[must_use]
    pub fn arg_types(&self) -> &[ArgType] {
        &self.arg_types
    }

    /// The argument expressions.
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[FuncArgExpr] {
        &self.args
    }
}

impl fmt::Debug for FuncExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncExpr")
            .field("name", &self.name)
            .field("arg_types", &self.arg_types)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl fmt::Display for LogicalOr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, and) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{and}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LogicalAnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BasicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicExpr::Exist(query) => write!(f, "{query}"),
            BasicExpr::NonExist(query) => write!(f, "!{query}"),
            BasicExpr::Paren(or) => write!(f, "({or})"),
            BasicExpr::NotParen(or) => write!(f, "!({or})"),
            BasicExpr::Compare(cmp) => write!(f, "{} {} {}", cmp.left, cmp.op, cmp.right),
            BasicExpr::FuncTest(call) => write!(f, "{call}"),
            BasicExpr::NegFuncTest(call) => write!(f, "!{call}"),
        }
    }
}

impl fmt::Display for Comparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // serde_json renders compact JSON, which the lexer reparses.
            Comparable::Literal(value) => write!(f, "{value}"),
            Comparable::Query(query) => write!(f, "{query}"),
            Comparable::FuncCall(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for FuncExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for FuncArgExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuncArgExpr::Literal(value) => write!(f, "{value}"),
            FuncArgExpr::Query(query) => write!(f, "{query}"),
            FuncArgExpr::Call(call) => write!(f, "{call}"),
            FuncArgExpr::Logical(or) => write!(f, "{or}"),
        }
    }
}
