//! Function extensions for filter expressions
//!
//! RFC 9535 §2.4 defines a small type system for function calls inside
//! filter expressions. Argument compatibility is validated at parse time
//! through [`Function::validate`]; evaluation receives arguments already
//! materialized per their parse-time tags.

mod builtins;
pub(crate) mod regex_cache;

pub use builtins::{CountFunc, LengthFunc, MatchFunc, SearchFunc, ValueFunc};

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::JsonPathResult;

/// Return type of a function per RFC 9535 §2.4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncType {
    /// The function returns a logical (boolean) value.
    Logical,
    /// The function returns a single JSON value or Nothing.
    Value,
    /// The function returns a node list.
    Nodes,
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FuncType::Logical => "LogicalType",
            FuncType::Value => "ValueType",
            FuncType::Nodes => "NodesType",
        })
    }
}

/// Parse-time classification of a function argument expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A literal JSON value.
    Literal,
    /// A singular query (`@.name`, `$.a.b`).
    SingularQuery,
    /// A non-singular filter query producing a node list.
    FilterQuery,
    /// A logical expression.
    Logical,
    /// A nested function call; validated against its own result type.
    FunctionCall,
}

/// Whether an argument of type `arg` can be used where a parameter of type
/// `target` is expected, per RFC 9535 §2.4.1 conversion rules.
///
/// [`ArgType::FunctionCall`] is accepted provisionally; the parser
/// re-validates nested calls against their declared result types.
#[must_use]
pub fn arg_converts_to(arg: ArgType, target: FuncType) -> bool {
    match arg {
        ArgType::Literal => target == FuncType::Value,
        ArgType::SingularQuery => matches!(target, FuncType::Value | FuncType::Nodes),
        ArgType::FilterQuery => target == FuncType::Nodes,
        ArgType::Logical => target == FuncType::Logical,
        ArgType::FunctionCall => true,
    }
}

/// A function argument materialized for evaluation.
#[derive(Debug, Clone)]
pub enum FuncArg<'a> {
    /// A single JSON value. Borrowed from the document or the compiled
    /// query where possible.
    Value(Cow<'a, Value>),
    /// The distinguished "no value" sentinel; distinct from JSON null.
    Nothing,
    /// A node list.
    Nodes(Vec<&'a Value>),
    /// A logical result.
    Logical(bool),
}

/// The result of a function call.
#[derive(Debug, Clone)]
pub enum FuncResult<'a> {
    /// A single JSON value.
    Value(Cow<'a, Value>),
    /// The distinguished "no value" sentinel; distinct from JSON null.
    Nothing,
    /// A logical result.
    Logical(bool),
    /// A node list.
    Nodes(Vec<&'a Value>),
}

/// A function callable from filter expressions.
///
/// Implementations must be safe for concurrent use; a compiled query may be
/// evaluated from any number of threads.
pub trait Function: Send + Sync {
    /// The function name as used in `JSONPath` expressions.
    fn name(&self) -> &str;

    /// The type of the function's return value.
    fn result_type(&self) -> FuncType;

    /// Validate argument types at parse time. Errors surface as parse
    /// errors anchored at the call site.
    fn validate(&self, args: &[ArgType]) -> JsonPathResult<()>;

    /// Evaluate the function. Runtime type mismatches must not error;
    /// they map to `false` for logical results and
    /// [`FuncResult::Nothing`] for value results.
    fn call<'a>(&self, args: Vec<FuncArg<'a>>) -> FuncResult<'a>;
}

/// Named [`Function`] definitions used during parsing and evaluation.
///
/// A registry is assembled before compilation and treated as frozen from
/// the first parse onward; compiled queries hold `Arc` references to the
/// functions they call.
pub struct FunctionRegistry {
    funcs: HashMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    /// Create a registry pre-populated with the RFC 9535 §2.4 built-ins:
    /// `length`, `count`, `match`, `search`, `value`.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            funcs: HashMap::with_capacity(8),
        };
        registry.register(Arc::new(LengthFunc));
        registry.register(Arc::new(CountFunc));
        registry.register(Arc::new(MatchFunc));
        registry.register(Arc::new(SearchFunc));
        registry.register(Arc::new(ValueFunc));
        registry
    }

    /// Add `func` to the registry. A function with the same name replaces
    /// the existing registration; last registration wins.
    pub fn register(&mut self, func: Arc<dyn Function>) {
        self.funcs.insert(func.name().to_string(), func);
    }

    /// Look up a function by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.funcs.get(name)
    }

    /// Number of registered functions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    /// Whether the registry is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.funcs.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}
