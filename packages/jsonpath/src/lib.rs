//! RFC 9535 `JSONPath` query engine
//!
//! A compliant implementation of the `JSONPath` query language: a lexer,
//! recursive-descent parser, and evaluator over in-memory
//! [`serde_json::Value`] documents, with normalized-path tracking and the
//! RFC 9535 §2.4 function extensions.
//!
//! A query compiles once into an immutable [`JsonPath`] and evaluates any
//! number of times, from any number of threads, against arbitrary
//! documents. Evaluation is total: filter mismatches exclude nodes rather
//! than raising errors.
//!
//! # Examples
//!
//! ```rust
//! use quyc_jsonpath::JsonPath;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "store": {
//!         "book": [
//!             {"title": "Sayings of the Century", "price": 8.95},
//!             {"title": "Sword of Honour", "price": 12.99}
//!         ]
//!     }
//! });
//!
//! let path = JsonPath::parse("$.store.book[?@.price < 10].title")?;
//! let titles: Vec<_> = path.select(&doc).iter().collect();
//! assert_eq!(titles, vec![&json!("Sayings of the Century")]);
//!
//! for node in path.select_located(&doc).iter() {
//!     // $['store']['book'][0]['title']
//!     println!("{} = {}", node.path, node.value);
//! }
//! # Ok::<(), quyc_jsonpath::JsonPathError>(())
//! ```

pub mod ast;
pub mod error;
mod eval;
pub mod functions;
pub mod path;
pub mod tokenizer;
pub mod tokens;

mod parser;

pub use error::{ErrorKind, JsonPathError, JsonPathResult};
pub use functions::{
    ArgType, FuncArg, FuncResult, FuncType, Function, FunctionRegistry, arg_converts_to,
};
pub use path::{LocatedNode, LocatedNodeList, NodeList, NormalizedPath, PathElement};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::ast::PathQuery;

/// A compiled RFC 9535 `JSONPath` query. Immutable and safe for concurrent
/// evaluation.
#[derive(Debug, Clone)]
pub struct JsonPath {
    query: PathQuery,
}

impl JsonPath {
    /// Compile `expr` with the built-in function registry.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonPathError`] carrying the error kind, a one-line
    /// message, and the byte offset of the offending input.
    pub fn parse(expr: &str) -> JsonPathResult<Self> {
        JsonPathParser::new().compile(expr)
    }

    /// Compile `expr`, panicking on failure. Intended for expressions
    /// known valid at compile time.
    ///
    /// # Panics
    ///
    /// Panics with the parse error's message when `expr` is invalid.
    #[must_use]
    pub fn must_parse(expr: &str) -> Self {
        match Self::parse(expr) {
            Ok(path) => path,
            Err(err) => panic!("{err}"),
        }
    }

    /// Evaluate the query against `doc` and return the selected nodes in
    /// source order.
    #[must_use]
    pub fn select<'a>(&self, doc: &'a Value) -> NodeList<'a> {
        NodeList::new(eval::select(&self.query, doc, doc))
    }

    /// Evaluate the query against `doc`, pairing every selected node with
    /// its [`NormalizedPath`].
    #[must_use]
    pub fn select_located<'a>(&self, doc: &'a Value) -> LocatedNodeList<'a> {
        LocatedNodeList::new(eval::select_located(&self.query, doc))
    }

    /// The compiled query AST.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &PathQuery {
        &self.query
    }

    /// Whether the query selects at most one node on every document.
    #[inline]
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.query.is_singular()
    }
}

impl fmt::Display for JsonPath {
    /// The canonical query form, e.g. `$["store"]["book"][0]`. Reparsing
    /// the canonical form yields an equivalent query.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)
    }
}

impl FromStr for JsonPath {
    type Err = JsonPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for JsonPath {
    /// Serializes as the canonical query string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    /// Deserializes by parsing an expression string with the built-in
    /// function registry; custom functions do not round-trip.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = String::deserialize(deserializer)?;
        Self::parse(&expr).map_err(serde::de::Error::custom)
    }
}

/// Builder-style parser configuration: assemble a function registry, then
/// compile any number of expressions against it.
///
/// ```rust
/// use quyc_jsonpath::JsonPathParser;
///
/// let parser = JsonPathParser::new();
/// let path = parser.compile("$.a[?count(@.items[*]) > 2]")?;
/// assert!(parser.compile("$.a[?bogus(@)]").is_err());
/// # Ok::<(), quyc_jsonpath::JsonPathError>(())
/// ```
#[derive(Debug, Default)]
pub struct JsonPathParser {
    registry: FunctionRegistry,
}

impl JsonPathParser {
    /// A parser with the RFC 9535 built-in functions registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
        }
    }

    /// Register a filter function, consuming and returning the builder.
    /// A function with the name of an existing registration replaces it;
    /// last registration wins.
    #[must_use]
    pub fn with_function(mut self, func: impl Function + 'static) -> Self {
        self.registry.register(Arc::new(func));
        self
    }

    /// Register a shared filter function.
    pub fn register(&mut self, func: Arc<dyn Function>) {
        self.registry.register(func);
    }

    /// The parser's function registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Compile `expr` against this parser's function registry.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonPathError`] for lexical and structural errors and
    /// for violations of the RFC 9535 static rules.
    pub fn compile(&self, expr: &str) -> JsonPathResult<JsonPath> {
        let query = parser::parse_query(expr, &self.registry)?;
        Ok(JsonPath { query })
    }

    /// Compile `expr`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics with the parse error's message when `expr` is invalid.
    #[must_use]
    pub fn must_compile(&self, expr: &str) -> JsonPath {
        match self.compile(expr) {
            Ok(path) => path,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Whether `expr` is a syntactically valid `JSONPath` expression under the
/// built-in function registry.
#[must_use]
pub fn is_valid(expr: &str) -> bool {
    JsonPath::parse(expr).is_ok()
}

/// Compile `expr`, deserialize `json`, and return the selected values.
/// Values are cloned out of the transient document.
///
/// # Errors
///
/// Returns a [`JsonPathError`] when the expression fails to compile
/// ([`ErrorKind::Lex`] / [`ErrorKind::Parse`]) or the document fails to
/// deserialize ([`ErrorKind::Json`]).
pub fn query(expr: &str, json: &str) -> JsonPathResult<Vec<Value>> {
    let path = JsonPath::parse(expr)?;
    let doc: Value =
        serde_json::from_str(json).map_err(|err| JsonPathError::json(err.to_string()))?;
    Ok(path.select(&doc).iter().cloned().collect())
}

/// The located variant of [`query`]: selected values paired with their
/// normalized paths.
///
/// # Errors
///
/// See [`query`].
pub fn query_located(expr: &str, json: &str) -> JsonPathResult<Vec<(NormalizedPath, Value)>> {
    let path = JsonPath::parse(expr)?;
    let doc: Value =
        serde_json::from_str(json).map_err(|err| JsonPathError::json(err.to_string()))?;
    Ok(path
        .select_located(&doc)
        .into_iter()
        .map(|node| (node.path, node.value.clone()))
        .collect())
}
