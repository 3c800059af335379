//! Filter expression evaluation
//!
//! Operand evaluation produces a JSON value or the distinguished Nothing
//! sentinel; Nothing arises when a singular query selects zero nodes or a
//! value-typed function returns no value, and is never equal to JSON null.
//! Equality compares numbers by mathematical value regardless of
//! integer/float representation; ordering is defined only for
//! number/number and string/string pairs.

use std::borrow::Cow;

use serde_json::{Number, Value};

use super::select;
use crate::ast::{
    BasicExpr, CompOp, Comparable, CompareExpr, FilterExpr, FuncArgExpr, FuncExpr, LogicalAnd,
    LogicalOr,
};
use crate::functions::{ArgType, FuncArg, FuncResult};

/// Evaluate a filter expression with `current` as the candidate node.
pub(crate) fn eval_filter(expr: &FilterExpr, current: &Value, root: &Value) -> bool {
    eval_or(&expr.expr, current, root)
}

/// `||` over the and-branches; short-circuits on the first true.
pub(crate) fn eval_or(or: &LogicalOr, current: &Value, root: &Value) -> bool {
    or.0.iter().any(|and| eval_and(and, current, root))
}

/// `&&` over the basic expressions; short-circuits on the first false.
fn eval_and(and: &LogicalAnd, current: &Value, root: &Value) -> bool {
    and.0.iter().all(|expr| eval_basic(expr, current, root))
}

fn eval_basic(expr: &BasicExpr, current: &Value, root: &Value) -> bool {
    match expr {
        // A bare @ or $ always exists.
        BasicExpr::Exist(query) => {
            query.segments().is_empty() || !select(query, current, root).is_empty()
        }
        BasicExpr::NonExist(query) => {
            !query.segments().is_empty() && select(query, current, root).is_empty()
        }
        BasicExpr::Paren(or) => eval_or(or, current, root),
        BasicExpr::NotParen(or) => !eval_or(or, current, root),
        BasicExpr::Compare(cmp) => eval_compare(cmp, current, root),
        BasicExpr::FuncTest(call) => eval_func_test(call, current, root),
        BasicExpr::NegFuncTest(call) => !eval_func_test(call, current, root),
    }
}

/// The evaluated form of a comparable operand.
enum Operand<'a> {
    Nothing,
    Value(Cow<'a, Value>),
}

fn eval_comparable<'a>(
    comparable: &'a Comparable,
    current: &'a Value,
    root: &'a Value,
) -> Operand<'a> {
    match comparable {
        Comparable::Literal(value) => Operand::Value(Cow::Borrowed(value)),
        Comparable::Query(query) => {
            // Singular by the parser's static rule; zero nodes is Nothing.
            let nodes = select(query, current, root);
            match nodes.as_slice() {
                &[node] => Operand::Value(Cow::Borrowed(node)),
                _ => Operand::Nothing,
            }
        }
        Comparable::FuncCall(call) => match eval_func_call(call, current, root) {
            FuncResult::Value(value) => Operand::Value(value),
            _ => Operand::Nothing,
        },
    }
}

fn eval_compare(cmp: &CompareExpr, current: &Value, root: &Value) -> bool {
    let left = eval_comparable(&cmp.left, current, root);
    let right = eval_comparable(&cmp.right, current, root);

    match cmp.op {
        CompOp::Equal => operands_equal(&left, &right),
        CompOp::NotEqual => !operands_equal(&left, &right),
        CompOp::Less => operands_less(&left, &right),
        CompOp::LessEqual => operands_less(&left, &right) || values_both_equal(&left, &right),
        CompOp::Greater => operands_less(&right, &left),
        CompOp::GreaterEqual => operands_less(&right, &left) || values_both_equal(&left, &right),
    }
}

/// `==` semantics: Nothing equals only Nothing; everything else compares
/// as JSON values.
fn operands_equal(left: &Operand<'_>, right: &Operand<'_>) -> bool {
    match (left, right) {
        (Operand::Nothing, Operand::Nothing) => true,
        (Operand::Nothing, _) | (_, Operand::Nothing) => false,
        (Operand::Value(a), Operand::Value(b)) => values_equal(a, b),
    }
}

/// Ordering: defined only between two concrete values of compatible type.
/// Nothing never participates in an ordering comparison.
fn operands_less(left: &Operand<'_>, right: &Operand<'_>) -> bool {
    match (left, right) {
        (Operand::Value(a), Operand::Value(b)) => values_less(a, b),
        _ => false,
    }
}

/// The equality contribution of `<=` and `>=`: requires both operands to
/// be concrete values, so Nothing orderings stay false.
fn values_both_equal(left: &Operand<'_>, right: &Operand<'_>) -> bool {
    match (left, right) {
        (Operand::Value(a), Operand::Value(b)) => values_equal(a, b),
        _ => false,
    }
}

/// Deep equality over JSON values with numeric coercion.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| values_equal(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => false,
    }
}

/// Strict less-than, defined for number/number and string/string pairs.
fn values_less(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_lt(x, y),
        (Value::String(x), Value::String(y)) => x < y,
        _ => false,
    }
}

/// Numbers compare by mathematical value, independent of representation.
fn number_eq(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn number_lt(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x < y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x < y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x < y,
        _ => false,
    }
}

/// A function call in test position: true only for a logical true result.
fn eval_func_test(call: &FuncExpr, current: &Value, root: &Value) -> bool {
    matches!(
        eval_func_call(call, current, root),
        FuncResult::Logical(true)
    )
}

/// Evaluate a function call: materialize each argument per its parse-time
/// tag, then invoke the function.
pub(crate) fn eval_func_call<'a>(
    call: &'a FuncExpr,
    current: &'a Value,
    root: &'a Value,
) -> FuncResult<'a> {
    let args = call
        .args()
        .iter()
        .zip(call.arg_types())
        .map(|(arg, tag)| materialize_arg(arg, *tag, current, root))
        .collect();
    call.func().call(args)
}

/// Materialize one argument. A query tagged [`ArgType::FilterQuery`]
/// passes its raw node list; a query tagged as a value extracts the single
/// selected value or Nothing. Nested calls evaluate recursively.
fn materialize_arg<'a>(
    arg: &'a FuncArgExpr,
    tag: ArgType,
    current: &'a Value,
    root: &'a Value,
) -> FuncArg<'a> {
    match arg {
        FuncArgExpr::Literal(value) => FuncArg::Value(Cow::Borrowed(value)),
        FuncArgExpr::Query(query) => {
            let nodes = select(query, current, root);
            if tag == ArgType::FilterQuery {
                FuncArg::Nodes(nodes)
            } else {
                match nodes.as_slice() {
                    &[node] => FuncArg::Value(Cow::Borrowed(node)),
                    _ => FuncArg::Nothing,
                }
            }
        }
        FuncArgExpr::Call(nested) => match eval_func_call(nested, current, root) {
            FuncResult::Value(value) => FuncArg::Value(value),
            FuncResult::Nothing => FuncArg::Nothing,
            FuncResult::Logical(b) => FuncArg::Logical(b),
            FuncResult::Nodes(nodes) => FuncArg::Nodes(nodes),
        },
        FuncArgExpr::Logical(or) => FuncArg::Logical(eval_or(or, current, root)),
    }
}
