//! Query evaluation
//!
//! The evaluator is total: it never errors, and runtime type mismatches
//! inside filters simply exclude nodes. Evaluation walks the query's
//! segments over a node list, short-circuiting once the list is empty.
//! Descendant segments recurse top-down in pre-order; iteration order over
//! object members is unspecified.

pub(crate) mod filter;
mod located;
mod selectors;

pub(crate) use located::select_located;

use serde_json::Value;

use crate::ast::{PathQuery, Segment, Selector};

/// Evaluate `query` against `current` and `root` and return the selected
/// nodes. Root-anchored (`$`) queries start from `root`; relative (`@`)
/// queries start from `current`.
pub(crate) fn select<'a>(query: &PathQuery, current: &'a Value, root: &'a Value) -> Vec<&'a Value> {
    let start = if query.is_root() { root } else { current };
    let mut nodes = vec![start];
    for segment in query.segments() {
        if nodes.is_empty() {
            break;
        }
        nodes = apply_segment(segment, &nodes, root);
    }
    nodes
}

/// Apply one segment to every node in the input list.
fn apply_segment<'a>(segment: &Segment, nodes: &[&'a Value], root: &'a Value) -> Vec<&'a Value> {
    let mut out = Vec::with_capacity(nodes.len());
    if segment.is_descendant() {
        for node in nodes {
            append_descendant(&mut out, segment, node, root);
        }
    } else {
        for node in nodes {
            append_selectors(&mut out, segment.selectors(), node, root);
        }
    }
    out
}

/// Apply each selector in order to a single node.
fn append_selectors<'a>(
    out: &mut Vec<&'a Value>,
    selectors: &[Selector],
    node: &'a Value,
    root: &'a Value,
) {
    for selector in selectors {
        selectors::append_selector(out, selector, node, root);
    }
}

/// Apply the segment's selectors to `node` and recursively to every
/// object member value and array element beneath it.
fn append_descendant<'a>(
    out: &mut Vec<&'a Value>,
    segment: &Segment,
    node: &'a Value,
    root: &'a Value,
) {
    append_selectors(out, segment.selectors(), node, root);

    match node {
        Value::Object(obj) => {
            for child in obj.values() {
                append_descendant(out, segment, child, root);
            }
        }
        Value::Array(arr) => {
            for child in arr {
                append_descendant(out, segment, child, root);
            }
        }
        _ => {}
    }
}
