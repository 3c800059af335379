//! Located evaluation: node selection with normalized-path tracking
//!
//! Mirrors the plain evaluator but threads a [`NormalizedPath`] alongside
//! each node. Extension always builds a fresh path, so results diverging
//! at a multi-match selector never alias each other's paths.

use serde_json::Value;

use super::filter::eval_filter;
use super::selectors::{normalize_index, slice_indices};
use crate::ast::{PathQuery, Segment, Selector};
use crate::path::{LocatedNode, NormalizedPath};

/// Evaluate `query` against `doc`, pairing every selected node with its
/// normalized path. Filter sub-queries evaluate without location tracking;
/// only the main walk contributes path elements.
pub(crate) fn select_located<'a>(query: &PathQuery, doc: &'a Value) -> Vec<LocatedNode<'a>> {
    let mut nodes = vec![LocatedNode {
        value: doc,
        path: NormalizedPath::root(),
    }];
    for segment in query.segments() {
        if nodes.is_empty() {
            break;
        }
        nodes = apply_segment(segment, nodes, doc);
    }
    nodes
}

fn apply_segment<'a>(
    segment: &Segment,
    nodes: Vec<LocatedNode<'a>>,
    root: &'a Value,
) -> Vec<LocatedNode<'a>> {
    let mut out = Vec::with_capacity(nodes.len());
    if segment.is_descendant() {
        for node in &nodes {
            append_descendant(&mut out, segment, node.value, &node.path, root);
        }
    } else {
        for node in &nodes {
            append_selectors(&mut out, segment.selectors(), node.value, &node.path, root);
        }
    }
    out
}

fn append_selectors<'a>(
    out: &mut Vec<LocatedNode<'a>>,
    selectors: &[Selector],
    node: &'a Value,
    path: &NormalizedPath,
    root: &'a Value,
) {
    for selector in selectors {
        append_selector(out, selector, node, path, root);
    }
}

fn append_descendant<'a>(
    out: &mut Vec<LocatedNode<'a>>,
    segment: &Segment,
    node: &'a Value,
    path: &NormalizedPath,
    root: &'a Value,
) {
    append_selectors(out, segment.selectors(), node, path, root);

    match node {
        Value::Object(obj) => {
            for (key, child) in obj {
                append_descendant(out, segment, child, &path.child_name(key), root);
            }
        }
        Value::Array(arr) => {
            for (index, child) in arr.iter().enumerate() {
                append_descendant(out, segment, child, &path.child_index(index), root);
            }
        }
        _ => {}
    }
}

fn append_selector<'a>(
    out: &mut Vec<LocatedNode<'a>>,
    selector: &Selector,
    node: &'a Value,
    path: &NormalizedPath,
    root: &'a Value,
) {
    match selector {
        Selector::Name(name) => {
            if let Value::Object(obj) = node {
                if let Some(value) = obj.get(name) {
                    out.push(LocatedNode {
                        value,
                        path: path.child_name(name),
                    });
                }
            }
        }
        Selector::Index(index) => {
            if let Value::Array(arr) = node {
                if let Some(i) = normalize_index(*index, arr.len()) {
                    out.push(LocatedNode {
                        value: &arr[i],
                        path: path.child_index(i),
                    });
                }
            }
        }
        Selector::Slice(bounds) => {
            if let Value::Array(arr) = node {
                for i in slice_indices(bounds, arr.len()) {
                    out.push(LocatedNode {
                        value: &arr[i],
                        path: path.child_index(i),
                    });
                }
            }
        }
        Selector::Wildcard => match node {
            Value::Object(obj) => {
                for (key, value) in obj {
                    out.push(LocatedNode {
                        value,
                        path: path.child_name(key),
                    });
                }
            }
            Value::Array(arr) => {
                for (index, value) in arr.iter().enumerate() {
                    out.push(LocatedNode {
                        value,
                        path: path.child_index(index),
                    });
                }
            }
            _ => {}
        },
        Selector::Filter(expr) => match node {
            Value::Object(obj) => {
                for (key, value) in obj {
                    if eval_filter(expr, value, root) {
                        out.push(LocatedNode {
                            value,
                            path: path.child_name(key),
                        });
                    }
                }
            }
            Value::Array(arr) => {
                for (index, value) in arr.iter().enumerate() {
                    if eval_filter(expr, value, root) {
                        out.push(LocatedNode {
                            value,
                            path: path.child_index(index),
                        });
                    }
                }
            }
            _ => {}
        },
    }
}
