//! Per-selector application
//!
//! The slice machinery follows RFC 9535 §2.3.4 exactly: defaults chosen by
//! step sign, a single `i += len` normalization for negative components,
//! and clamping with a floor of −1 for negative steps.

use serde_json::Value;

use super::filter::eval_filter;
use crate::ast::{Selector, SliceBounds};

/// Apply a single selector to `node`, appending matches to `out`.
pub(crate) fn append_selector<'a>(
    out: &mut Vec<&'a Value>,
    selector: &Selector,
    node: &'a Value,
    root: &'a Value,
) {
    match selector {
        Selector::Name(name) => {
            if let Value::Object(obj) = node {
                if let Some(value) = obj.get(name) {
                    out.push(value);
                }
            }
        }
        Selector::Index(index) => {
            if let Value::Array(arr) = node {
                if let Some(i) = normalize_index(*index, arr.len()) {
                    out.push(&arr[i]);
                }
            }
        }
        Selector::Slice(bounds) => {
            if let Value::Array(arr) = node {
                for i in slice_indices(bounds, arr.len()) {
                    out.push(&arr[i]);
                }
            }
        }
        Selector::Wildcard => match node {
            Value::Object(obj) => out.extend(obj.values()),
            Value::Array(arr) => out.extend(arr.iter()),
            _ => {}
        },
        Selector::Filter(expr) => match node {
            Value::Object(obj) => {
                for value in obj.values() {
                    if eval_filter(expr, value, root) {
                        out.push(value);
                    }
                }
            }
            Value::Array(arr) => {
                for value in arr {
                    if eval_filter(expr, value, root) {
                        out.push(value);
                    }
                }
            }
            _ => {}
        },
    }
}

/// Normalize a possibly-negative index against an array length. Returns
/// `None` when the index falls outside the array.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if index < 0 { index + len } else { index };
    if (0..len).contains(&idx) {
        Some(idx as usize)
    } else {
        None
    }
}

/// The array indices selected by a slice, in selection order.
pub(crate) fn slice_indices(bounds: &SliceBounds, len: usize) -> Vec<usize> {
    let len = len as i64;
    let step = bounds.step.unwrap_or(1);
    if step == 0 || len == 0 {
        return Vec::new();
    }

    let (default_start, default_end) = if step > 0 { (0, len) } else { (len - 1, -len - 1) };
    let mut start = bounds.start.unwrap_or(default_start);
    let mut end = bounds.end.unwrap_or(default_end);
    if start < 0 {
        start += len;
    }
    if end < 0 {
        end += len;
    }

    let mut indices = Vec::new();
    if step > 0 {
        let lower = start.clamp(0, len);
        let upper = end.clamp(0, len);
        let mut i = lower;
        while i < upper {
            indices.push(i as usize);
            i += step;
        }
    } else {
        let upper = start.clamp(-1, len - 1);
        let lower = end.clamp(-1, len - 1);
        let mut i = upper;
        while i > lower {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}
