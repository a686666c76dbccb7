use std::cmp::Ordering;

use itertools::Itertools;
use serde_json::Value;

use crate::core::domain::Comparison;

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total ordering over JSON values: null < bool < number < string < array <
/// object, with element-wise comparison inside arrays and key-then-value
/// comparison inside objects.
pub fn value_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ord = value_cmp(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            let mut xs: Vec<(&String, &Value)> = x.iter().collect();
            let mut ys: Vec<(&String, &Value)> = y.iter().collect();
            xs.sort_by(|a, b| a.0.cmp(b.0));
            ys.sort_by(|a, b| a.0.cmp(b.0));
            for (a, b) in xs.iter().zip(ys.iter()) {
                let ord = a.0.cmp(b.0).then_with(|| value_cmp(a.1, b.1));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Compares a solution's output against the expected answer under the suite's
/// equality policy. `Unordered` sorts local clones of both sequences before
/// structural comparison; the caller's slices are never reordered.
pub fn sequences_match(actual: &[Value], expected: &[Value], comparison: Comparison) -> bool {
    match comparison {
        Comparison::Exact => actual == expected,
        Comparison::Unordered => {
            if actual.len() != expected.len() {
                return false;
            }
            let actual: Vec<Value> = actual.iter().cloned().sorted_by(value_cmp).collect();
            let expected: Vec<Value> = expected.iter().cloned().sorted_by(value_cmp).collect();
            actual == expected
        }
    }
}
