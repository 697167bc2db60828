use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// How the entities of a tabularized process are ordered.
///
/// Array indices are positions in the resulting lists. The order is stable for the lifetime of
/// a tabular process, but is not guaranteed to agree across instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityOrdering {
    /// Sort by the canonical serialization of the entities, see [`canonical_cmp`].
    ///
    /// Falls back to discovery order if some entity cannot be serialized.
    #[default]
    Canonical,

    /// Keep the order in which the reachability analysis discovered the entities.
    Discovery,
}

impl EntityOrdering {
    /// Reorders `items`, which are in discovery order.
    pub fn apply<T: Serialize>(&self, items: Vec<T>) -> Vec<T> {
        match self {
            Self::Discovery => items,
            Self::Canonical => {
                let keys = match items
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()
                {
                    Ok(keys) => keys,
                    Err(e) => {
                        warn!("Entities have no canonical form ({}); keeping discovery order", e);
                        return items;
                    }
                };
                let mut keyed: Vec<(Value, T)> = keys.into_iter().zip(items).collect();
                keyed.sort_by(|(a, _), (b, _)| canonical_cmp(a, b));
                keyed.into_iter().map(|(_, item)| item).collect()
            }
        }
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order on serialized entities.
///
/// Values of different kinds are ranked null, bool, number, string, array, object. Numbers
/// compare numerically, strings lexicographically. Arrays compare element-wise, then by
/// length. Objects compare the same way on their `(key, value)` entries, which
/// `serde_json` keeps sorted by key, so field order of the original value does not matter.
pub fn canonical_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.total_cmp(&y)
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (x, y) in x.iter().zip(y) {
                match canonical_cmp(x, y) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            for ((kx, vx), (ky, vy)) in x.iter().zip(y) {
                match kx.cmp(ky).then_with(|| canonical_cmp(vx, vy)) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            x.len().cmp(&y.len())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
