//! # Intersection Combinator
//!
//! Both sides validate the same raw value independently and both must
//! accept. Two mapping outputs are merged key by key; on a collision the
//! right side wins, unless the key is declared only by the left side, in
//! which case the right side merely passed it through and the left side's
//! validated value is kept.
//!
//! With [`ExtraKeys::Reject`] the intersection also rejects every key that
//! neither side declares. This lets two permissive facets of one mapping
//! jointly reject misspelled keys without knowing about each other.

use fmtrc_core::FieldPath;
use serde_json::Value;

use crate::object::unknown_keys;
use crate::schema::{ExtraKeys, Schema};
use crate::validate::Outcome;

pub(crate) fn validate_intersection(
    left: &Schema,
    right: &Schema,
    extra_keys: ExtraKeys,
    value: &Value,
    path: &FieldPath,
) -> Outcome {
    let left_keys = left.declared_keys();
    let right_keys = right.declared_keys();

    let mut errors = Vec::new();
    if let (ExtraKeys::Reject, Some(map)) = (extra_keys, value.as_object()) {
        errors.extend(unknown_keys(
            map,
            |key| left_keys.contains(key) || right_keys.contains(key),
            path,
        ));
    }

    let left_out = left.validate_at(value, path);
    let right_out = right.validate_at(value, path);

    match (left_out, right_out) {
        (Ok(l), Ok(r)) if errors.is_empty() => Ok(merge(l, r, |key| {
            right_keys.contains(key) || !left_keys.contains(key)
        })),
        (l, r) => {
            errors.extend(l.err().unwrap_or_default());
            errors.extend(r.err().unwrap_or_default());
            Err(errors)
        }
    }
}

/// Merge two accepted outputs. `right_wins` decides collisions for mapping
/// outputs; for any other shape both sides accepted the same unmodified
/// value and the right output is returned.
fn merge(left: Value, right: Value, right_wins: impl Fn(&str) -> bool) -> Value {
    match (left, right) {
        (Value::Object(mut merged), Value::Object(right)) => {
            for (key, v) in right {
                if !merged.contains_key(&key) || right_wins(key.as_str()) {
                    merged.insert(key, v);
                }
            }
            Value::Object(merged)
        }
        (_, right) => right,
    }
}
