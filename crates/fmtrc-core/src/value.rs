//! # Value Kinds and Literal Equality
//!
//! Classifies raw JSON values by runtime kind and defines the equality used
//! by literal schemas. Configuration values arrive untyped from whatever
//! collaborator parsed them; this module is the only place that inspects
//! their runtime type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime kind of a raw JSON value.
///
/// `Integer` and `Number` are split so that messages can say "got number 1.5"
/// against an integer option. An integral float such as `100.0` classifies
/// as `Integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number with no fractional part.
    Integer,
    /// Any other finite number.
    Number,
    /// A UTF-8 string.
    String,
    /// An ordered sequence.
    Array,
    /// A keyed mapping.
    Object,
}

impl ValueKind {
    /// Classify a raw value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Integer
                } else if n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0) {
                    Self::Integer
                } else {
                    Self::Number
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether a value of this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural equality between a declared literal and a raw value.
///
/// Strings and booleans compare exactly. Numbers compare by numeric value,
/// so a literal `2` matches a parsed `2.0`. Arrays and objects compare
/// element-wise with the same rule. `false` never equals `null` or an
/// absent value.
pub fn literal_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => {
            if a == b {
                return true;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| literal_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, x)| b.get(k).is_some_and(|y| literal_eq(x, y)))
        }
        _ => expected == actual,
    }
}

/// Render a value for a diagnostic message.
///
/// Strings are quoted, scalars are printed as JSON, and containers are
/// summarised by kind so that a large mapping never floods a message.
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => format!("object with {} key(s)", map.len()),
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(false)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(80)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(-1)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("lf")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_integral_float_is_integer() {
        assert_eq!(ValueKind::of(&json!(100.0)), ValueKind::Integer);
        assert!(ValueKind::of(&json!(100.0)).is_numeric());
    }

    #[test]
    fn test_literal_eq_numbers_by_value() {
        assert!(literal_eq(&json!(2), &json!(2.0)));
        assert!(!literal_eq(&json!(2), &json!(3)));
        assert!(!literal_eq(&json!(2), &json!("2")));
    }

    #[test]
    fn test_literal_eq_false_is_not_null() {
        assert!(literal_eq(&json!(false), &json!(false)));
        assert!(!literal_eq(&json!(false), &json!(null)));
        assert!(!literal_eq(&json!(false), &json!(0)));
    }

    #[test]
    fn test_literal_eq_strings_case_sensitive() {
        assert!(literal_eq(&json!("crlf"), &json!("crlf")));
        assert!(!literal_eq(&json!("crlf"), &json!("CRLF")));
    }

    #[test]
    fn test_literal_eq_nested() {
        assert!(literal_eq(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2]})));
        assert!(!literal_eq(&json!({"a": [1]}), &json!({"a": [1], "b": 2})));
    }

    #[test]
    fn test_render_literal() {
        assert_eq!(render_literal(&json!("es5")), "\"es5\"");
        assert_eq!(render_literal(&json!(false)), "false");
        assert_eq!(render_literal(&json!([1, 2])), "array of 2 item(s)");
        assert_eq!(render_literal(&json!({"a": 1})), "object with 1 key(s)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9-]{0,12}".prop_map(Value::String),
        ]
    }

    proptest! {
        /// Every value equals itself as a literal.
        #[test]
        fn literal_eq_reflexive(value in scalar()) {
            prop_assert!(literal_eq(&value, &value));
        }

        /// Integers and their float form are the same literal and the same kind.
        #[test]
        fn integral_float_matches_integer(n in -1_000_000i64..1_000_000) {
            let int = Value::from(n);
            let float = Value::from(n as f64);
            prop_assert!(literal_eq(&int, &float));
            prop_assert_eq!(ValueKind::of(&float), ValueKind::Integer);
        }

        /// Values of different kinds never compare equal.
        #[test]
        fn different_kinds_never_equal(a in scalar(), b in scalar()) {
            if ValueKind::of(&a) != ValueKind::of(&b) {
                prop_assert!(!literal_eq(&a, &b));
            }
        }
    }
}
