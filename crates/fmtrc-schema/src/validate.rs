//! # Validation Dispatch and Leaf Validators
//!
//! Routes a value to the validator for its schema kind and implements the
//! leaf checks: literal, primitive, and array. Unions live in `union`,
//! objects in `object`, intersections in `intersection`.
//!
//! A validator never substitutes a default for a value that is present and
//! rejected. Defaults are applied only by the enclosing object.

use fmtrc_core::{
    literal_eq, render_literal, ErrorKind, FieldPath, ValidationError, ValidationErrors, ValueKind,
};
use serde_json::Value;

use crate::schema::{PrimitiveKind, Schema, SchemaKind};
use crate::{intersection, object, union};

/// Result of validating one value at one path: the accepted value with
/// defaults applied, or every error found below that path.
pub type Outcome = Result<Value, Vec<ValidationError>>;

impl Schema {
    /// Validate `value` from the root.
    ///
    /// # Errors
    ///
    /// Returns the complete error tree if any part of `value` is rejected.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationErrors> {
        self.validate_at(value, &FieldPath::root())
            .map_err(ValidationErrors::new)
    }

    /// Whether `value` is accepted.
    pub fn accepts(&self, value: &Value) -> bool {
        self.validate_at(value, &FieldPath::root()).is_ok()
    }

    /// Validate `value` found at `path`. Error paths are reported relative to
    /// the same root as `path`.
    pub fn validate_at(&self, value: &Value, path: &FieldPath) -> Outcome {
        match self.kind() {
            SchemaKind::Literal(expected) => validate_literal(expected, value, path),
            SchemaKind::Primitive(kind) => validate_primitive(*kind, value, path),
            SchemaKind::ArrayOf(item) => validate_array(item, value, path),
            SchemaKind::Enum(literals) => union::validate_enum(literals, value, path),
            SchemaKind::UnionExactlyOne(candidates) => {
                union::validate_exactly_one(candidates, value, path)
            }
            SchemaKind::AnyOf(candidates) => union::validate_first_match(candidates, value, path),
            SchemaKind::Intersection {
                left,
                right,
                extra_keys,
            } => intersection::validate_intersection(left, right, *extra_keys, value, path),
            SchemaKind::Object { fields, extra_keys } => {
                object::validate_object(fields, *extra_keys, value, path)
            }
        }
    }
}

/// Builds a `TypeMismatch` error for `value` at `path`.
pub(crate) fn type_mismatch(path: &FieldPath, expected: &str, value: &Value) -> ValidationError {
    let actual = ValueKind::of(value);
    let message = if actual.is_numeric() || actual == ValueKind::Boolean {
        format!("expected {expected}, got {actual} {value}")
    } else {
        format!("expected {expected}, got {actual}")
    };
    ValidationError::new(path.clone(), ErrorKind::TypeMismatch, message)
}

fn validate_literal(expected: &Value, value: &Value, path: &FieldPath) -> Outcome {
    if literal_eq(expected, value) {
        Ok(value.clone())
    } else {
        Err(vec![ValidationError::new(
            path.clone(),
            ErrorKind::LiteralMismatch,
            format!(
                "expected {}, got {}",
                render_literal(expected),
                render_literal(value)
            ),
        )])
    }
}

fn validate_primitive(kind: PrimitiveKind, value: &Value, path: &FieldPath) -> Outcome {
    let actual = ValueKind::of(value);
    let accepted = match kind {
        PrimitiveKind::String => actual == ValueKind::String,
        PrimitiveKind::Number => actual.is_numeric(),
        PrimitiveKind::Integer => actual == ValueKind::Integer,
        PrimitiveKind::Boolean => actual == ValueKind::Boolean,
    };
    if accepted {
        Ok(value.clone())
    } else {
        Err(vec![type_mismatch(path, kind.as_str(), value)])
    }
}

fn validate_array(item: &Schema, value: &Value, path: &FieldPath) -> Outcome {
    let Some(elements) = value.as_array() else {
        return Err(vec![type_mismatch(path, "array", value)]);
    };

    let mut output = Vec::with_capacity(elements.len());
    let mut errors = Vec::new();
    for (i, element) in elements.iter().enumerate() {
        match item.validate_at(element, &path.child(i)) {
            Ok(v) => output.push(v),
            Err(e) => errors.extend(e),
        }
    }

    if errors.is_empty() {
        Ok(Value::Array(output))
    } else {
        Err(errors)
    }
}
