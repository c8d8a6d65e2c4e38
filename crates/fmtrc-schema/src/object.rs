//! # Object Validator
//!
//! Validates a mapping against declared fields:
//!
//! 1. Under [`ExtraKeys::Reject`], every undeclared key is one `UnknownKey`
//!    error. All of them are reported, regardless of field outcomes.
//! 2. Each declared field is validated if present. If absent, its schema's
//!    default is inserted as-is; defaults are not re-validated. A required
//!    field with no default is a `MissingRequiredField` error.
//! 3. The object accepts iff no error was recorded.
//!
//! Under [`ExtraKeys::Permissive`] undeclared keys are copied to the output
//! unchanged.

use std::collections::BTreeMap;

use fmtrc_core::{ErrorKind, FieldPath, ValidationError};
use serde_json::{Map, Value};

use crate::schema::{ExtraKeys, FieldSpec};
use crate::validate::{type_mismatch, Outcome};

pub(crate) fn validate_object(
    fields: &BTreeMap<String, FieldSpec>,
    extra_keys: ExtraKeys,
    value: &Value,
    path: &FieldPath,
) -> Outcome {
    let Some(map) = value.as_object() else {
        return Err(vec![type_mismatch(path, "object", value)]);
    };

    let mut errors = Vec::new();
    let mut output = Map::new();

    match extra_keys {
        ExtraKeys::Reject => {
            errors.extend(unknown_keys(map, |key| fields.contains_key(key), path));
        }
        ExtraKeys::Permissive => {
            for (key, v) in map.iter().filter(|(key, _)| !fields.contains_key(*key)) {
                output.insert(key.clone(), v.clone());
            }
        }
    }

    for (name, spec) in fields {
        let field_path = path.child(name.as_str());
        match map.get(name) {
            Some(v) => match spec.schema.validate_at(v, &field_path) {
                Ok(accepted) => {
                    output.insert(name.clone(), accepted);
                }
                Err(e) => errors.extend(e),
            },
            None => {
                if let Some(default) = spec.schema.default() {
                    output.insert(name.clone(), default.clone());
                } else if spec.required {
                    errors.push(ValidationError::new(
                        field_path,
                        ErrorKind::MissingRequiredField,
                        format!("required field `{name}` is missing"),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(Value::Object(output))
    } else {
        Err(errors)
    }
}

/// One `UnknownKey` error per key of `map` that `is_known` rejects, in key
/// order.
pub(crate) fn unknown_keys(
    map: &Map<String, Value>,
    is_known: impl Fn(&str) -> bool,
    path: &FieldPath,
) -> Vec<ValidationError> {
    map.keys()
        .filter(|key| !is_known(key.as_str()))
        .map(|key| {
            ValidationError::new(
                path.child(key.as_str()),
                ErrorKind::UnknownKey,
                format!("unrecognized key `{key}`"),
            )
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::schema::Schema;
    use proptest::prelude::*;

    fn strict() -> Schema {
        Schema::object([
            ("files", FieldSpec::optional(Schema::string())),
            ("excludeFiles", FieldSpec::optional(Schema::string())),
        ])
        .with_extra_keys(ExtraKeys::Reject)
    }

    proptest! {
        /// Every undeclared key is reported, each exactly once, by name.
        #[test]
        fn every_unknown_key_reported(keys in prop::collection::btree_set("[a-z]{1,8}", 1..8)) {
            let map: Map<String, Value> = keys
                .iter()
                .map(|k| (format!("x_{k}"), Value::Bool(true)))
                .collect();
            let errors = strict().validate(&Value::Object(map)).unwrap_err();
            let reported: Vec<String> = errors
                .leaves()
                .filter(|e| e.kind == ErrorKind::UnknownKey)
                .map(|e| e.path.to_string())
                .collect();
            let expected: Vec<String> = keys.iter().map(|k| format!("x_{k}")).collect();
            prop_assert_eq!(reported, expected);
        }

        /// Validation is deterministic and idempotent for accepted mappings.
        #[test]
        fn object_validation_idempotent(files in "[a-z*./]{0,12}") {
            let value = serde_json::json!({ "files": files });
            let once = strict().validate(&value).unwrap();
            let twice = strict().validate(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
