//! # Top-Level Configuration Validation
//!
//! The accepted top-level shape is
//!
//! ```text
//! exactly one of:
//!   intersection(options, { overrides?: [override] })   -- unknown keys rejected
//!   string                                              -- shared config reference
//! ```
//!
//! where each `override` is a strict mapping of `files` (required),
//! `excludeFiles`, and `options`, the last validated against the same
//! catalogue as the top level but with unknown keys rejected.

use fmtrc_core::{ErrorKind, FieldPath, ValidationError, ValidationErrors, ValueKind};
use fmtrc_schema::{ExtraKeys, FieldSpec, Schema};
use serde_json::{Map, Value};

use crate::catalog::{Catalog, CatalogError};

/// Validates raw configuration values against a catalogue.
///
/// Built once; `Send + Sync` and safe to share across threads.
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    schema: Schema,
}

impl ConfigValidator {
    /// Build a validator for `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            schema: config_schema(catalog),
        }
    }

    /// Build a validator for the built-in catalogue.
    ///
    /// # Errors
    ///
    /// Propagates [`Catalog::builtin`] failures.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(&Catalog::builtin()?))
    }

    /// The complete top-level schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a raw configuration value.
    ///
    /// # Errors
    ///
    /// Returns the complete error tree when the value is rejected. A value
    /// that is neither a mapping nor a string is rejected through the
    /// top-level union, with one child per shape tried.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedConfig, ValidationErrors> {
        match self.schema.validate(raw) {
            Ok(accepted) => {
                tracing::debug!(kind = %ValueKind::of(&accepted), "configuration accepted");
                ValidatedConfig::try_from(accepted).map_err(|other| {
                    ValidationErrors::new(vec![ValidationError::new(
                        FieldPath::root(),
                        ErrorKind::TypeMismatch,
                        format!("expected object or string, got {}", ValueKind::of(&other)),
                    )])
                })
            }
            Err(errors) => {
                tracing::debug!(
                    errors = errors.len(),
                    leaves = errors.leaves().count(),
                    "configuration rejected"
                );
                Err(errors)
            }
        }
    }
}

/// An accepted configuration with every omitted option defaulted.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedConfig {
    /// An inline mapping of options, possibly with `overrides`.
    Inline(Map<String, Value>),
    /// A reference to a shared configuration by name.
    Reference(String),
}

impl TryFrom<Value> for ValidatedConfig {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::Inline(map)),
            Value::String(name) => Ok(Self::Reference(name)),
            other => Err(other),
        }
    }
}

impl ValidatedConfig {
    /// The inline option mapping, if this is not a reference.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Inline(map) => Some(map),
            Self::Reference(_) => None,
        }
    }

    /// The referenced configuration name, if this is a reference.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Inline(_) => None,
            Self::Reference(name) => Some(name),
        }
    }

    /// A single top-level option value.
    pub fn get(&self, option: &str) -> Option<&Value> {
        self.options().and_then(|map| map.get(option))
    }

    /// The override entries, in declaration order. Empty for references and
    /// for mappings without `overrides`.
    pub fn overrides(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.get("overrides")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    /// The accepted value as a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Self::Inline(map) => Value::Object(map),
            Self::Reference(name) => Value::String(name),
        }
    }
}

/// The complete top-level schema for `catalog`.
pub fn config_schema(catalog: &Catalog) -> Schema {
    let overrides = Schema::object([(
        "overrides",
        FieldSpec::optional(
            Schema::array_of(override_schema(catalog))
                .with_description("Provide a list of patterns to override prettier configuration."),
        ),
    )]);
    let inline = Schema::intersection(catalog.options_schema(ExtraKeys::Permissive), overrides)
        .with_extra_keys(ExtraKeys::Reject);
    let reference = Schema::string().with_description("Name of a shared configuration to extend.");
    Schema::one_of(vec![inline, reference])
}

/// Schema of one entry of the `overrides` list.
pub fn override_schema(catalog: &Catalog) -> Schema {
    Schema::object([
        (
            "files",
            FieldSpec::required(file_patterns().with_description("Include these files in this override.")),
        ),
        (
            "excludeFiles",
            FieldSpec::optional(
                file_patterns().with_description("Exclude these files from this override."),
            ),
        ),
        (
            "options",
            FieldSpec::optional(catalog.options_schema(ExtraKeys::Reject)),
        ),
    ])
    .with_extra_keys(ExtraKeys::Reject)
}

/// A single glob or a list of globs.
fn file_patterns() -> Schema {
    Schema::one_of(vec![Schema::string(), Schema::array_of(Schema::string())])
}
