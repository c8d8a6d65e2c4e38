//! # Option Catalogue
//!
//! The catalogue is the data half of configuration validation: the name,
//! shape, default, and description of every formatting option. It is
//! deserialized from YAML once and turned into an immutable field map that
//! the schema engine applies to top-level options and to each override's
//! `options` block alike.
//!
//! ## Load-Time Checks
//!
//! - Every declared default must be accepted by its own option schema.
//!   Defaults are inserted without re-validation, so a bad default would
//!   otherwise surface as a non-idempotent result.
//! - A `choice` may not list the same value twice; it would make that value
//!   ambiguous and therefore unusable.
//! - `choice`, `one_of`, and `any_of` must list at least one entry.

use std::collections::BTreeMap;

use fmtrc_core::{literal_eq, render_literal, ValidationErrors};
use fmtrc_schema::{ExtraKeys, FieldSpec, Schema};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// The catalogue shipped with this crate.
const BUILTIN_CATALOG: &str = include_str!("../catalog/options.yaml");

/// Error while loading an option catalogue.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document is not valid catalogue YAML.
    #[error("catalogue parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A choice or union lists no entries.
    #[error("option `{option}` declares an empty {shape}")]
    Empty {
        /// Option name.
        option: String,
        /// Shape type with no entries.
        shape: &'static str,
    },

    /// A choice lists the same value more than once.
    #[error("option `{option}` lists choice {value} more than once")]
    DuplicateChoice {
        /// Option name.
        option: String,
        /// Rendered duplicate value.
        value: String,
    },

    /// A declared default is rejected by the option's own schema.
    #[error("default of option `{option}` is rejected by its schema:\n{errors}")]
    InvalidDefault {
        /// Option name.
        option: String,
        /// Why the default was rejected.
        errors: ValidationErrors,
    },
}

/// Serialized form of a whole catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSpec {
    /// Options by name.
    pub options: BTreeMap<String, OptionSpec>,
}

/// Serialized form of one option.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionSpec {
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Default value. `Some(Value::Null)` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
    /// Accepted shape.
    pub shape: ShapeSpec,
}

/// A shape with optional description.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeSpec {
    #[serde(flatten)]
    pub kind: ShapeKind,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Boolean,
    Integer,
    Number,
    String,
    Literal { value: Value },
    Choice { choices: Vec<ChoiceSpec> },
    Array { items: Box<ShapeSpec> },
    OneOf { candidates: Vec<ShapeSpec> },
    AnyOf { candidates: Vec<ShapeSpec> },
}

/// One permitted value of a `choice` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceSpec {
    pub value: Value,
    #[serde(default)]
    pub description: Option<String>,
}

/// Distinguishes an explicit `null` from an absent key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// An immutable, checked option catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    fields: BTreeMap<String, FieldSpec>,
}

impl Catalog {
    /// Load the catalogue embedded in this crate.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded data is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse and check a catalogue from YAML.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML and the other
    /// variants when a load-time check fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_yaml::from_str(yaml)?;
        Self::from_spec(&spec)
    }

    /// Build and check a catalogue from its serialized form.
    ///
    /// # Errors
    ///
    /// See [`CatalogError`].
    pub fn from_spec(spec: &CatalogSpec) -> Result<Self, CatalogError> {
        let mut fields = BTreeMap::new();
        for (name, option) in &spec.options {
            let mut schema = build_shape(name, &option.shape)?;
            if let Some(description) = &option.description {
                schema = schema.with_description(description.clone());
            }
            if let Some(default) = &option.default {
                schema
                    .validate(default)
                    .map_err(|errors| CatalogError::InvalidDefault {
                        option: name.clone(),
                        errors,
                    })?;
                schema = schema.with_default(default.clone());
            }
            fields.insert(name.clone(), FieldSpec::optional(schema));
        }
        tracing::trace!(options = fields.len(), "option catalogue loaded");
        Ok(Self { fields })
    }

    /// The object schema of the option set, with the given policy for
    /// undeclared keys.
    pub fn options_schema(&self, extra_keys: ExtraKeys) -> Schema {
        Schema::object(self.fields.clone()).with_extra_keys(extra_keys)
    }

    /// Schema of a single option.
    pub fn option(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name).map(|f| &f.schema)
    }

    /// Option names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the catalogue declares no options.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every declared default, keyed by option name.
    pub fn defaults(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|(name, f)| f.schema.default().map(|d| (name.clone(), d.clone())))
            .collect()
    }
}

fn build_shape(option: &str, shape: &ShapeSpec) -> Result<Schema, CatalogError> {
    let schema = match &shape.kind {
        ShapeKind::Boolean => Schema::boolean(),
        ShapeKind::Integer => Schema::integer(),
        ShapeKind::Number => Schema::number(),
        ShapeKind::String => Schema::string(),
        ShapeKind::Literal { value } => Schema::literal(value.clone()),
        ShapeKind::Choice { choices } => {
            non_empty(option, "choice", choices)?;
            for (i, choice) in choices.iter().enumerate() {
                if choices[..i].iter().any(|c| literal_eq(&c.value, &choice.value)) {
                    return Err(CatalogError::DuplicateChoice {
                        option: option.to_string(),
                        value: render_literal(&choice.value),
                    });
                }
            }
            Schema::enumeration_of(
                choices
                    .iter()
                    .map(|c| {
                        let literal = Schema::literal(c.value.clone());
                        match &c.description {
                            Some(d) => literal.with_description(d.clone()),
                            None => literal,
                        }
                    })
                    .collect(),
            )
        }
        ShapeKind::Array { items } => Schema::array_of(build_shape(option, items)?),
        ShapeKind::OneOf { candidates } => {
            non_empty(option, "one_of", candidates)?;
            Schema::one_of(build_candidates(option, candidates)?)
        }
        ShapeKind::AnyOf { candidates } => {
            non_empty(option, "any_of", candidates)?;
            Schema::any_of(build_candidates(option, candidates)?)
        }
    };
    Ok(match &shape.description {
        Some(d) => schema.with_description(d.clone()),
        None => schema,
    })
}

fn build_candidates(option: &str, candidates: &[ShapeSpec]) -> Result<Vec<Schema>, CatalogError> {
    candidates.iter().map(|c| build_shape(option, c)).collect()
}

fn non_empty<T>(option: &str, shape: &'static str, entries: &[T]) -> Result<(), CatalogError> {
    if entries.is_empty() {
        Err(CatalogError::Empty {
            option: option.to_string(),
            shape,
        })
    } else {
        Ok(())
    }
}
