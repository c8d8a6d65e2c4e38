//! # Schema Definitions
//!
//! A [`Schema`] is an immutable description of an accepted value shape plus
//! optional `default` and `description` metadata. Neither piece of metadata
//! affects acceptance: a default is only consulted by an enclosing object
//! when the field is absent.

use std::collections::{BTreeMap, BTreeSet};

use fmtrc_core::render_literal;
use serde_json::Value;

/// Runtime kinds checked by [`SchemaKind::Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Any string.
    String,
    /// Any finite number.
    Number,
    /// A number with no fractional part.
    Integer,
    /// `true` or `false`.
    Boolean,
}

impl PrimitiveKind {
    /// Returns the name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an object-shaped schema does with keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtraKeys {
    /// Undeclared keys are accepted and passed through unchanged.
    #[default]
    Permissive,
    /// Every undeclared key is an `UnknownKey` error.
    Reject,
}

/// A declared field of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Schema the field value must satisfy.
    pub schema: Schema,
    /// Whether absence without a default is an error.
    pub required: bool,
}

impl FieldSpec {
    /// A field that must be present unless its schema declares a default.
    pub fn required(schema: Schema) -> Self {
        Self {
            schema,
            required: true,
        }
    }

    /// A field that may be absent.
    pub fn optional(schema: Schema) -> Self {
        Self {
            schema,
            required: false,
        }
    }
}

/// The shape a [`Schema`] node accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Exactly this value.
    Literal(Value),
    /// Exactly one of these literal schemas.
    Enum(Vec<Schema>),
    /// Any value of this runtime kind.
    Primitive(PrimitiveKind),
    /// A sequence whose every element matches the item schema.
    ArrayOf(Box<Schema>),
    /// Exactly one candidate must accept.
    UnionExactlyOne(Vec<Schema>),
    /// The first accepting candidate wins.
    AnyOf(Vec<Schema>),
    /// Both sides must accept the same value.
    Intersection {
        left: Box<Schema>,
        right: Box<Schema>,
        /// Applied to keys declared by neither side.
        extra_keys: ExtraKeys,
    },
    /// A mapping of declared fields.
    Object {
        fields: BTreeMap<String, FieldSpec>,
        extra_keys: ExtraKeys,
    },
}

/// An immutable node of a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    kind: SchemaKind,
    default: Option<Value>,
    description: Option<String>,
}

impl From<SchemaKind> for Schema {
    fn from(kind: SchemaKind) -> Self {
        Self {
            kind,
            default: None,
            description: None,
        }
    }
}

impl Schema {
    /// Accepts only values structurally equal to `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        SchemaKind::Literal(value.into()).into()
    }

    /// Accepts exactly one of the given literal values.
    pub fn enumeration<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::enumeration_of(values.into_iter().map(Self::literal).collect())
    }

    /// Accepts exactly one of the given literal schemas, keeping their
    /// per-value descriptions.
    pub fn enumeration_of(literals: Vec<Schema>) -> Self {
        SchemaKind::Enum(literals).into()
    }

    /// Any string.
    pub fn string() -> Self {
        SchemaKind::Primitive(PrimitiveKind::String).into()
    }

    /// Any finite number.
    pub fn number() -> Self {
        SchemaKind::Primitive(PrimitiveKind::Number).into()
    }

    /// Any number without a fractional part.
    pub fn integer() -> Self {
        SchemaKind::Primitive(PrimitiveKind::Integer).into()
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        SchemaKind::Primitive(PrimitiveKind::Boolean).into()
    }

    /// A sequence of `item`.
    pub fn array_of(item: Schema) -> Self {
        SchemaKind::ArrayOf(Box::new(item)).into()
    }

    /// Exactly one of `candidates` must accept.
    pub fn one_of(candidates: Vec<Schema>) -> Self {
        SchemaKind::UnionExactlyOne(candidates).into()
    }

    /// The first of `candidates` that accepts wins.
    pub fn any_of(candidates: Vec<Schema>) -> Self {
        SchemaKind::AnyOf(candidates).into()
    }

    /// Both `left` and `right` must accept. Keys declared by neither side
    /// are tolerated until [`Schema::with_extra_keys`] says otherwise.
    pub fn intersection(left: Schema, right: Schema) -> Self {
        SchemaKind::Intersection {
            left: Box::new(left),
            right: Box::new(right),
            extra_keys: ExtraKeys::Permissive,
        }
        .into()
    }

    /// A permissive mapping of declared fields.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, FieldSpec)>) -> Self {
        SchemaKind::Object {
            fields: fields.into_iter().map(|(k, f)| (k.into(), f)).collect(),
            extra_keys: ExtraKeys::Permissive,
        }
        .into()
    }

    /// Attach a default, used when an enclosing object finds the field absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the undeclared-key policy of an object or intersection.
    /// Other kinds have no keys and are returned unchanged.
    pub fn with_extra_keys(mut self, policy: ExtraKeys) -> Self {
        match &mut self.kind {
            SchemaKind::Object { extra_keys, .. } | SchemaKind::Intersection { extra_keys, .. } => {
                *extra_keys = policy;
            }
            _ => {}
        }
        self
    }

    /// The shape this node accepts.
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// The declared default, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The declared description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Keys this schema declares when applied to a mapping.
    ///
    /// Objects declare their field names; an intersection declares the keys
    /// of both sides. Every other kind declares none.
    pub fn declared_keys(&self) -> BTreeSet<&str> {
        match &self.kind {
            SchemaKind::Object { fields, .. } => fields.keys().map(String::as_str).collect(),
            SchemaKind::Intersection { left, right, .. } => {
                let mut keys = left.declared_keys();
                keys.extend(right.declared_keys());
                keys
            }
            _ => BTreeSet::new(),
        }
    }

    /// Short shape summary for diagnostics, e.g. `array of string`.
    pub fn describe(&self) -> String {
        match &self.kind {
            SchemaKind::Literal(value) => format!("literal {}", render_literal(value)),
            SchemaKind::Enum(literals) => format!("one of {}", permitted_list(literals)),
            SchemaKind::Primitive(kind) => kind.to_string(),
            SchemaKind::ArrayOf(item) => format!("array of {}", item.describe()),
            SchemaKind::UnionExactlyOne(candidates) => {
                format!("exactly one of {} schemas", candidates.len())
            }
            SchemaKind::AnyOf(candidates) => format!("any of {} schemas", candidates.len()),
            SchemaKind::Intersection { .. } => "intersection of 2 schemas".to_string(),
            SchemaKind::Object { fields, .. } => format!("object with {} field(s)", fields.len()),
        }
    }
}

/// Renders the literal values of an enumeration, e.g. `"lf", "crlf"`.
pub(crate) fn permitted_list(literals: &[Schema]) -> String {
    literals
        .iter()
        .map(|s| match s.kind() {
            SchemaKind::Literal(value) => render_literal(value),
            _ => s.describe(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
