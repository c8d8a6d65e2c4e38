//! # fmtrc-schema: Schema Validation Engine
//!
//! Validates untyped JSON values against an immutable [`Schema`] tree and
//! returns either the accepted value with defaults applied or the complete
//! tree of [`ValidationError`](fmtrc_core::ValidationError)s.
//!
//! ## Combinators
//!
//! - Leaves: [`Schema::literal`], [`Schema::string`], [`Schema::number`],
//!   [`Schema::integer`], [`Schema::boolean`].
//! - [`Schema::enumeration`]: exactly one of a fixed set of literals.
//! - [`Schema::array_of`]: every element must match the item schema.
//! - [`Schema::one_of`]: exactly one candidate must accept. A value that two
//!   candidates accept is rejected as ambiguous.
//! - [`Schema::any_of`]: the first accepting candidate wins.
//! - [`Schema::object`]: declared fields with defaults and an
//!   [`ExtraKeys`] policy.
//! - [`Schema::intersection`]: both sides must accept; outputs are merged.
//!
//! ## Crate Policy
//!
//! - Depends only on `fmtrc-core` internally.
//! - Schemas are built once and never mutated; they are `Send + Sync`.
//! - Every candidate and sibling field is evaluated; nothing short-circuits.

mod intersection;
mod object;
pub mod schema;
mod union;
pub mod validate;

pub use schema::{ExtraKeys, FieldSpec, PrimitiveKind, Schema, SchemaKind};
pub use validate::Outcome;
