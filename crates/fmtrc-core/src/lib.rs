//! # fmtrc-core: Foundational Types for Configuration Validation
//!
//! This crate is the leaf of the fmtrc workspace. It defines the vocabulary
//! shared by the schema engine and the option catalogue: how a raw JSON value
//! is classified, how two literals are compared, how a location inside the
//! input is addressed, and how a rejection is reported.
//!
//! ## Key Design Principles
//!
//! 1. **Errors are a tree, not a string.** A [`ValidationError`] carries its
//!    [`FieldPath`], an exhaustive [`ErrorKind`], a message, and the errors of
//!    every union candidate that was tried.
//!
//! 2. **No coercion.** [`ValueKind`] classifies a value as it is; nothing in
//!    this crate converts one kind into another.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fmtrc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ErrorKind, ValidationError, ValidationErrors};
pub use path::{FieldPath, PathSegment};
pub use value::{literal_eq, render_literal, ValueKind};
