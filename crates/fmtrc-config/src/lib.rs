//! # fmtrc-config: Formatter Configuration Validation
//!
//! Confirms that a user-supplied configuration value is well-formed before
//! it drives formatting. A configuration is either:
//!
//! - an inline mapping of recognised options, optionally with an
//!   `overrides` list re-specifying options for files matching a pattern, or
//! - a bare string naming a shared configuration to extend.
//!
//! ## Option Catalogue (`catalog`)
//!
//! The [`catalog`] module loads the option catalogue, static YAML data that
//! declares each option's shape, default, and description. The engine is
//! generic over it; [`Catalog::builtin`] embeds the standard one.
//!
//! ## Top-Level Validation (`config`)
//!
//! [`ConfigValidator::validate`] applies the catalogue and returns a
//! [`ValidatedConfig`] with every omitted option defaulted, or the complete
//! error tree.
//!
//! ## Crate Policy
//!
//! - No file, network, or environment access. Loading the raw value is the
//!   caller's concern.
//! - No cross-option semantic checks and no type coercion.

pub mod catalog;
pub mod config;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigValidator, ValidatedConfig};
