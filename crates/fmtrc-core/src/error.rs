//! # Error Types: Structured Validation Error Tree
//!
//! Every rejection produced by the schema engine is a [`ValidationError`]:
//! the path of the offending value, an exhaustive [`ErrorKind`], a
//! human-readable message, and child errors. Union failures attach one
//! [`ErrorKind::CandidateRejected`] child per candidate that was tried, in
//! candidate order, so the caller can see why each branch failed.
//!
//! ## Design
//!
//! - Errors are collected, never used for control flow. Sibling fields and
//!   union candidates are always evaluated to completion.
//! - The engine never truncates the tree. The caller decides whether to
//!   report the first leaf or all of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::FieldPath;

/// Classification of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong runtime kind for a primitive, array, or object schema.
    TypeMismatch,
    /// Value is not in the permitted literal set.
    LiteralMismatch,
    /// More than one candidate of an exactly-one union accepted the value.
    UnionAmbiguous,
    /// No candidate of a union accepted the value.
    UnionNoMatch,
    /// Key rejected by a strict object schema.
    UnknownKey,
    /// Required field absent and no default declared.
    MissingRequiredField,
    /// Groups the errors of one rejected union candidate.
    CandidateRejected,
}

impl ErrorKind {
    /// Returns the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::LiteralMismatch => "literal_mismatch",
            Self::UnionAmbiguous => "union_ambiguous",
            Self::UnionNoMatch => "union_no_match",
            Self::UnknownKey => "unknown_key",
            Self::MissingRequiredField => "missing_required_field",
            Self::CandidateRejected => "candidate_rejected",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node of the validation error tree.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Location of the offending value.
    pub path: FieldPath,
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Nested errors, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ValidationError>,
}

impl ValidationError {
    /// Create a leaf error.
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            children: Vec::new(),
        }
    }

    /// Attach child errors.
    pub fn with_children(mut self, children: Vec<ValidationError>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first iterator over every leaf below (or at) this node.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self],
        }
    }

    fn fmt_tree(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        writeln!(f, "{:indent$}{}", "", self, indent = depth * 2)?;
        for child in &self.children {
            child.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Depth-first leaf iterator returned by [`ValidationError::leaves`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a ValidationError>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a ValidationError;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// The complete set of root errors for one rejected validation call.
///
/// `Display` renders one line per root error; use [`ValidationErrors::tree`]
/// for the indented rendering that includes every union candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Wrap the root errors of a rejection.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns the number of root errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no root errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of the root errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Every leaf of every root error, depth-first, in evaluation order.
    pub fn leaves(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().flat_map(ValidationError::leaves)
    }

    /// The first leaf, for callers that report a single failure.
    pub fn first_leaf(&self) -> Option<&ValidationError> {
        self.leaves().next()
    }

    /// Indented rendering of the whole tree.
    pub fn tree(&self) -> Tree<'_> {
        Tree(&self.errors)
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

/// Display adapter returned by [`ValidationErrors::tree`].
#[derive(Debug)]
pub struct Tree<'a>(&'a [ValidationError]);

impl std::fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in self.0 {
            error.fmt_tree(f, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: &str, kind: ErrorKind) -> ValidationError {
        ValidationError::new(FieldPath::root().child(key), kind, format!("{key} failed"))
    }

    #[test]
    fn test_display_includes_path_and_message() {
        let err = leaf("printWidth", ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), "printWidth: printWidth failed");
    }

    #[test]
    fn test_root_error_display() {
        let err = ValidationError::new(FieldPath::root(), ErrorKind::UnionNoMatch, "no schema matched");
        assert_eq!(err.to_string(), "(root): no schema matched");
    }

    #[test]
    fn test_leaves_depth_first_in_order() {
        let tree = ValidationError::new(FieldPath::root(), ErrorKind::UnionNoMatch, "no match")
            .with_children(vec![
                ValidationError::new(FieldPath::root(), ErrorKind::CandidateRejected, "candidate 1")
                    .with_children(vec![
                        leaf("a", ErrorKind::UnknownKey),
                        leaf("b", ErrorKind::UnknownKey),
                    ]),
                ValidationError::new(FieldPath::root(), ErrorKind::CandidateRejected, "candidate 2")
                    .with_children(vec![leaf("c", ErrorKind::TypeMismatch)]),
            ]);
        let paths: Vec<String> = tree.leaves().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_leaf() {
        let errors = ValidationErrors::new(vec![
            leaf("semi", ErrorKind::TypeMismatch),
            leaf("useTabs", ErrorKind::TypeMismatch),
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first_leaf().unwrap().path.to_string(), "semi");
    }

    #[test]
    fn test_errors_display_one_line_per_root() {
        let errors = ValidationErrors::new(vec![
            leaf("semi", ErrorKind::TypeMismatch),
            leaf("useTabs", ErrorKind::TypeMismatch),
        ]);
        let display = errors.to_string();
        assert_eq!(display.lines().count(), 2);
        assert!(display.contains("useTabs"));
    }

    #[test]
    fn test_tree_rendering_indents_children() {
        let errors = ValidationErrors::new(vec![ValidationError::new(
            FieldPath::root(),
            ErrorKind::UnionNoMatch,
            "no match",
        )
        .with_children(vec![leaf("x", ErrorKind::UnknownKey)])]);
        let rendered = errors.tree().to_string();
        assert!(rendered.contains("\n  x: x failed"));
    }

    #[test]
    fn test_kind_serde_format_matches_as_str() {
        for kind in [
            ErrorKind::TypeMismatch,
            ErrorKind::LiteralMismatch,
            ErrorKind::UnionAmbiguous,
            ErrorKind::UnionNoMatch,
            ErrorKind::UnknownKey,
            ErrorKind::MissingRequiredField,
            ErrorKind::CandidateRejected,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
