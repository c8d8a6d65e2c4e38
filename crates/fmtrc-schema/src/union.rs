//! # Union Combinators
//!
//! Every union evaluates all of its candidates against the same raw value,
//! independently and without short-circuiting, then decides by the number
//! of candidates that accepted:
//!
//! | Combinator      | 0 accepted        | 1 accepted | >1 accepted      |
//! |-----------------|-------------------|------------|------------------|
//! | exactly-one     | `UnionNoMatch`    | accept     | `UnionAmbiguous` |
//! | enumeration     | `LiteralMismatch` | accept     | `UnionAmbiguous` |
//! | first-match     | `UnionNoMatch`    | accept     | accept first     |
//!
//! Rejections carry one child per rejected candidate, in candidate order.

use fmtrc_core::{render_literal, ErrorKind, FieldPath, ValidationError, ValueKind};
use serde_json::Value;

use crate::schema::{permitted_list, Schema};
use crate::validate::Outcome;

/// Per-candidate results of one union evaluation, in candidate order.
struct Evaluation {
    accepted: Vec<(usize, Value)>,
    rejected: Vec<(usize, Vec<ValidationError>)>,
}

fn evaluate(candidates: &[Schema], value: &Value, path: &FieldPath) -> Evaluation {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        match candidate.validate_at(value, path) {
            Ok(v) => accepted.push((i, v)),
            Err(e) => rejected.push((i, e)),
        }
    }
    tracing::trace!(
        path = %path,
        candidates = candidates.len(),
        accepted = accepted.len(),
        "union evaluated"
    );
    Evaluation { accepted, rejected }
}

/// Wraps each rejected candidate's errors in a `CandidateRejected` node.
fn candidate_errors(
    candidates: &[Schema],
    rejected: Vec<(usize, Vec<ValidationError>)>,
    path: &FieldPath,
) -> Vec<ValidationError> {
    let total = candidates.len();
    rejected
        .into_iter()
        .map(|(i, errors)| {
            ValidationError::new(
                path.clone(),
                ErrorKind::CandidateRejected,
                format!(
                    "candidate {} of {total} ({}) rejected the value",
                    i + 1,
                    candidates[i].describe()
                ),
            )
            .with_children(errors)
        })
        .collect()
}

fn no_match(
    candidates: &[Schema],
    rejected: Vec<(usize, Vec<ValidationError>)>,
    value: &Value,
    path: &FieldPath,
) -> ValidationError {
    ValidationError::new(
        path.clone(),
        ErrorKind::UnionNoMatch,
        format!(
            "no schema matched: none of {} candidates accepted {}",
            candidates.len(),
            ValueKind::of(value)
        ),
    )
    .with_children(candidate_errors(candidates, rejected, path))
}

fn ambiguous(
    candidates: &[Schema],
    evaluation: Evaluation,
    path: &FieldPath,
) -> ValidationError {
    let matched = evaluation
        .accepted
        .iter()
        .map(|(i, _)| format!("#{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    ValidationError::new(
        path.clone(),
        ErrorKind::UnionAmbiguous,
        format!(
            "value matched {} candidates ({matched}); expected exactly one",
            evaluation.accepted.len()
        ),
    )
    .with_children(candidate_errors(candidates, evaluation.rejected, path))
}

/// Accepts iff exactly one candidate accepts, with that candidate's output.
pub(crate) fn validate_exactly_one(candidates: &[Schema], value: &Value, path: &FieldPath) -> Outcome {
    let mut evaluation = evaluate(candidates, value, path);
    match evaluation.accepted.len() {
        1 => Ok(evaluation.accepted.remove(0).1),
        0 => Err(vec![no_match(candidates, evaluation.rejected, value, path)]),
        _ => Err(vec![ambiguous(candidates, evaluation, path)]),
    }
}

/// Exactly-one over literal candidates, reported as a `LiteralMismatch` that
/// lists the permitted set when nothing matched.
pub(crate) fn validate_enum(literals: &[Schema], value: &Value, path: &FieldPath) -> Outcome {
    let mut evaluation = evaluate(literals, value, path);
    match evaluation.accepted.len() {
        1 => Ok(evaluation.accepted.remove(0).1),
        0 => {
            let tried = evaluation
                .rejected
                .into_iter()
                .flat_map(|(_, errors)| errors)
                .collect();
            Err(vec![ValidationError::new(
                path.clone(),
                ErrorKind::LiteralMismatch,
                format!(
                    "expected one of {}; got {}",
                    permitted_list(literals),
                    render_literal(value)
                ),
            )
            .with_children(tried)])
        }
        _ => Err(vec![ambiguous(literals, evaluation, path)]),
    }
}

/// Accepts with the first accepting candidate's output.
pub(crate) fn validate_first_match(candidates: &[Schema], value: &Value, path: &FieldPath) -> Outcome {
    let evaluation = evaluate(candidates, value, path);
    match evaluation.accepted.into_iter().next() {
        Some((_, v)) => Ok(v),
        None => Err(vec![no_match(candidates, evaluation.rejected, value, path)]),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A value accepted by two candidates is rejected as ambiguous,
        /// whatever else the union contains.
        #[test]
        fn duplicate_candidates_always_ambiguous(s in ".{0,16}", extra in 0usize..3) {
            let mut candidates = vec![Schema::string(), Schema::string()];
            candidates.extend(std::iter::repeat_with(Schema::boolean).take(extra));
            let errors = Schema::one_of(candidates).validate(&Value::String(s)).unwrap_err();
            prop_assert_eq!(errors.errors()[0].kind, ErrorKind::UnionAmbiguous);
        }

        /// Every member of an enumeration is accepted unchanged; anything
        /// else is a literal mismatch.
        #[test]
        fn enum_members_accepted(idx in 0usize..3, other in "[A-Z]{1,6}") {
            let members = ["as-needed", "consistent", "preserve"];
            let schema = Schema::enumeration(members);
            let member = Value::from(members[idx]);
            prop_assert_eq!(schema.validate(&member).unwrap(), member);
            let errors = schema.validate(&Value::String(other)).unwrap_err();
            prop_assert_eq!(errors.errors()[0].kind, ErrorKind::LiteralMismatch);
        }
    }
}
