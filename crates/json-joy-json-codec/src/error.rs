//! Structured decode errors.
//!
//! Errors never affect control flow beyond "this codec failed"; they exist
//! for diagnostics. Every error carries the absolute [`Path`] from the decode
//! root, so nested errors can be surfaced unchanged by enclosing combinators.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::path::Path;

/// What went wrong at a path.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong primitive or structural type.
    #[error("expected {expected}")]
    TypeMismatch { expected: String },

    /// Value present but not the expected constant.
    #[error("expected literal {expected}")]
    LiteralMismatch { expected: Value },

    /// Declared field absent from the input object.
    #[error("missing key {key:?}")]
    MissingKey { key: String },

    /// Every union branch rejected the input. Groups are in branch order.
    #[error("none of {} union branches matched", branches.len())]
    AllBranchesFailed { branches: Vec<BranchFailure> },

    /// One intersection operand rejected the input.
    #[error("intersection operand {operand} failed with {} error(s)", errors.len())]
    OperandFailed { operand: usize, errors: Errors },
}

/// The errors one union branch produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchFailure {
    pub branch: usize,
    pub errors: Errors,
}

/// A single validation failure.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind} at {path}")]
pub struct ValidationError {
    pub path: Path,
    pub kind: ErrorKind,
    /// The offending input; `None` when the value was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

impl ValidationError {
    pub fn new(path: Path, kind: ErrorKind, actual: Option<Value>) -> Self {
        Self { path, kind, actual }
    }

    pub fn type_mismatch(path: &Path, expected: impl Into<String>, actual: &Value) -> Self {
        Self::new(
            path.clone(),
            ErrorKind::TypeMismatch {
                expected: expected.into(),
            },
            Some(actual.clone()),
        )
    }

    pub fn literal_mismatch(path: &Path, expected: &Value, actual: &Value) -> Self {
        Self::new(
            path.clone(),
            ErrorKind::LiteralMismatch {
                expected: expected.clone(),
            },
            Some(actual.clone()),
        )
    }

    pub fn missing_key(path: &Path, key: &str) -> Self {
        Self::new(
            path.key(key),
            ErrorKind::MissingKey {
                key: key.to_string(),
            },
            None,
        )
    }
}

/// Where a leaf error came from inside nested unions and intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "group", content = "index", rename_all = "snake_case")]
pub enum Origin {
    Branch(usize),
    Operand(usize),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch(i) => write!(f, "branch {i}"),
            Self::Operand(i) => write!(f, "operand {i}"),
        }
    }
}

/// A leaf error together with the branch/operand trail that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'a> {
    pub origin: Vec<Origin>,
    pub error: &'a ValidationError,
}

/// Ordered, non-empty list of validation errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Errors(Vec<ValidationError>);

#[allow(clippy::len_without_is_empty)]
impl Errors {
    pub fn new(first: ValidationError) -> Self {
        Self(vec![first])
    }

    /// Returns `None` for an empty vector.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn append(&mut self, other: Errors) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// Flattens union and intersection groups into the concatenated list of
    /// leaf errors, in branch/operand order.
    ///
    /// A union with no branches has nothing to flatten and is itself a leaf.
    pub fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut out = Vec::new();
        collect_leaves(self, &mut Vec::new(), &mut out);
        out
    }
}

fn collect_leaves<'a>(errors: &'a Errors, origin: &mut Vec<Origin>, out: &mut Vec<Leaf<'a>>) {
    for error in errors.iter() {
        match &error.kind {
            ErrorKind::AllBranchesFailed { branches } if !branches.is_empty() => {
                for failure in branches {
                    origin.push(Origin::Branch(failure.branch));
                    collect_leaves(&failure.errors, origin, out);
                    origin.pop();
                }
            }
            ErrorKind::OperandFailed { operand, errors } => {
                origin.push(Origin::Operand(*operand));
                collect_leaves(errors, origin, out);
                origin.pop();
            }
            _ => out.push(Leaf {
                origin: origin.clone(),
                error,
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Errors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::reporter::report(self).join("\n"))
    }
}

impl std::error::Error for Errors {}

/// Error returned by [`decode_as`](crate::decode_as).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid input:\n{0}")]
    Invalid(#[from] Errors),

    #[error("decoded value does not fit the target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf_error(key: &str) -> ValidationError {
        ValidationError::missing_key(&Path::root(), key)
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(Errors::from_vec(Vec::new()).is_none());
        assert_eq!(Errors::from_vec(vec![leaf_error("a")]).unwrap().len(), 1);
    }

    #[test]
    fn test_leaves_flatten_nested_groups() {
        let operand = ValidationError::new(
            Path::root(),
            ErrorKind::OperandFailed {
                operand: 1,
                errors: Errors::new(leaf_error("version")),
            },
            Some(json!({})),
        );
        let union = ValidationError::new(
            Path::root(),
            ErrorKind::AllBranchesFailed {
                branches: vec![
                    BranchFailure {
                        branch: 0,
                        errors: Errors::new(leaf_error("a")),
                    },
                    BranchFailure {
                        branch: 1,
                        errors: Errors::new(operand),
                    },
                ],
            },
            Some(json!({})),
        );
        let errors = Errors::new(union);
        let leaves = errors.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].origin, vec![Origin::Branch(0)]);
        assert_eq!(leaves[0].error.path.to_string(), "$.a");
        assert_eq!(
            leaves[1].origin,
            vec![Origin::Branch(1), Origin::Operand(1)]
        );
        assert_eq!(leaves[1].error.path.to_string(), "$.version");
    }

    #[test]
    fn test_empty_union_is_a_leaf() {
        let errors = Errors::new(ValidationError::new(
            Path::root(),
            ErrorKind::AllBranchesFailed { branches: vec![] },
            Some(json!(1)),
        ));
        assert_eq!(errors.leaves().len(), 1);
    }

    #[test]
    fn test_kind_display() {
        let kind = ErrorKind::LiteralMismatch {
            expected: json!("a"),
        };
        assert_eq!(kind.to_string(), "expected literal \"a\"");
        let err = leaf_error("kind");
        assert_eq!(err.to_string(), "missing key \"kind\" at $.kind");
    }

    #[test]
    fn test_serialize_error() {
        let err = ValidationError::type_mismatch(&Path::root().key("a"), "string", &json!(1));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "path": ["a"],
                "kind": {"code": "type_mismatch", "expected": "string"},
                "actual": 1
            })
        );
    }
}
