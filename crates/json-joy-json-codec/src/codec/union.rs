//! Union codec: ordered first-match over branches.

use serde_json::Value;

use super::{Codec, CodecRef};
use crate::error::{BranchFailure, ErrorKind, ValidationError};
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::{DecodeResult, Decoded};

/// Tries each branch against the raw input, in declaration order.
///
/// The first branch that succeeds wins and its output is returned as-is.
/// Branch order is therefore the tie-break for input that several branches
/// accept; reordering branches changes results.
#[derive(Debug, Clone)]
pub struct UnionCodec {
    pub branches: Vec<CodecRef>,
}

impl UnionCodec {
    pub fn new(branches: Vec<CodecRef>) -> Self {
        Self { branches }
    }

    /// Runs `attempt` on each branch until one succeeds. `path` and `actual`
    /// locate the failure when none does.
    fn first_match<T>(
        &self,
        path: &Path,
        actual: Option<&Value>,
        mut attempt: impl FnMut(&CodecRef) -> DecodeResult<T>,
    ) -> DecodeResult<T> {
        let mut failures = Vec::with_capacity(self.branches.len());
        for (branch, codec) in self.branches.iter().enumerate() {
            match attempt(codec) {
                DecodeResult::Success(decoded) => {
                    tracing::trace!(%path, branch, codec = %codec.name(), "union branch matched");
                    return DecodeResult::Success(decoded);
                }
                DecodeResult::Failure(errors) => {
                    tracing::trace!(
                        %path,
                        branch,
                        errors = errors.len(),
                        "union branch rejected input"
                    );
                    failures.push(BranchFailure { branch, errors });
                }
            }
        }
        DecodeResult::failure(ValidationError::new(
            path.clone(),
            ErrorKind::AllBranchesFailed { branches: failures },
            actual.cloned(),
        ))
    }
}

impl Codec for UnionCodec {
    fn name(&self) -> String {
        let names: Vec<String> = self.branches.iter().map(|b| b.name()).collect();
        format!("({})", names.join(" | "))
    }

    fn decode_at(&self, input: &Value, path: &Path, opts: &DecodeOptions) -> DecodeResult<Decoded> {
        self.first_match(path, Some(input), |codec| codec.decode_at(input, path, opts))
    }

    fn decode_absent(
        &self,
        key: &str,
        path: &Path,
        opts: &DecodeOptions,
    ) -> DecodeResult<Option<Decoded>> {
        self.first_match(&path.key(key), None, |codec| {
            codec.decode_absent(key, path, opts)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{exact, literal, string, type_};
    use serde_json::json;

    fn variant_a() -> CodecRef {
        exact(type_([("kind", literal("a")), ("a", string())]))
    }

    fn variant_b() -> CodecRef {
        exact(type_([("kind", literal("b")), ("b", string())]))
    }

    #[test]
    fn test_first_success_wins() {
        let loose_a = type_([("a", string())]);
        let loose_b = type_([("b", string())]);
        let input = json!({"a": "x", "b": "y"});

        let ab = UnionCodec::new(vec![exact(loose_a.clone()), exact(loose_b.clone())]);
        assert_eq!(ab.decode(&input).success(), Some(json!({"a": "x"})));

        let ba = UnionCodec::new(vec![exact(loose_b), exact(loose_a)]);
        assert_eq!(ba.decode(&input).success(), Some(json!({"b": "y"})));
    }

    #[test]
    fn test_branches_see_raw_input() {
        let codec = UnionCodec::new(vec![variant_a(), variant_b()]);
        let out = codec.decode(&json!({"kind": "b", "a": "a", "b": "b"}));
        assert_eq!(out.success(), Some(json!({"kind": "b", "b": "b"})));
    }

    #[test]
    fn test_all_branches_failed_groups_errors_by_branch() {
        let codec = UnionCodec::new(vec![variant_a(), variant_b()]);
        let res = codec.decode(&json!({"kind": "c"}));
        let errors = res.errors().unwrap();
        assert_eq!(errors.len(), 1);
        let err = errors.first();
        assert!(err.path.is_root());
        assert_eq!(err.actual, Some(json!({"kind": "c"})));
        match &err.kind {
            ErrorKind::AllBranchesFailed { branches } => {
                assert_eq!(branches.len(), 2);
                assert_eq!(branches[0].branch, 0);
                assert_eq!(branches[1].branch, 1);
                // literal mismatch on `kind` plus the missing field
                assert_eq!(branches[0].errors.len(), 2);
                assert_eq!(branches[1].errors.len(), 2);
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_empty_union_always_fails() {
        let codec = UnionCodec::new(vec![]);
        let res = codec.decode(&json!(null));
        assert_eq!(
            res.errors().unwrap().first().kind,
            ErrorKind::AllBranchesFailed { branches: vec![] }
        );
    }

    #[test]
    fn test_name() {
        let codec = UnionCodec::new(vec![string(), literal(1)]);
        assert_eq!(codec.name(), "(string | 1)");
    }

    #[test]
    fn test_absent_field_tries_every_branch() {
        let codec = UnionCodec::new(vec![string(), literal(1)]);
        let res = codec.decode_absent("x", &Path::root(), &DecodeOptions::default());
        let err = res.errors().unwrap().first();
        assert_eq!(err.path.to_string(), "$.x");
        assert_eq!(err.actual, None);
        match &err.kind {
            ErrorKind::AllBranchesFailed { branches } => {
                assert_eq!(branches.len(), 2);
                assert!(branches.iter().all(|b| matches!(
                    b.errors.first().kind,
                    ErrorKind::MissingKey { .. }
                )));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
