//! Codecs and their combinators.
//!
//! A codec is an immutable validator/decoder for one shape. Combinators build
//! new codecs from existing ones without touching their operands, so a codec
//! built once can be shared across threads and reused for the lifetime of the
//! process.
//!
//! - [`literal`], [`string`], [`boolean`], [`null`]: leaf validators.
//! - [`type_`]: object with declared fields; unknown keys pass through.
//! - [`exact`]: strips keys the wrapped codec did not declare.
//! - [`union`]: first branch that succeeds wins (branch order is part of
//!   the contract).
//! - [`intersection`]: every operand decodes the same raw input; outputs are
//!   merged left to right, last write wins.

pub mod exact;
pub mod intersection;
pub mod object;
pub mod primitive;
pub mod union;

pub use exact::ExactCodec;
pub use intersection::IntersectionCodec;
pub use object::{ObjectShape, TypeCodec};
pub use primitive::{BooleanCodec, LiteralCodec, NullCodec, StringCodec};
pub use union::UnionCodec;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationError;
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::{DecodeResult, Decoded};

/// The shared decode contract.
pub trait Codec: fmt::Debug + Send + Sync {
    /// Display name of the expected shape, e.g. `{ kind: "a", a: string }`.
    fn name(&self) -> String;

    /// Decodes `input`, located at `path` from the decode root.
    fn decode_at(&self, input: &Value, path: &Path, opts: &DecodeOptions) -> DecodeResult<Decoded>;

    /// Decodes the absent field `key` of the object at `path`.
    ///
    /// `Success(None)` accepts the absence and leaves the key out of the
    /// output. Leaf and object codecs reject it with `MissingKey`.
    fn decode_absent(
        &self,
        key: &str,
        path: &Path,
        _opts: &DecodeOptions,
    ) -> DecodeResult<Option<Decoded>> {
        DecodeResult::failure(ValidationError::missing_key(path, key))
    }

    /// Decodes `input` from the root with default options.
    fn decode(&self, input: &Value) -> DecodeResult<Value> {
        self.decode_at(input, &Path::root(), &DecodeOptions::default())
            .map(|decoded| decoded.value)
    }

    /// Returns `true` when `input` decodes successfully.
    fn is(&self, input: &Value) -> bool {
        self.decode_at(input, &Path::root(), &DecodeOptions::fail_fast())
            .is_success()
    }
}

/// Shared handle to an immutable codec.
pub type CodecRef = Arc<dyn Codec>;

/// Codec matching exactly `value`.
pub fn literal(value: impl Into<Value>) -> CodecRef {
    Arc::new(LiteralCodec::new(value.into()))
}

pub fn string() -> CodecRef {
    Arc::new(StringCodec)
}

pub fn boolean() -> CodecRef {
    Arc::new(BooleanCodec)
}

pub fn null() -> CodecRef {
    Arc::new(NullCodec)
}

/// Object codec over `shape`; undeclared input keys pass through.
///
/// A declared field missing from the input is handed to its codec through
/// [`Codec::decode_absent`], so only codecs that accept absence (such as an
/// empty intersection) let it through; everything else reports `MissingKey`.
///
/// ```
/// use json_joy_json_codec::{literal, string, type_, Codec};
/// use serde_json::json;
///
/// let codec = type_([("kind", literal("a")), ("a", string())]);
/// let out = codec.decode(&json!({"kind": "a", "a": "x", "extra": 1}));
/// assert_eq!(out.success(), Some(json!({"kind": "a", "a": "x", "extra": 1})));
/// ```
pub fn type_<K, I>(shape: I) -> CodecRef
where
    K: Into<String>,
    I: IntoIterator<Item = (K, CodecRef)>,
{
    Arc::new(TypeCodec::new(shape.into_iter().collect()))
}

/// Strips every key the wrapped codec did not declare.
pub fn exact(codec: CodecRef) -> CodecRef {
    Arc::new(ExactCodec::new(codec))
}

/// Tries `branches` in order; the first success wins.
pub fn union(branches: impl IntoIterator<Item = CodecRef>) -> CodecRef {
    Arc::new(UnionCodec::new(branches.into_iter().collect()))
}

/// Requires every operand to succeed and merges their outputs.
pub fn intersection(operands: impl IntoIterator<Item = CodecRef>) -> CodecRef {
    Arc::new(IntersectionCodec::new(operands.into_iter().collect()))
}
