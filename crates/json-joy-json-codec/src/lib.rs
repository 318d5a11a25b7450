//! `json-joy-json-codec` — composable runtime codecs for untyped JSON.
//!
//! A codec validates a `serde_json::Value` against an expected shape and
//! produces either the decoded value or a non-empty list of structured
//! errors. Codecs compose:
//!
//! - [`type_`] decodes declared fields and passes unknown keys through;
//! - [`exact`] strips keys the wrapped codec did not declare;
//! - [`union`] picks the first branch that succeeds, in declaration order;
//! - [`intersection`] decodes the raw input against every operand and merges
//!   the outputs, last write wins.
//!
//! Exact stripping is local to the codec that declares it, which keeps
//! intersection distributive over union:
//!
//! ```
//! use json_joy_json_codec::{decode, exact, intersection, literal, string, type_, union, CodecRef};
//! use serde_json::json;
//!
//! let variant_a = exact(type_([("kind", literal("a")), ("a", string())]));
//! let variant_b = exact(type_([("kind", literal("b")), ("b", string())]));
//! let with_version = |codec: CodecRef| intersection([codec, type_([("version", literal("1"))])]);
//!
//! let outer = with_version(union([variant_a.clone(), variant_b.clone()]));
//! let inner = union([with_version(variant_a), with_version(variant_b)]);
//!
//! let input = json!({"version": "1", "kind": "b", "a": "a", "b": "b"});
//! let expected = json!({"version": "1", "kind": "b", "b": "b"});
//! assert_eq!(decode(outer.as_ref(), &input).success(), Some(expected.clone()));
//! assert_eq!(decode(inner.as_ref(), &input).success(), Some(expected));
//! ```

pub mod codec;
pub mod decode;
pub mod error;
pub mod options;
pub mod path;
pub mod reporter;
pub mod result;

pub use codec::{
    boolean, exact, intersection, literal, null, string, type_, union, Codec, CodecRef,
    ObjectShape,
};
pub use decode::{decode, decode_as, decode_with};
pub use error::{BranchFailure, DecodeError, ErrorKind, Errors, Origin, ValidationError};
pub use options::{DecodeOptions, ErrorMode};
pub use path::{Path, PathSegment};
pub use reporter::report;
pub use result::{DecodeResult, Decoded, Fields, Shape};
