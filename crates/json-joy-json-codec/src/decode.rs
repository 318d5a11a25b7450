//! Top-level decode entry points.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::codec::Codec;
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::DecodeResult;

/// Decodes `input` with default options.
pub fn decode(codec: &dyn Codec, input: &Value) -> DecodeResult<Value> {
    decode_with(codec, input, &DecodeOptions::default())
}

/// Decodes `input` with explicit options.
pub fn decode_with(codec: &dyn Codec, input: &Value, opts: &DecodeOptions) -> DecodeResult<Value> {
    let result = codec.decode_at(input, &Path::root(), opts);
    if let DecodeResult::Failure(errors) = &result {
        tracing::debug!(
            codec = %codec.name(),
            errors = errors.len(),
            "decode failed"
        );
    }
    result.map(|decoded| decoded.value)
}

/// Decodes `input` and deserializes the (already stripped) output into `T`.
///
/// ```
/// use json_joy_json_codec::{decode_as, exact, literal, string, type_};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// #[serde(deny_unknown_fields)]
/// struct VariantA {
///     kind: String,
///     a: String,
/// }
///
/// let codec = exact(type_([("kind", literal("a")), ("a", string())]));
/// let v: VariantA = decode_as(codec.as_ref(), &json!({"kind": "a", "a": "x", "b": "y"})).unwrap();
/// assert_eq!(v, VariantA { kind: "a".into(), a: "x".into() });
/// ```
pub fn decode_as<T: DeserializeOwned>(codec: &dyn Codec, input: &Value) -> Result<T, DecodeError> {
    let value = decode(codec, input).into_result()?;
    Ok(serde_json::from_value(value)?)
}
