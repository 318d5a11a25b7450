//! Exact codec: closes an object shape by stripping undeclared keys.

use serde_json::Value;

use super::{Codec, CodecRef};
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::{DecodeResult, Decoded, Shape};

/// Strips excess keys from the wrapped codec's output.
///
/// Stripping uses the keys declared by *this* decode, so inside a union each
/// branch strips by its own shape, and inside an intersection each operand
/// strips by its own shape before the merge.
#[derive(Debug, Clone)]
pub struct ExactCodec {
    pub inner: CodecRef,
}

impl ExactCodec {
    pub fn new(inner: CodecRef) -> Self {
        Self { inner }
    }
}

impl Codec for ExactCodec {
    fn name(&self) -> String {
        let inner = self.inner.name();
        match inner.strip_prefix("{ ").and_then(|s| s.strip_suffix(" }")) {
            Some(fields) => format!("{{| {fields} |}}"),
            None if inner == "{}" => "{||}".to_string(),
            None => format!("Exact<{inner}>"),
        }
    }

    fn decode_at(&self, input: &Value, path: &Path, opts: &DecodeOptions) -> DecodeResult<Decoded> {
        self.inner.decode_at(input, path, opts).map(strip)
    }

    fn decode_absent(
        &self,
        key: &str,
        path: &Path,
        opts: &DecodeOptions,
    ) -> DecodeResult<Option<Decoded>> {
        self.inner
            .decode_absent(key, path, opts)
            .map(|decoded| decoded.map(strip))
    }
}

fn strip(decoded: Decoded) -> Decoded {
    let fields = match decoded.shape {
        Shape::Open(fields) => fields,
        Shape::Closed(_) | Shape::Scalar => return decoded,
    };
    let obj = match decoded.value {
        Value::Object(obj) => obj,
        value => return Decoded::closed(value, fields),
    };
    let mut stripped = Vec::new();
    let out: serde_json::Map<String, Value> = obj
        .into_iter()
        .filter(|(k, _)| {
            let keep = fields.contains_key(k);
            if !keep {
                stripped.push(k.clone());
            }
            keep
        })
        .collect();
    if !stripped.is_empty() {
        tracing::debug!(
            count = stripped.len(),
            keys = ?stripped,
            "exact codec stripped excess keys"
        );
    }
    Decoded::closed(Value::Object(out), fields)
}
