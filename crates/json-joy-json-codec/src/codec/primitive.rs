//! Leaf codecs.

use serde_json::Value;

use super::Codec;
use crate::error::ValidationError;
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::{DecodeResult, Decoded};

// -------------------------------------------------------------------------
// LiteralCodec

#[derive(Debug, Clone)]
pub struct LiteralCodec {
    pub value: Value,
}

impl LiteralCodec {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Codec for LiteralCodec {
    fn name(&self) -> String {
        self.value.to_string()
    }

    fn decode_at(&self, input: &Value, path: &Path, _opts: &DecodeOptions) -> DecodeResult<Decoded> {
        if !json_equal(input, &self.value) {
            return DecodeResult::failure(ValidationError::literal_mismatch(
                path,
                &self.value,
                input,
            ));
        }
        DecodeResult::Success(Decoded::scalar(input.clone()))
    }
}

// -------------------------------------------------------------------------
// StringCodec

#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    fn name(&self) -> String {
        "string".to_string()
    }

    fn decode_at(&self, input: &Value, path: &Path, _opts: &DecodeOptions) -> DecodeResult<Decoded> {
        if !input.is_string() {
            return DecodeResult::failure(ValidationError::type_mismatch(path, self.name(), input));
        }
        DecodeResult::Success(Decoded::scalar(input.clone()))
    }
}

// -------------------------------------------------------------------------
// BooleanCodec

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    fn name(&self) -> String {
        "boolean".to_string()
    }

    fn decode_at(&self, input: &Value, path: &Path, _opts: &DecodeOptions) -> DecodeResult<Decoded> {
        if !input.is_boolean() {
            return DecodeResult::failure(ValidationError::type_mismatch(path, self.name(), input));
        }
        DecodeResult::Success(Decoded::scalar(input.clone()))
    }
}

// -------------------------------------------------------------------------
// NullCodec

#[derive(Debug, Clone, Copy, Default)]
pub struct NullCodec;

impl Codec for NullCodec {
    fn name(&self) -> String {
        "null".to_string()
    }

    fn decode_at(&self, input: &Value, path: &Path, _opts: &DecodeOptions) -> DecodeResult<Decoded> {
        if !input.is_null() {
            return DecodeResult::failure(ValidationError::type_mismatch(path, self.name(), input));
        }
        DecodeResult::Success(Decoded::scalar(Value::Null))
    }
}

/// Deep equality with numbers compared by value, so `1` equals `1.0`.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a
                .as_f64()
                .zip(b.as_f64())
                .map(|(a, b)| a == b)
                .unwrap_or(false),
        },
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| json_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).map(|bv| json_equal(v, bv)).unwrap_or(false))
        }
        _ => false,
    }
}
