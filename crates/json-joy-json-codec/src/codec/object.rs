//! Object codec: declared fields are decoded in place, other keys pass through.

use indexmap::IndexMap;
use serde_json::Value;

use super::{Codec, CodecRef};
use crate::error::{Errors, ValidationError};
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::{DecodeResult, Decoded, Fields, Shape};

/// Field name to codec, in declaration order.
///
/// Declaration order fixes the order in which field errors are reported.
/// Declaring a key twice replaces its codec but keeps its first position.
#[derive(Debug, Clone, Default)]
pub struct ObjectShape {
    fields: IndexMap<String, CodecRef>,
}

impl ObjectShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, codec: CodecRef) -> Self {
        self.fields.insert(key.into(), codec);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CodecRef)> {
        self.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CodecRef)> for ObjectShape {
    fn from_iter<I: IntoIterator<Item = (K, CodecRef)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |shape, (key, codec)| shape.field(key, codec))
    }
}

#[derive(Debug, Clone)]
pub struct TypeCodec {
    pub shape: ObjectShape,
}

impl TypeCodec {
    pub fn new(shape: ObjectShape) -> Self {
        Self { shape }
    }
}

impl Codec for TypeCodec {
    fn name(&self) -> String {
        if self.shape.is_empty() {
            return "{}".to_string();
        }
        let fields: Vec<String> = self
            .shape
            .iter()
            .map(|(key, codec)| format!("{}: {}", key, codec.name()))
            .collect();
        format!("{{ {} }}", fields.join(", "))
    }

    fn decode_at(&self, input: &Value, path: &Path, opts: &DecodeOptions) -> DecodeResult<Decoded> {
        let obj = match input.as_object() {
            Some(o) => o,
            None => {
                return DecodeResult::failure(ValidationError::type_mismatch(
                    path,
                    self.name(),
                    input,
                ))
            }
        };

        // Start from the input so undeclared keys survive in their original order.
        let mut out = obj.clone();
        let mut fields = Fields::new();
        let mut errors: Option<Errors> = None;

        for (key, codec) in self.shape.iter() {
            let field_result = match obj.get(key) {
                Some(v) => codec.decode_at(v, &path.key(key), opts).map(Some),
                None => codec.decode_absent(key, path, opts),
            };
            match field_result {
                DecodeResult::Success(Some(decoded)) => {
                    out.insert(key.clone(), decoded.value);
                    fields.insert(key.clone(), decoded.shape);
                }
                DecodeResult::Success(None) => {
                    fields.insert(key.clone(), Shape::Scalar);
                }
                DecodeResult::Failure(field_errors) => {
                    match errors.as_mut() {
                        Some(acc) => acc.append(field_errors),
                        None => errors = Some(field_errors),
                    }
                    if opts.is_fail_fast() {
                        break;
                    }
                }
            }
        }

        if let Some(errors) = errors {
            return DecodeResult::Failure(errors);
        }
        DecodeResult::Success(Decoded::open(Value::Object(out), fields))
    }
}
