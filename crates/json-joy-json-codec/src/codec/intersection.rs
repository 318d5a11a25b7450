//! Intersection codec: every operand decodes the raw input, outputs merge.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{Codec, CodecRef};
use crate::error::{ErrorKind, Errors, ValidationError};
use crate::options::DecodeOptions;
use crate::path::Path;
use crate::result::{DecodeResult, Decoded, Fields, Shape};

/// Decodes the same raw input against every operand and merges the outputs.
///
/// Operands never see each other's output, so an `exact` operand only strips
/// the keys it did not declare itself. Merge rules:
///
/// - no operand produced an object shape: the last operand's value wins;
/// - otherwise every declared key of every operand is kept, and on key
///   collision the later operand overwrites the earlier one;
/// - undeclared input keys pass through only when no operand is closed.
///
/// A collision where two or more operands declared an object for the key is
/// merged by the same rules one level down, so nested `exact` and `type_`
/// operands combine instead of replacing each other.
#[derive(Debug, Clone)]
pub struct IntersectionCodec {
    pub operands: Vec<CodecRef>,
}

impl IntersectionCodec {
    pub fn new(operands: Vec<CodecRef>) -> Self {
        Self { operands }
    }

    /// Runs `attempt` on every operand and collects the outputs. Failures are
    /// wrapped as `OperandFailed` at `path` with `actual` as the input.
    fn each_operand<T>(
        &self,
        path: &Path,
        actual: Option<&Value>,
        opts: &DecodeOptions,
        mut attempt: impl FnMut(&CodecRef) -> DecodeResult<T>,
    ) -> DecodeResult<Vec<T>> {
        let mut outputs = Vec::with_capacity(self.operands.len());
        let mut errors: Option<Errors> = None;

        for (operand, codec) in self.operands.iter().enumerate() {
            match attempt(codec) {
                DecodeResult::Success(decoded) => outputs.push(decoded),
                DecodeResult::Failure(operand_errors) => {
                    tracing::trace!(%path, operand, codec = %codec.name(), "intersection operand failed");
                    let err = ValidationError::new(
                        path.clone(),
                        ErrorKind::OperandFailed {
                            operand,
                            errors: operand_errors,
                        },
                        actual.cloned(),
                    );
                    match errors.as_mut() {
                        Some(acc) => acc.push(err),
                        None => errors = Some(Errors::new(err)),
                    }
                    if opts.is_fail_fast() {
                        break;
                    }
                }
            }
        }

        match errors {
            Some(errors) => DecodeResult::Failure(errors),
            None => DecodeResult::Success(outputs),
        }
    }
}

impl Codec for IntersectionCodec {
    fn name(&self) -> String {
        let names: Vec<String> = self.operands.iter().map(|o| o.name()).collect();
        format!("({})", names.join(" & "))
    }

    fn decode_at(&self, input: &Value, path: &Path, opts: &DecodeOptions) -> DecodeResult<Decoded> {
        self.each_operand(path, Some(input), opts, |codec| {
            codec.decode_at(input, path, opts)
        })
        .map(|outputs| merge(Some(input), outputs))
    }

    /// Absence is accepted only when every operand accepts it. An empty
    /// intersection accepts it and leaves the key out.
    fn decode_absent(
        &self,
        key: &str,
        path: &Path,
        opts: &DecodeOptions,
    ) -> DecodeResult<Option<Decoded>> {
        self.each_operand(&path.key(key), None, opts, |codec| {
            codec.decode_absent(key, path, opts)
        })
        .map(|outputs| {
            let present: Vec<Decoded> = outputs.into_iter().flatten().collect();
            if present.is_empty() {
                None
            } else {
                Some(merge(None, present))
            }
        })
    }
}

/// Merges operand outputs left to right, last write wins.
///
/// `input` is the raw value the operands decoded; it supplies pass-through
/// keys for open results and is returned as-is when there are no outputs.
pub fn merge(input: Option<&Value>, outputs: Vec<Decoded>) -> Decoded {
    if !outputs.iter().any(|d| d.shape.is_object()) {
        return match outputs.into_iter().last() {
            Some(last) => last,
            None => match input {
                Some(Value::Object(obj)) => {
                    Decoded::open(Value::Object(obj.clone()), Fields::new())
                }
                Some(value) => Decoded::scalar(value.clone()),
                None => Decoded::scalar(Value::Null),
            },
        };
    }

    let closed = outputs.iter().any(|d| d.shape.is_closed());
    let mut out = match (closed, input) {
        (false, Some(Value::Object(obj))) => obj.clone(),
        _ => Map::new(),
    };

    // Declared key -> every declaring operand's (value, shape), in order.
    let mut declared: IndexMap<&str, Vec<Decoded>> = IndexMap::new();
    for decoded in &outputs {
        let Some(fields) = decoded.shape.fields() else {
            continue;
        };
        for (key, shape) in fields {
            let parts = declared.entry(key.as_str()).or_default();
            if let Some(value) = decoded.value.get(key) {
                parts.push(Decoded {
                    value: value.clone(),
                    shape: shape.clone(),
                });
            }
        }
    }

    let mut fields = Fields::with_capacity(declared.len());
    for (key, parts) in declared {
        let nested_objects = parts.iter().filter(|p| p.shape.is_object()).count();
        let merged = if nested_objects > 1 {
            let nested_input = input.and_then(|v| v.get(key));
            Some(merge(nested_input, parts))
        } else {
            parts.into_iter().last()
        };
        match merged {
            Some(decoded) => {
                out.insert(key.to_string(), decoded.value);
                fields.insert(key.to_string(), decoded.shape);
            }
            // declared by an operand that accepted the key as absent
            None => {
                fields.insert(key.to_string(), Shape::Scalar);
            }
        }
    }

    tracing::trace!(
        operands = outputs.len(),
        keys = ?fields.keys().collect::<Vec<_>>(),
        closed,
        "intersection merged operand outputs"
    );

    if closed {
        Decoded::closed(Value::Object(out), fields)
    } else {
        Decoded::open(Value::Object(out), fields)
    }
}
