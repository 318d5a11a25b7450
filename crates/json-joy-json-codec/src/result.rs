//! Decode results.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Errors, ValidationError};

/// Outcome of a decode: a value or a non-empty list of errors.
///
/// There is no partial success; a failing field fails the whole decode.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeResult<A> {
    Success(A),
    Failure(Errors),
}

impl<A> DecodeResult<A> {
    pub fn failure(error: ValidationError) -> Self {
        Self::Failure(Errors::new(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn success(self) -> Option<A> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&Errors> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> DecodeResult<B> {
        match self {
            Self::Success(value) => DecodeResult::Success(f(value)),
            Self::Failure(errors) => DecodeResult::Failure(errors),
        }
    }

    pub fn into_result(self) -> Result<A, Errors> {
        self.into()
    }
}

impl<A> From<DecodeResult<A>> for Result<A, Errors> {
    fn from(result: DecodeResult<A>) -> Self {
        match result {
            DecodeResult::Success(value) => Ok(value),
            DecodeResult::Failure(errors) => Err(errors),
        }
    }
}

impl<A> From<Result<A, Errors>> for DecodeResult<A> {
    fn from(result: Result<A, Errors>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(errors) => Self::Failure(errors),
        }
    }
}

/// Declared key to the shape of its decoded value, in declaration order.
pub type Fields = IndexMap<String, Shape>;

/// Which object keys a successful decode declared.
///
/// `Open` outputs still carry every undeclared input key; `Closed` outputs
/// carry exactly the declared keys. Each declared key records the shape of
/// its own decoded value, so intersections can merge colliding nested
/// objects by the same rules as the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Open(Fields),
    Closed(Fields),
}

impl Shape {
    /// Declared fields; `None` for scalars.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Self::Scalar => None,
            Self::Open(fields) | Self::Closed(fields) => Some(fields),
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields()
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    pub fn is_object(&self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

/// A decoded value together with its key shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub shape: Shape,
}

impl Decoded {
    pub fn scalar(value: Value) -> Self {
        Self {
            value,
            shape: Shape::Scalar,
        }
    }

    pub fn open(value: Value, fields: Fields) -> Self {
        Self {
            value,
            shape: Shape::Open(fields),
        }
    }

    pub fn closed(value: Value, fields: Fields) -> Self {
        Self {
            value,
            shape: Shape::Closed(fields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use serde_json::json;

    #[test]
    fn test_result_conversions() {
        let ok: DecodeResult<i32> = DecodeResult::Success(1);
        assert_eq!(ok.clone().into_result(), Ok(1));
        assert_eq!(ok.map(|v| v + 1).success(), Some(2));

        let err: DecodeResult<i32> =
            DecodeResult::failure(ValidationError::missing_key(&Path::root(), "a"));
        assert!(err.is_failure());
        assert_eq!(err.errors().map(Errors::len), Some(1));
        assert!(err.into_result().is_err());
    }

    #[test]
    fn test_shape_keys() {
        let fields: Fields = [("a".to_string(), Shape::Scalar)].into_iter().collect();
        let decoded = Decoded::closed(json!({"a": 1}), fields);
        assert!(decoded.shape.is_closed());
        assert_eq!(decoded.shape.keys(), ["a"]);
        assert!(Shape::Scalar.keys().is_empty());
        assert!(Shape::Scalar.fields().is_none());
        assert!(!Shape::Scalar.is_object());
    }
}
