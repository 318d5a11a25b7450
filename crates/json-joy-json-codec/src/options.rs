//! Decode options.

use serde::Deserialize;

/// How many errors an object codec or intersection reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Report every failing field and every failing operand.
    #[default]
    Collect,
    /// Stop at the first failing field or operand. Unions still try every
    /// branch, since a later branch may succeed.
    FailFast,
}

/// Options threaded through every decode step.
///
/// Deserializable so it can be embedded in an application config section:
///
/// ```
/// use json_joy_json_codec::{DecodeOptions, ErrorMode};
///
/// let opts: DecodeOptions = serde_json::from_str(r#"{"error_mode": "fail_fast"}"#).unwrap();
/// assert_eq!(opts.error_mode, ErrorMode::FailFast);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub error_mode: ErrorMode,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_fast() -> Self {
        Self {
            error_mode: ErrorMode::FailFast,
        }
    }

    pub fn is_fail_fast(&self) -> bool {
        self.error_mode == ErrorMode::FailFast
    }
}
