//! Decode options loaded from config, and typed decoding through serde.

use json_joy_json_codec::{
    decode_as, decode_with, exact, intersection, literal, report, string, type_, union, CodecRef,
    DecodeError, DecodeOptions, ErrorMode,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default)]
    decode: DecodeOptions,
}

#[test]
fn test_options_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [decode]
        error_mode = "fail_fast"
        "#,
    )
    .unwrap();
    assert_eq!(config.decode.error_mode, ErrorMode::FailFast);
}

#[test]
fn test_options_default_when_section_missing() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config.decode, DecodeOptions::default());
    assert_eq!(config.decode.error_mode, ErrorMode::Collect);
}

#[test]
fn test_fail_fast_still_reports_at_least_one_error() {
    let codec = type_([("a", string()), ("b", string()), ("c", string())]);
    let res = decode_with(codec.as_ref(), &json!({"b": 1}), &DecodeOptions::fail_fast());
    let errors = res.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "$.a");

    let res = decode_with(codec.as_ref(), &json!({"b": 1}), &DecodeOptions::new());
    assert_eq!(res.errors().unwrap().len(), 3);
}

#[test]
fn test_fail_fast_union_tries_every_branch() {
    let codec = union([type_([("a", string())]), type_([("b", string())])]);
    let res = decode_with(codec.as_ref(), &json!({"b": "x"}), &DecodeOptions::fail_fast());
    assert_eq!(res.success(), Some(json!({"b": "x"})));
}

// ---------------------------------------------------------------------- typed

#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Message {
    A { a: String, version: String },
    B { b: String, version: String },
}

fn message_codec() -> CodecRef {
    let variant_a = exact(type_([("kind", literal("a")), ("a", string())]));
    let variant_b = exact(type_([("kind", literal("b")), ("b", string())]));
    intersection([
        union([variant_a, variant_b]),
        type_([("version", literal("1"))]),
    ])
}

#[test]
fn test_decode_as_typed_enum() {
    let codec = message_codec();
    let msg: Message = decode_as(
        codec.as_ref(),
        &json!({"version": "1", "kind": "b", "a": "a", "b": "b"}),
    )
    .unwrap();
    assert_eq!(
        msg,
        Message::B {
            b: "b".into(),
            version: "1".into()
        }
    );
}

#[test]
fn test_decode_as_invalid_input_reports_paths() {
    let codec = message_codec();
    let err = decode_as::<Message>(codec.as_ref(), &json!({"version": "1", "kind": "c"}))
        .unwrap_err();
    match err {
        DecodeError::Invalid(errors) => {
            let lines = report(&errors);
            assert_eq!(lines.len(), 4);
            assert!(lines.iter().all(|l| l.contains("operand 0")));
            assert!(lines[0].contains("$.kind"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
