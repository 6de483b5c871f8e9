//! Purpose: JSON renderers for decoded envelopes and decode errors used by the CLI.
//! Exports: `envelope_json`, `outcome_json`, `error_detail_json`.
//! Role: Keep the stdout report shape and the stderr error shape consistent.
//! Invariants: Stable key names; absent pagination fields are emitted as `null`.
//! Invariants: Failures render as data (`{"failure": {...}}`), never as a process error.

use pagedecode::api::{Error, Outcome, PaginatedEnvelope};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;

pub(crate) fn envelope_json<E>(
    envelope: &PaginatedEnvelope<E>,
    render: impl Fn(&E) -> Value,
) -> Value {
    let mut map = Map::new();
    map.insert("page".to_string(), json!(envelope.page));
    map.insert("size".to_string(), json!(envelope.size));
    map.insert("pagelen".to_string(), json!(envelope.pagelen));
    map.insert("next".to_string(), json!(envelope.next));
    map.insert("previous".to_string(), json!(envelope.previous));
    map.insert(
        "values".to_string(),
        Value::Array(envelope.values.iter().map(render).collect()),
    );
    Value::Object(map)
}

pub(crate) fn outcome_json<T>(outcome: &Outcome<T>, render: impl Fn(&T) -> Value) -> Value {
    match outcome {
        Outcome::Success(value) => json!({ "success": render(value) }),
        Outcome::Failure(err) => json!({ "failure": error_detail_json(err) }),
    }
}

pub(crate) fn error_detail_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.to_string()));
    }
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(expected) = err.expected() {
        inner.insert("expected".to_string(), json!(expected));
    }
    if let Some(actual) = err.actual() {
        inner.insert("actual".to_string(), json!(actual));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }
    Value::Object(inner)
}

pub(crate) fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    format!("{:?}", err.kind())
}

pub(crate) fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

#[cfg(test)]
mod tests {
    use super::{envelope_json, error_detail_json, outcome_json};
    use pagedecode::api::{DecodeOptions, decode_envelope_str, shape};
    use serde_json::{Value, json};

    #[test]
    fn envelope_json_renders_outcomes_in_order() {
        let envelope = decode_envelope_str(
            r#"{"values": ["a", 1], "pagelen": 2, "page": 1}"#,
            &DecodeOptions::new(),
            shape::outcome(shape::any),
        )
        .expect("decode");
        let rendered = envelope_json(&envelope, |outcome| outcome_json(outcome, Value::clone));

        assert_eq!(rendered["page"], json!(1));
        assert_eq!(rendered["size"], json!(null));
        assert_eq!(rendered["pagelen"], json!(2));
        assert_eq!(rendered["values"][0], json!({"success": "a"}));
        assert_eq!(rendered["values"][1], json!({"success": 1}));
    }

    #[test]
    fn failure_detail_includes_location_and_types() {
        let envelope = decode_envelope_str(
            r#"{"values": [true], "pagelen": 1}"#,
            &DecodeOptions::new(),
            shape::outcome(shape::string),
        )
        .expect("decode");
        let err = envelope.values[0].failure().expect("failure");
        let detail = error_detail_json(err);

        assert_eq!(detail["kind"], json!("TypeMismatch"));
        assert_eq!(detail["path"], json!("$.values[0]"));
        assert_eq!(detail["expected"], json!("string"));
        assert_eq!(detail["actual"], json!("boolean"));
        assert!(detail.get("causes").is_none());
    }
}
