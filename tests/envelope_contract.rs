//! Purpose: Lock the paginated-envelope decode contract through the public API.
//! Exports: Integration tests only (no runtime exports).
//! Role: Cover top-level field rules, per-element outcomes, and serialize/decode parity.
//! Invariants: The reproduction document decodes as an envelope of string outcomes.
//! Invariants: Element failures under an outcome shape never abort the envelope.

use pagedecode::api::{
    Context, DateParsingPolicy, DecodeOptions, Error, ErrorKind, Outcome, PaginatedEnvelope,
    decode_envelope, decode_envelope_str, shape,
};
use serde_json::{Value, json};
use time::macros::datetime;

const REPRO: &str = r#"{"values": [], "pagelen": 10, "size": 0, "page": 1}"#;

fn options() -> DecodeOptions {
    DecodeOptions::new()
}

fn assert_empty_values<E, F>(input: &str, element: F)
where
    F: Fn(&Value, &Context) -> Result<E, Error>,
{
    let envelope = decode_envelope_str(input, &options(), element).expect("decode");
    assert!(envelope.values.is_empty());
    assert_eq!(envelope.pagelen, 10);
}

#[test]
fn reproduction_document_decodes_as_string_outcomes() {
    let envelope: PaginatedEnvelope<Outcome<String>> =
        decode_envelope_str(REPRO, &options(), shape::outcome(shape::string)).expect("decode");
    assert_eq!(envelope.page, Some(1));
    assert_eq!(envelope.size, Some(0));
    assert_eq!(envelope.pagelen, 10);
    assert_eq!(envelope.next, None);
    assert_eq!(envelope.previous, None);
    assert!(envelope.values.is_empty());
}

#[test]
fn empty_values_decode_for_every_shape() {
    let inputs = [
        REPRO,
        r#"{"values": [], "pagelen": 10}"#,
        r#"{"values": [], "pagelen": 10, "size": null, "page": null, "next": null, "previous": null}"#,
    ];
    for input in inputs {
        assert_empty_values(input, shape::string);
        assert_empty_values(input, shape::integer);
        assert_empty_values(input, shape::number);
        assert_empty_values(input, shape::boolean);
        assert_empty_values(input, shape::any);
        assert_empty_values(input, shape::date);
        assert_empty_values(input, shape::list(shape::string));
        assert_empty_values(input, shape::outcome(shape::string));
        assert_empty_values(input, shape::outcome(shape::outcome(shape::integer)));
        assert_empty_values(input, shape::outcome(shape::list(shape::optional(shape::date))));
    }
}

#[test]
fn missing_pagelen_is_missing_field() {
    let inputs = [
        r#"{"values": []}"#,
        r#"{"values": [], "pagelen": null}"#,
        r#"{"values": ["a"], "size": 1, "page": 1}"#,
        r#"{"values": [], "pagelen": "10"}"#,
        r#"{"values": [], "pagelen": [10]}"#,
    ];
    for input in inputs {
        let err = decode_envelope_str(input, &options(), shape::outcome(shape::string))
            .expect_err(input);
        assert_eq!(err.kind(), ErrorKind::MissingField, "{input}");
        assert_eq!(err.field(), Some("pagelen"), "{input}");
    }
}

#[test]
fn string_element_decodes_as_success() {
    let envelope = decode_envelope_str(
        r#"{"values": ["not-a-number-expected"], "pagelen": 10}"#,
        &options(),
        shape::outcome(shape::string),
    )
    .expect("decode");
    assert_eq!(
        envelope.values,
        vec![Outcome::Success("not-a-number-expected".to_string())]
    );
}

#[test]
fn failing_elements_become_failures_with_their_index() {
    let input = br#"{"values": [1, "two", 3, null, 4.5], "pagelen": 2}"#;
    let envelope =
        decode_envelope(input, &options(), shape::outcome(shape::integer)).expect("decode");

    assert_eq!(envelope.values.len(), 5);
    assert_eq!(envelope.values[0], Outcome::Success(1));
    assert_eq!(envelope.values[2], Outcome::Success(3));

    let failures: Vec<(usize, ErrorKind, String)> = envelope
        .failures()
        .map(|(index, err)| {
            let path = err.path().map(ToString::to_string).unwrap_or_default();
            (index, err.kind(), path)
        })
        .collect();
    assert_eq!(
        failures,
        vec![
            (1, ErrorKind::TypeMismatch, "$.values[1]".to_string()),
            (3, ErrorKind::TypeMismatch, "$.values[3]".to_string()),
            (4, ErrorKind::DataCorrupted, "$.values[4]".to_string()),
        ]
    );
    for (index, err) in envelope.failures() {
        assert_eq!(err.path().and_then(|path| path.first_index()), Some(index));
    }
}

#[test]
fn nested_element_failures_keep_inner_path() {
    let item = |value: &Value, ctx: &Context| -> Result<(String, i64), Error> {
        let fields = shape::object(value, ctx)?;
        let name = shape::required_field(fields, "name", ctx, shape::string)?;
        let size = shape::required_field(fields, "size", ctx, shape::integer)?;
        Ok((name, size))
    };
    let input = br#"{"values": [{"name": "a", "size": 1}, {"name": "b"}, {"name": 3, "size": 2}], "pagelen": 3}"#;
    let envelope = decode_envelope(input, &options(), shape::outcome(item)).expect("decode");

    assert_eq!(
        envelope.values[0],
        Outcome::Success(("a".to_string(), 1))
    );
    let missing = envelope.values[1].failure().expect("missing size");
    assert_eq!(missing.kind(), ErrorKind::MissingField);
    assert_eq!(missing.field(), Some("size"));
    assert_eq!(
        missing.path().map(ToString::to_string).as_deref(),
        Some("$.values[1]")
    );

    let mistyped = envelope.values[2].failure().expect("bad name");
    assert_eq!(
        mistyped.path().map(ToString::to_string).as_deref(),
        Some("$.values[2].name")
    );
}

#[test]
fn non_taxonomy_errors_propagate_through_outcomes() {
    let strict = |value: &Value, ctx: &Context| -> Result<String, Error> {
        if value.as_str() == Some("boom") {
            return Err(Error::new(ErrorKind::Internal).with_path(ctx.path().clone()));
        }
        shape::string(value, ctx)
    };
    let input = br#"{"values": [1, "ok", "boom"], "pagelen": 3}"#;
    let err = decode_envelope(input, &options(), shape::outcome(strict)).expect_err("propagate");
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(
        err.path().map(ToString::to_string).as_deref(),
        Some("$.values[2]")
    );
}

#[test]
fn top_level_malformations_are_fatal() {
    let cases: [(&[u8], ErrorKind); 7] = [
        (b"{\"values\": [", ErrorKind::MalformedDocument),
        (b"not json", ErrorKind::MalformedDocument),
        (b"[1, 2]", ErrorKind::TypeMismatch),
        (br#"{"pagelen": 1}"#, ErrorKind::MissingField),
        (br#"{"pagelen": 1, "values": {"a": 1}}"#, ErrorKind::TypeMismatch),
        (br#"{"pagelen": 1, "values": [], "page": "1"}"#, ErrorKind::TypeMismatch),
        (br#"{"pagelen": 1, "values": [], "next": 2}"#, ErrorKind::TypeMismatch),
    ];
    for (input, kind) in cases {
        let err = decode_envelope(input, &options(), shape::outcome(shape::any))
            .expect_err("fatal");
        assert_eq!(err.kind(), kind, "{}", String::from_utf8_lossy(input));
    }

    let err = decode_envelope(b"{", &options(), shape::any).expect_err("malformed");
    assert!(err.hint().is_some_and(|hint| hint.contains("parse category")));

    let err = decode_envelope(br#"{"pagelen": 1}"#, &options(), shape::any).expect_err("values");
    assert_eq!(err.field(), Some("values"));
}

#[test]
fn values_length_is_independent_of_pagination_fields() {
    let input = br#"{"values": ["a", "b", "c"], "pagelen": 1, "size": 100, "page": 7}"#;
    let envelope = decode_envelope(input, &options(), shape::string).expect("decode");
    assert_eq!(envelope.values.len(), 3);
    assert_eq!(envelope.pagelen, 1);
    assert_eq!(envelope.size, Some(100));
}

#[test]
fn unknown_top_level_keys_are_ignored() {
    let input = br#"{"values": [true], "pagelen": 1, "extra": {"nested": []}}"#;
    let envelope = decode_envelope(input, &options(), shape::boolean).expect("decode");
    assert_eq!(envelope.values, vec![true]);
}

#[test]
fn date_policy_is_threaded_to_elements() {
    let input = br#"{"values": ["2023-09-30T10:00:00.000000+00:00", "yesterday"], "pagelen": 2}"#;
    let envelope =
        decode_envelope(input, &options(), shape::outcome(shape::date)).expect("default policy");
    assert_eq!(
        envelope.values[0],
        Outcome::Success(datetime!(2023-09-30 10:00 UTC))
    );
    assert_eq!(
        envelope.values[1].failure().map(Error::kind),
        Some(ErrorKind::DataCorrupted)
    );

    let input = br#"{"values": [1696068000], "pagelen": 1}"#;
    let unix = DecodeOptions::new().with_dates(DateParsingPolicy::UnixSeconds);
    let envelope = decode_envelope(input, &unix, shape::date).expect("unix policy");
    assert_eq!(envelope.values, vec![datetime!(2023-09-30 10:00 UTC)]);
}

#[test]
fn serialized_envelopes_decode_to_equal_values() {
    let strings = PaginatedEnvelope {
        page: Some(2),
        size: Some(41),
        pagelen: 2,
        next: Some("https://api.example.test/2.0/repositories?page=3".to_string()),
        previous: Some("https://api.example.test/2.0/repositories?page=1".to_string()),
        values: vec![
            Outcome::Success("alpha".to_string()),
            Outcome::Success("beta".to_string()),
        ],
    };
    let bytes = serde_json::to_vec(&strings).expect("serialize");
    let decoded = decode_envelope(&bytes, &options(), shape::outcome(shape::string))
        .expect("decode");
    assert_eq!(decoded, strings);

    let sparse = PaginatedEnvelope {
        page: None,
        size: None,
        pagelen: 0,
        next: None,
        previous: None,
        values: vec![json!({"id": 1}), json!(null), json!([1, "x"])],
    };
    let bytes = serde_json::to_vec(&sparse).expect("serialize");
    let text = String::from_utf8(bytes.clone()).expect("utf8");
    assert!(!text.contains("\"page\""));
    let decoded = decode_envelope(&bytes, &options(), shape::any).expect("decode");
    assert_eq!(decoded, sparse);

    let lists = PaginatedEnvelope {
        page: Some(1),
        size: None,
        pagelen: 10,
        next: None,
        previous: None,
        values: vec![vec![Some(1), None], vec![]],
    };
    let bytes = serde_json::to_vec(&lists).expect("serialize");
    let decoded = decode_envelope(&bytes, &options(), shape::list(shape::optional(shape::integer)))
        .expect("decode");
    assert_eq!(decoded, lists);
}

#[test]
fn failed_outcomes_refuse_to_serialize() {
    let envelope = decode_envelope_str(
        r#"{"values": [1], "pagelen": 1}"#,
        &options(),
        shape::outcome(shape::string),
    )
    .expect("decode");
    assert!(serde_json::to_vec(&envelope).is_err());
}
