//! Purpose: Decode paginated envelopes (`values` + pagination metadata).
//! Exports: `PaginatedEnvelope`, `decode_envelope`, `decode_envelope_str`, `decode_envelope_value`.
//! Role: Top-level decode entrypoint; per-element work is delegated to a caller-supplied shape.
//! Invariants: Any malformed top-level field fails the whole decode.
//! Invariants: `values` keeps source order; its length is never checked against `pagelen`/`size`.
//! Invariants: Element failures are fatal unless the shape captures them (e.g. `shape::outcome`).
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::core::context::{Context, DecodeOptions};
use crate::core::error::{Error, ErrorKind};
use crate::core::outcome::Outcome;
use crate::core::shape::{integer, object, optional_field, required_field, string};
use crate::json::parse;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaginatedEnvelope<E> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    pub pagelen: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub values: Vec<E>,
}

impl<E> PaginatedEnvelope<E> {
    pub fn is_last_page(&self) -> bool {
        self.next.is_none()
    }

    pub fn map_values<U>(self, f: impl FnMut(E) -> U) -> PaginatedEnvelope<U> {
        PaginatedEnvelope {
            page: self.page,
            size: self.size,
            pagelen: self.pagelen,
            next: self.next,
            previous: self.previous,
            values: self.values.into_iter().map(f).collect(),
        }
    }
}

impl<T> PaginatedEnvelope<Outcome<T>> {
    /// Successfully decoded elements with their position in `values`.
    pub fn successes(&self) -> impl Iterator<Item = (usize, &T)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.success().map(|value| (index, value)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.failure().map(|err| (index, err)))
    }
}

pub fn decode_envelope<E, F>(
    bytes: &[u8],
    options: &DecodeOptions,
    shape: F,
) -> Result<PaginatedEnvelope<E>, Error>
where
    F: Fn(&Value, &Context) -> Result<E, Error>,
{
    let document: Value = parse::from_slice(bytes).map_err(|err| {
        Error::new(ErrorKind::MalformedDocument)
            .with_message("envelope is not valid JSON")
            .with_hint(parse::hint_for_error(&err, "envelope"))
            .with_source(err)
    })?;
    let ctx = Context::new(options.clone());
    decode_envelope_value(&document, &ctx, shape)
}

pub fn decode_envelope_str<E, F>(
    input: &str,
    options: &DecodeOptions,
    shape: F,
) -> Result<PaginatedEnvelope<E>, Error>
where
    F: Fn(&Value, &Context) -> Result<E, Error>,
{
    decode_envelope(input.as_bytes(), options, shape)
}

/// Decode an already-parsed envelope located at `ctx`.
pub fn decode_envelope_value<E, F>(
    document: &Value,
    ctx: &Context,
    shape: F,
) -> Result<PaginatedEnvelope<E>, Error>
where
    F: Fn(&Value, &Context) -> Result<E, Error>,
{
    let fields = object(document, ctx)?;

    let page = optional_field(fields, "page", ctx, integer)?;
    let size = optional_field(fields, "size", ctx, integer)?;
    let pagelen = required_field(fields, "pagelen", ctx, integer).map_err(|err| {
        if err.kind() == ErrorKind::MissingField {
            err
        } else {
            ctx.missing_field("pagelen")
                .with_message("field `pagelen` is missing or not an integer")
                .with_source(err)
        }
    })?;
    let next = optional_field(fields, "next", ctx, string)?;
    let previous = optional_field(fields, "previous", ctx, string)?;

    let values_ctx = ctx.key("values");
    let items = match fields.get("values") {
        None | Some(Value::Null) => return Err(ctx.missing_field("values")),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(values_ctx.type_mismatch("array", other)),
    };

    let values = items
        .iter()
        .enumerate()
        .map(|(index, item)| shape(item, &values_ctx.index(index)))
        .collect::<Result<Vec<E>, Error>>()?;

    debug!(
        path = %ctx.path(),
        page = ?page,
        pagelen,
        values = values.len(),
        "decoded paginated envelope"
    );

    Ok(PaginatedEnvelope {
        page,
        size,
        pagelen,
        next,
        previous,
        values,
    })
}
