//! Purpose: Element decoders ("shapes") and the combinators that nest them.
//! Exports: primitive shapes, `optional`, `list`, `outcome`, `map`, field helpers.
//! Role: Decode strategies passed explicitly to the envelope decoder.
//! Invariants: Every shape has the form `Fn(&Value, &Context) -> Result<T, Error>`.
//! Invariants: Failures are taxonomy errors located at the context path.
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::core::context::Context;
use crate::core::error::Error;
use crate::core::outcome::{Outcome, decode_outcome};

pub fn string(value: &Value, ctx: &Context) -> Result<String, Error> {
    match value {
        Value::String(text) => Ok(text.clone()),
        other => Err(ctx.type_mismatch("string", other)),
    }
}

/// Signed 64-bit integer; integral floats such as `10.0` are accepted.
pub fn integer(value: &Value, ctx: &Context) -> Result<i64, Error> {
    let Value::Number(number) = value else {
        return Err(ctx.type_mismatch("integer", value));
    };
    if let Some(int) = number.as_i64() {
        return Ok(int);
    }
    match number.as_f64() {
        Some(float)
            if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 =>
        {
            Ok(float as i64)
        }
        _ => Err(ctx.data_corrupted(format!(
            "number {number} does not fit in a 64-bit signed integer"
        ))),
    }
}

pub fn number(value: &Value, ctx: &Context) -> Result<f64, Error> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ctx.data_corrupted(format!("number {number} is not representable"))),
        other => Err(ctx.type_mismatch("number", other)),
    }
}

pub fn boolean(value: &Value, ctx: &Context) -> Result<bool, Error> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        other => Err(ctx.type_mismatch("boolean", other)),
    }
}

pub fn any(value: &Value, _ctx: &Context) -> Result<Value, Error> {
    Ok(value.clone())
}

/// Date interpreted through the context's `DateParsingPolicy`.
pub fn date(value: &Value, ctx: &Context) -> Result<OffsetDateTime, Error> {
    ctx.options().dates.decode(value, ctx)
}

pub fn optional<T, F>(inner: F) -> impl Fn(&Value, &Context) -> Result<Option<T>, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
{
    move |value: &Value, ctx: &Context| match value {
        Value::Null => Ok(None),
        other => inner(other, ctx).map(Some),
    }
}

pub fn list<T, F>(inner: F) -> impl Fn(&Value, &Context) -> Result<Vec<T>, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
{
    move |value: &Value, ctx: &Context| -> Result<Vec<T>, Error> {
        let Value::Array(items) = value else {
            return Err(ctx.type_mismatch("array", value));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| inner(item, &ctx.index(index)))
            .collect()
    }
}

pub fn outcome<T, F>(inner: F) -> impl Fn(&Value, &Context) -> Result<Outcome<T>, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
{
    move |value: &Value, ctx: &Context| decode_outcome(value, ctx, &inner)
}

pub fn map<T, U, F, G>(inner: F, f: G) -> impl Fn(&Value, &Context) -> Result<U, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
    G: Fn(T) -> U,
{
    move |value: &Value, ctx: &Context| inner(value, ctx).map(&f)
}

pub fn object<'v>(value: &'v Value, ctx: &Context) -> Result<&'v Map<String, Value>, Error> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ctx.type_mismatch("object", other)),
    }
}

/// Absent or `null` is `MissingField`; anything else is handed to `shape` at `ctx.key`.
pub fn required_field<T, F>(
    map: &Map<String, Value>,
    key: &str,
    ctx: &Context,
    shape: F,
) -> Result<T, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
{
    match map.get(key) {
        None | Some(Value::Null) => Err(ctx.missing_field(key)),
        Some(value) => shape(value, &ctx.key(key)),
    }
}

pub fn optional_field<T, F>(
    map: &Map<String, Value>,
    key: &str,
    ctx: &Context,
    shape: F,
) -> Result<Option<T>, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
{
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => shape(value, &ctx.key(key)).map(Some),
    }
}
