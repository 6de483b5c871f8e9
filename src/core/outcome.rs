//! Purpose: Result-like element wrapper that turns decode failures into data.
//! Exports: `Outcome`, `decode_outcome`.
//! Role: Lets one malformed element sit beside well-formed ones in an envelope.
//! Invariants: Only decode-taxonomy errors are captured; every other kind propagates.
//! Invariants: Serializes as the success payload; a captured failure refuses to serialize.
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::core::context::Context;
use crate::core::error::Error;

#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Error),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(err) => Outcome::Failure(err),
        }
    }

    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(err),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(value) => value.serialize(serializer),
            Self::Failure(err) => Err(S::Error::custom(format!(
                "failed outcome cannot be serialized: {err}"
            ))),
        }
    }
}

/// Decode a single value with `shape`, capturing taxonomy failures as `Outcome::Failure`.
pub fn decode_outcome<T, F>(value: &Value, ctx: &Context, shape: F) -> Result<Outcome<T>, Error>
where
    F: Fn(&Value, &Context) -> Result<T, Error>,
{
    match shape(value, ctx) {
        Ok(decoded) => Ok(Outcome::Success(decoded)),
        Err(err) if err.kind().is_decode_failure() => {
            trace!(path = %ctx.path(), kind = ?err.kind(), "captured element failure");
            Ok(Outcome::Failure(err))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::{Outcome, decode_outcome};
    use crate::core::context::{Context, DecodeOptions};
    use crate::core::error::{Error, ErrorKind};
    use serde_json::{Value, json};

    fn ctx() -> Context {
        Context::new(DecodeOptions::new())
    }

    fn string_shape(value: &Value, ctx: &Context) -> Result<String, Error> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ctx.type_mismatch("string", value))
    }

    #[test]
    fn success_is_wrapped() {
        let outcome = decode_outcome(&json!("hi"), &ctx(), string_shape).expect("decode");
        assert_eq!(outcome, Outcome::Success("hi".to_string()));
        assert!(outcome.is_success());
        assert_eq!(outcome.success().map(String::as_str), Some("hi"));
    }

    #[test]
    fn taxonomy_failure_is_captured() {
        let ctx = ctx().key("values").index(0);
        let outcome = decode_outcome(&json!(42), &ctx, string_shape).expect("decode");
        let err = outcome.failure().expect("failure");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path().and_then(|path| path.first_index()), Some(0));
    }

    #[test]
    fn other_failures_propagate() {
        let failing = |_: &Value, _: &Context| -> Result<String, Error> {
            Err(Error::new(ErrorKind::Internal).with_message("decoder bug"))
        };
        let err = decode_outcome(&json!("hi"), &ctx(), failing).expect_err("propagates");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn conversions_round_trip_through_result() {
        let outcome = Outcome::from(Ok::<u8, Error>(3));
        assert_eq!(outcome.map(|n| n * 2).into_result().expect("ok"), 6);

        let outcome = Outcome::from(Err::<u8, Error>(Error::new(ErrorKind::DataCorrupted)));
        assert!(outcome.is_failure());
        assert_eq!(
            outcome.into_result().expect_err("err").kind(),
            ErrorKind::DataCorrupted
        );
    }

    #[test]
    fn serialization_emits_payload_or_fails() {
        let ok = Outcome::Success(json!({"a": 1}));
        assert_eq!(serde_json::to_value(&ok).expect("serialize"), json!({"a": 1}));

        let failed: Outcome<Value> = Outcome::Failure(Error::new(ErrorKind::TypeMismatch));
        assert!(serde_json::to_value(&failed).is_err());
    }
}
