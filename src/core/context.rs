//! Purpose: Decode options and the per-value context handed to every shape.
//! Exports: `DecodeOptions`, `Context`, `json_type_name`.
//! Role: Threads configuration and the current path through nested decodes.
//! Invariants: Options are shared immutably by all contexts of one decode call.
//! Invariants: Taxonomy errors built here are always located at the context path.
use std::sync::Arc;

use serde_json::Value;

use crate::core::date::DateParsingPolicy;
use crate::core::error::{Error, ErrorKind};
use crate::core::path::DecodePath;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub dates: DateParsingPolicy,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dates(mut self, dates: DateParsingPolicy) -> Self {
        self.dates = dates;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Context {
    options: Arc<DecodeOptions>,
    path: DecodePath,
}

impl Context {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options: Arc::new(options),
            path: DecodePath::root(),
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn path(&self) -> &DecodePath {
        &self.path
    }

    pub fn key(&self, key: &str) -> Self {
        Self {
            options: Arc::clone(&self.options),
            path: self.path.key(key),
        }
    }

    pub fn index(&self, index: usize) -> Self {
        Self {
            options: Arc::clone(&self.options),
            path: self.path.index(index),
        }
    }

    pub fn type_mismatch(&self, expected: &str, actual: &Value) -> Error {
        Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "expected {expected}, found {}",
                json_type_name(actual)
            ))
            .with_expected(expected)
            .with_actual(json_type_name(actual))
            .with_path(self.path.clone())
    }

    pub fn missing_field(&self, field: &str) -> Error {
        Error::new(ErrorKind::MissingField)
            .with_message(format!("missing required field `{field}`"))
            .with_field(field)
            .with_path(self.path.clone())
    }

    pub fn data_corrupted(&self, message: impl Into<String>) -> Error {
        Error::new(ErrorKind::DataCorrupted)
            .with_message(message)
            .with_path(self.path.clone())
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
