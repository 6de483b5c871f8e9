//! Purpose: Single error type shared by the decoder, the JSON boundary, and the CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Carries the decode taxonomy plus the few non-decode failures callers can hit.
//! Invariants: Only taxonomy kinds are ever captured into `Outcome::Failure`.
//! Invariants: Exit code mapping is stable once published.
use std::error::Error as StdError;
use std::fmt;

use crate::core::path::DecodePath;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    NotFound,
    Io,
    MalformedDocument,
    MissingField,
    TypeMismatch,
    DataCorrupted,
}

impl ErrorKind {
    /// True for the decode taxonomy: the kinds an outcome shape turns into data.
    pub fn is_decode_failure(self) -> bool {
        matches!(
            self,
            ErrorKind::MalformedDocument
                | ErrorKind::MissingField
                | ErrorKind::TypeMismatch
                | ErrorKind::DataCorrupted
        )
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<DecodePath>,
    field: Option<String>,
    expected: Option<String>,
    actual: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            field: None,
            expected: None,
            actual: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn path(&self) -> Option<&DecodePath> {
        self.path.as_ref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: DecodePath) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

// The cause is deliberately left out: sources are opaque trait objects.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.path == other.path
            && self.field == other.field
            && self.expected == other.expected
            && self.actual == other.actual
            && self.hint == other.hint
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        // A message already describes field and type details.
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        } else {
            if let Some(field) = &self.field {
                write!(f, " (field: {field})")?;
            }
            match (&self.expected, &self.actual) {
                (Some(expected), Some(actual)) => {
                    write!(f, " (expected {expected}, found {actual})")?;
                }
                (Some(expected), None) => write!(f, " (expected {expected})")?,
                _ => {}
            }
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Io => 4,
        ErrorKind::MalformedDocument => 5,
        ErrorKind::MissingField => 6,
        ErrorKind::TypeMismatch => 7,
        ErrorKind::DataCorrupted => 8,
    }
}
