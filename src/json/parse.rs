//! Purpose: Provide the runtime JSON decode entrypoints and parse-failure diagnostics.
//! Exports: `from_slice`, `ParseFailureCategory`, `categorize_error`,
//! `categorize_message`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category mapping is deterministic for a given error.
//! Invariants: Hints never echo document content, only category and caller context.
//! Notes: Error mapping into the decode taxonomy is done by callsites.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Truncated,
    DepthLimit,
    Encoding,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Truncated => "truncated",
            Self::DepthLimit => "depth-limit",
            Self::Encoding => "encoding",
            Self::Unknown => "unknown",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Eof => ParseFailureCategory::Truncated,
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Io | Category::Data => ParseFailureCategory::Unknown,
        },
        category => category,
    }
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let message = message.to_ascii_lowercase();
    if message.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if message.contains("unicode")
        || message.contains("utf-8")
        || message.contains("surrogate")
        || message.contains("hex escape")
        || message.contains("control character")
        || message.contains("invalid escape")
    {
        ParseFailureCategory::Encoding
    } else if message.contains("eof while parsing") {
        ParseFailureCategory::Truncated
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}; at line {}, column {}",
        categorize_error(err).label(),
        err.line(),
        err.column()
    )
}
