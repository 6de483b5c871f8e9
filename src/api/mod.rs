//! Purpose: Define the stable public Rust API boundary for pagedecode.
//! Exports: Decode entrypoints, envelope/outcome types, options, errors, and shapes.
//! Role: Public, additive-only surface; the CLI only goes through this module.
//! Invariants: Shapes are re-exported as a module so call sites read `shape::outcome(shape::string)`.

pub use crate::core::context::{Context, DecodeOptions, json_type_name};
pub use crate::core::date::{DEFAULT_DATE_LOCALE, DEFAULT_DATE_PATTERN, DateFormat, DateParsingPolicy};
pub use crate::core::envelope::{
    PaginatedEnvelope, decode_envelope, decode_envelope_str, decode_envelope_value,
};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::outcome::{Outcome, decode_outcome};
pub use crate::core::path::{DecodePath, PathSegment};
pub use crate::core::shape;

/// The element failure carried by `Outcome::Failure`.
pub type DecodeError = Error;
