//! Purpose: Date-parsing policy threaded through every decode call.
//! Exports: `DateParsingPolicy`, `DateFormat`, `DEFAULT_DATE_LOCALE`, `DEFAULT_DATE_PATTERN`.
//! Role: Only the `date` shape consults it; other shapes carry it along untouched.
//! Invariants: Format descriptions are compiled once, when the policy is built.
//! Notes: `time` descriptions are locale-independent; the locale is recorded, not applied.
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::format_description::{self, BorrowedFormatItem, OwnedFormatItem};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::core::context::Context;
use crate::core::error::{Error, ErrorKind};

pub const DEFAULT_DATE_LOCALE: &str = "en_US";
pub const DEFAULT_DATE_PATTERN: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]";

// Must stay in sync with DEFAULT_DATE_PATTERN.
const DEFAULT_DATE_ITEMS: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateParsingPolicy {
    Rfc3339,
    UnixSeconds,
    Formatted(DateFormat),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat {
    locale: String,
    pattern: String,
    items: OwnedFormatItem,
}

impl DateFormat {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn parse(&self, text: &str) -> Result<OffsetDateTime, time::error::Parse> {
        match OffsetDateTime::parse(text, &self.items) {
            Ok(parsed) => Ok(parsed),
            // Patterns without an offset component describe UTC wall-clock time.
            Err(offset_err) => PrimitiveDateTime::parse(text, &self.items)
                .map(PrimitiveDateTime::assume_utc)
                .map_err(|_| offset_err),
        }
    }
}

impl DateParsingPolicy {
    pub fn formatted(locale: impl Into<String>, pattern: impl Into<String>) -> Result<Self, Error> {
        let pattern = pattern.into();
        let items = format_description::parse_owned::<1>(&pattern).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("invalid date format pattern `{pattern}`"))
                .with_hint("Patterns use `time` format descriptions, e.g. `[year]-[month]-[day]`.")
                .with_source(err)
        })?;
        Ok(Self::Formatted(DateFormat {
            locale: locale.into(),
            pattern,
            items,
        }))
    }

    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Formatted(format) => Some(format.locale()),
            Self::Rfc3339 | Self::UnixSeconds => None,
        }
    }

    pub(crate) fn decode(&self, value: &Value, ctx: &Context) -> Result<OffsetDateTime, Error> {
        match (self, value) {
            (Self::UnixSeconds, Value::Number(number)) => unix_seconds(number, ctx),
            (Self::UnixSeconds, other) => Err(ctx.type_mismatch("number", other)),
            (Self::Rfc3339, Value::String(text)) => {
                OffsetDateTime::parse(text, &Rfc3339).map_err(|err| {
                    ctx.data_corrupted(format!("date `{text}` is not RFC 3339"))
                        .with_source(err)
                })
            }
            (Self::Formatted(format), Value::String(text)) => format.parse(text).map_err(|err| {
                ctx.data_corrupted(format!(
                    "date `{text}` does not match format `{}`",
                    format.pattern()
                ))
                .with_source(err)
            }),
            (Self::Rfc3339 | Self::Formatted(_), other) => Err(ctx.type_mismatch("string", other)),
        }
    }
}

impl Default for DateParsingPolicy {
    fn default() -> Self {
        Self::Formatted(DateFormat {
            locale: DEFAULT_DATE_LOCALE.to_string(),
            pattern: DEFAULT_DATE_PATTERN.to_string(),
            items: OwnedFormatItem::from(DEFAULT_DATE_ITEMS),
        })
    }
}

fn unix_seconds(number: &serde_json::Number, ctx: &Context) -> Result<OffsetDateTime, Error> {
    let result = if let Some(seconds) = number.as_i64() {
        OffsetDateTime::from_unix_timestamp(seconds)
    } else if let Some(seconds) = number.as_f64().filter(|seconds| seconds.is_finite()) {
        OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9) as i128)
    } else {
        return Err(ctx.data_corrupted(format!("timestamp {number} is out of range")));
    };
    result.map_err(|err| {
        ctx.data_corrupted(format!("timestamp {number} is out of range"))
            .with_source(err)
    })
}
