//! Instant parsing for persisted meeting and topic records.
//!
//! # Responsibility
//! - Accept the instant shapes the persistence layer hands us.
//! - Normalize every accepted shape to `DateTime<Utc>`.
//!
//! # Invariants
//! - Strings without an explicit offset are read as UTC.
//! - Lenient decoding never fails; unusable values decode as absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use serde::de::{Deserializer, Error as DeError, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict instant parsing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantParseError {
    /// Input was blank after trim.
    Empty,
    /// Input matched none of the accepted formats.
    Unrecognized(String),
}

impl Display for InstantParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "instant must not be blank"),
            Self::Unrecognized(raw) => write!(f, "unrecognized instant `{raw}`"),
        }
    }
}

impl Error for InstantParseError {}

/// Parses RFC 3339, offset-less ISO-8601 date-times and plain dates.
///
/// # Errors
/// - Returns an error when `raw` is blank or matches no accepted format.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, InstantParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InstantParseError::Empty);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, NAIVE_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| InstantParseError::Unrecognized(trimmed.to_string()))
}

/// Serde adapter for optional instant fields.
///
/// Accepts instant strings, epoch milliseconds and `{seconds, nanoseconds}`
/// timestamp objects. Anything else decodes as `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientInstantVisitor)
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

fn from_timestamp_parts(seconds: f64, nanoseconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || !nanoseconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let carried = ((seconds - whole) * 1e9 + nanoseconds).round();
    if !(0.0..2e9).contains(&carried) {
        return None;
    }
    let extra_seconds = (carried / 1e9).floor();
    DateTime::from_timestamp(
        (whole + extra_seconds) as i64,
        (carried - extra_seconds * 1e9) as u32,
    )
}

struct LenientInstantVisitor;

impl<'de> Visitor<'de> for LenientInstantVisitor {
    type Value = Option<DateTime<Utc>>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an instant string, epoch milliseconds or a timestamp object")
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
        match parse_instant(value) {
            Ok(instant) => Ok(Some(instant)),
            Err(err) => {
                debug!("event=instant_normalized module=model status=fallback reason=\"{err}\"");
                Ok(None)
            }
        }
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
        Ok(DateTime::from_timestamp_millis(value))
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(value)
            .ok()
            .and_then(DateTime::from_timestamp_millis))
    }

    fn visit_f64<E: DeError>(self, value: f64) -> Result<Self::Value, E> {
        Ok(from_epoch_millis(value))
    }

    fn visit_bool<E: DeError>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: DeError>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut seconds = None;
        let mut nanoseconds = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "seconds" | "_seconds" => seconds = map.next_value::<LooseNumber>()?.0,
                "nanoseconds" | "_nanoseconds" => nanoseconds = map.next_value::<LooseNumber>()?.0,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(seconds.and_then(|seconds| from_timestamp_parts(seconds, nanoseconds.unwrap_or(0.0))))
    }
}

/// Number-or-numeric-string field inside a timestamp object.
struct LooseNumber(Option<f64>);

impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LooseNumberVisitor)
    }
}

struct LooseNumberVisitor;

impl<'de> Visitor<'de> for LooseNumberVisitor {
    type Value = LooseNumber;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a number")
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<LooseNumber, E> {
        Ok(LooseNumber(Some(value as f64)))
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<LooseNumber, E> {
        Ok(LooseNumber(Some(value as f64)))
    }

    fn visit_f64<E: DeError>(self, value: f64) -> Result<LooseNumber, E> {
        Ok(LooseNumber(Some(value)))
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<LooseNumber, E> {
        Ok(LooseNumber(value.trim().parse().ok()))
    }

    fn visit_bool<E: DeError>(self, _value: bool) -> Result<LooseNumber, E> {
        Ok(LooseNumber(None))
    }

    fn visit_unit<E: DeError>(self) -> Result<LooseNumber, E> {
        Ok(LooseNumber(None))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LooseNumber, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LooseNumber(None))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LooseNumber, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LooseNumber(None))
    }
}
