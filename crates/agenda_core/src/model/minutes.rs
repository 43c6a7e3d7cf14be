//! Normalized minute quantities.
//!
//! # Responsibility
//! - Turn persisted duration values of any shape into one strict numeric type.
//! - Keep minute arithmetic numeric so cumulative sums can never concatenate.
//!
//! # Invariants
//! - The wrapped value is always finite and `>= 0`.
//! - Lenient decoding never fails; unusable inputs become zero.

use chrono::Duration;
use log::debug;
use serde::de::{Deserializer, Error as DeError, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;

/// Non-negative, finite amount of minutes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Minutes(f64);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0.0);

    /// Wraps `value`, clamping negatives, NaN and infinities to zero.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    /// Strictly parses a textual minute value such as `"10"` or `" 2.5 "`.
    ///
    /// # Errors
    /// - Returns an error for blank, non-numeric, non-finite or negative input.
    pub fn parse(raw: &str) -> Result<Self, MinutesParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MinutesParseError::Empty);
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| MinutesParseError::NotNumeric(trimmed.to_string()))?;
        if !value.is_finite() {
            return Err(MinutesParseError::NotFinite(trimmed.to_string()));
        }
        if value < 0.0 {
            return Err(MinutesParseError::Negative(value));
        }
        Ok(Self::new(value))
    }

    /// Parses like [`Minutes::parse`] but falls back to zero on failure.
    pub fn parse_lenient(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(minutes) => minutes,
            Err(err) => {
                debug!("event=minutes_normalized module=model status=fallback reason=\"{err}\"");
                Self::ZERO
            }
        }
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Whole seconds, rounded to the nearest second.
    pub fn as_seconds(self) -> i64 {
        (self.0 * 60.0).round() as i64
    }

    /// Signed chrono duration, rounded to whole milliseconds.
    pub fn to_duration(self) -> Duration {
        let millis = (self.0 * 60_000.0).round();
        if millis >= i64::MAX as f64 {
            Duration::MAX
        } else {
            Duration::milliseconds(millis as i64)
        }
    }
}

impl From<u32> for Minutes {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Minutes) -> Minutes {
        let sum = self.0 + rhs.0;
        if sum.is_finite() {
            Minutes(sum)
        } else {
            Minutes(f64::MAX)
        }
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Self {
        iter.fold(Minutes::ZERO, Add::add)
    }
}

impl Display for Minutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strict minute parsing failure.
#[derive(Debug, Clone, PartialEq)]
pub enum MinutesParseError {
    /// Input was blank after trim.
    Empty,
    /// Input is not a number.
    NotNumeric(String),
    /// Input parsed as NaN or infinity.
    NotFinite(String),
    /// Input is below zero.
    Negative(f64),
}

impl Display for MinutesParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "minutes value must not be blank"),
            Self::NotNumeric(raw) => write!(f, "minutes value `{raw}` is not numeric"),
            Self::NotFinite(raw) => write!(f, "minutes value `{raw}` is not finite"),
            Self::Negative(value) => write!(f, "minutes value {value} must be >= 0"),
        }
    }
}

impl Error for MinutesParseError {}

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Minutes {
    /// Accepts numbers and numeric strings; any other shape decodes as zero.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientMinutesVisitor)
    }
}

struct LenientMinutesVisitor;

impl<'de> Visitor<'de> for LenientMinutesVisitor {
    type Value = Minutes;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a duration in minutes as a number or numeric string")
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<Minutes, E> {
        Ok(Minutes::new(value as f64))
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<Minutes, E> {
        Ok(Minutes::new(value as f64))
    }

    fn visit_f64<E: DeError>(self, value: f64) -> Result<Minutes, E> {
        Ok(Minutes::new(value))
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Minutes, E> {
        Ok(Minutes::parse_lenient(value))
    }

    fn visit_bool<E: DeError>(self, _value: bool) -> Result<Minutes, E> {
        debug!("event=minutes_normalized module=model status=fallback reason=bool");
        Ok(Minutes::ZERO)
    }

    fn visit_unit<E: DeError>(self) -> Result<Minutes, E> {
        Ok(Minutes::ZERO)
    }

    fn visit_none<E: DeError>(self) -> Result<Minutes, E> {
        Ok(Minutes::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Minutes, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Minutes, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        debug!("event=minutes_normalized module=model status=fallback reason=sequence");
        Ok(Minutes::ZERO)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Minutes, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        debug!("event=minutes_normalized module=model status=fallback reason=map");
        Ok(Minutes::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::{Minutes, MinutesParseError};

    #[test]
    fn new_clamps_unusable_values() {
        assert_eq!(Minutes::new(-5.0), Minutes::ZERO);
        assert_eq!(Minutes::new(f64::NAN), Minutes::ZERO);
        assert_eq!(Minutes::new(f64::INFINITY), Minutes::ZERO);
        assert_eq!(Minutes::new(12.5).as_f64(), 12.5);
    }

    #[test]
    fn parse_trims_and_rejects_garbage() {
        assert_eq!(Minutes::parse(" 10 ").unwrap(), Minutes::from(10));
        assert_eq!(Minutes::parse("  ").unwrap_err(), MinutesParseError::Empty);
        assert!(matches!(
            Minutes::parse("ten"),
            Err(MinutesParseError::NotNumeric(_))
        ));
        assert!(matches!(
            Minutes::parse("inf"),
            Err(MinutesParseError::NotFinite(_))
        ));
        assert_eq!(
            Minutes::parse("-3").unwrap_err(),
            MinutesParseError::Negative(-3.0)
        );
    }

    #[test]
    fn textual_values_sum_numerically() {
        let total: Minutes = ["10", "10", "20"]
            .into_iter()
            .map(Minutes::parse_lenient)
            .sum();
        assert_eq!(total, Minutes::from(40));
    }

    #[test]
    fn unit_conversions_round() {
        assert_eq!(Minutes::new(1.5).as_seconds(), 90);
        assert_eq!(Minutes::from(10).to_duration().num_seconds(), 600);
        assert_eq!(Minutes::new(0.0001).to_duration().num_milliseconds(), 6);
    }

    #[test]
    fn lenient_decoding_accepts_mixed_shapes() {
        let decoded: Vec<Minutes> =
            serde_json::from_str(r#"[10, "10", 2.5, " 7 ", null, "abc", true, -4, [1], {"a": 1}]"#)
                .unwrap();
        let raw: Vec<f64> = decoded.into_iter().map(Minutes::as_f64).collect();
        assert_eq!(raw, vec![10.0, 10.0, 2.5, 7.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
