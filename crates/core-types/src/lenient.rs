//! Forgiving field decoders for store rows.
//!
//! A single malformed value must degrade that field, never reject the whole
//! record: numbers may arrive as strings, identifiers as integers, and blank
//! strings mean "absent". Nested objects and arrays are skipped as absent.

use crate::enums::BetStatus;
use crate::time;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::str::FromStr;

enum Scalar {
    Text(String),
    Number(Decimal),
    Flag(bool),
    Absent,
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        if !v.is_finite() {
            return Ok(Scalar::Absent);
        }
        // Display gives the shortest round-trip form, so 0.1 stays 0.1.
        Ok(Decimal::from_str(&v.to_string())
            .map(Scalar::Number)
            .unwrap_or(Scalar::Absent))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            Ok(Scalar::Absent)
        } else {
            Ok(Scalar::Text(trimmed.to_string()))
        }
    }

    fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::Absent)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::Absent)
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Scalar, E> {
        Ok(Decimal::try_from_i128_with_scale(v, 0).map_or(Scalar::Absent, Scalar::Number))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Scalar, E> {
        Ok(i128::try_from(v)
            .ok()
            .and_then(|v| Decimal::try_from_i128_with_scale(v, 0).ok())
            .map_or(Scalar::Absent, Scalar::Number))
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<Scalar, E> {
        Ok(Scalar::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Scalar, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Scalar, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Scalar::Absent)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scalar, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Scalar::Absent)
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Scalar, D::Error> {
    deserializer.deserialize_any(ScalarVisitor)
}

/// A decimal that may be null, numeric, or a numeric string.
pub fn optional_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    Ok(optional_decimal_from(scalar(deserializer)?))
}

fn optional_decimal_from(value: Scalar) -> Option<Decimal> {
    match value {
        Scalar::Number(n) => Some(n),
        Scalar::Text(s) => Decimal::from_str(&s)
            .or_else(|_| Decimal::from_scientific(&s))
            .ok(),
        Scalar::Flag(_) | Scalar::Absent => None,
    }
}

/// Like `optional_decimal`, with missing values resolved to zero.
pub fn decimal_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(optional_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Free text that may be null, blank, or a bare number.
pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match scalar(deserializer)? {
        Scalar::Text(s) => Some(s),
        Scalar::Number(n) => Some(n.to_string()),
        Scalar::Flag(_) | Scalar::Absent => None,
    })
}

/// Identifier columns; integer keys are stringified, absent keys become empty.
pub fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// A settlement status; anything that is not a recognised string is pending.
pub fn status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BetStatus, D::Error> {
    Ok(match scalar(deserializer)? {
        Scalar::Text(s) => BetStatus::from(s),
        _ => BetStatus::Pending,
    })
}

/// A boolean flag. `"true"`/`"false"` strings are honoured, everything else is `false`.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match scalar(deserializer)? {
        Scalar::Flag(v) => v,
        Scalar::Text(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// A non-negative count. Fractions are truncated; negative or non-numeric values are zero.
pub fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = optional_decimal_from(scalar(deserializer)?);
    Ok(value
        .filter(|n| n.is_sign_positive())
        .and_then(|n| n.trunc().to_u64())
        .unwrap_or(0))
}

/// A UTC instant. Offsets are converted; naive and date-only values are read as UTC.
pub fn optional_utc_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Scalar::Text(raw) = scalar(deserializer)? else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    Ok(time::parse_timestamp(&raw).ok().map(|naive| naive.and_utc()))
}
