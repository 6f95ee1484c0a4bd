//! Type coercion for free-text form inputs and loosely typed store values.

use serde::{Deserialize, Deserializer};

/// Parses an experience input the way a numeric text field is read.
///
/// Leading whitespace and an optional `+` are skipped and the leading run of
/// digits is used, so `"12 years"` reads as 12. Empty, non-numeric or negative
/// input yields 0; values past `u32::MAX` are clamped.
#[must_use]
pub fn parse_experience(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// Clamps a raw store value into a non-negative year count.
#[must_use]
pub fn clamp_experience(raw: i64) -> u32 {
    u32::try_from(raw).unwrap_or(if raw < 0 { 0 } else { u32::MAX })
}

/// Reads a store `Experience` cell as a whole number.
///
/// Integers pass through, floats are truncated, numeric strings are parsed
/// like form input. Anything else is logged and read as missing.
pub fn deserialize_experience<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        I64(i64),
        U64(u64),
        F64(f64),
        String(String),
        Other(serde::de::IgnoredAny),
    }

    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::I64(n)) => Some(n),
        Some(RawNumber::U64(n)) => Some(i64::try_from(n).unwrap_or(i64::MAX)),
        Some(RawNumber::F64(n)) => Some(truncate_float(n)),
        Some(RawNumber::String(s)) => Some(i64::from(parse_experience(&s))),
        Some(RawNumber::Other(_)) => {
            log::warn!("Ignoring experience of unexpected type");
            None
        }
        None => None,
    };
    Ok(value)
}

// `as` saturates and maps NaN to 0.
#[allow(clippy::cast_possible_truncation)]
fn truncate_float(value: f64) -> i64 {
    value.trunc() as i64
}
