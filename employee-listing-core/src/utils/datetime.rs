//! Date-of-birth conversion helpers.
//!
//! The controller keeps dates as `NaiveDate` and converts only at the edges:
//! - Store boundary: RFC3339 interchange string (`YYYY-MM-DDT00:00:00Z`).
//!   Deserialization also accepts a bare `YYYY-MM-DD` or a Unix timestamp.
//! - Presentation boundary: [`DateDisplay`] with a strftime pattern.
//!
//! The free functions are `#[serde(with = "crate::utils::datetime")]` helpers
//! for `Option<NaiveDate>` fields; raw store rows use `deserialize_lenient`.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// en-US short date, as rendered by the portal's date picker.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// Formats a date in the interchange format sent to the record store.
#[must_use]
pub fn to_interchange(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| date.format("%Y-%m-%d").to_string())
}

/// Parses an interchange string into a calendar date.
///
/// Full timestamps keep their UTC calendar date.
pub fn parse_interchange(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
}

/// Serializes `Option<NaiveDate>` as an interchange string or `null`.
pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_some(&to_interchange(*date)),
        None => serializer.serialize_none(),
    }
}

/// Deserializes `Option<NaiveDate>` from RFC3339, `YYYY-MM-DD`, Unix timestamp,
/// `null`, or an empty string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateOrTimestamp {
        String(String),
        I64(i64),
    }

    match Option::<DateOrTimestamp>::deserialize(deserializer)? {
        Some(DateOrTimestamp::String(s)) if s.trim().is_empty() => Ok(None),
        Some(DateOrTimestamp::String(s)) => parse_interchange(&s)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("Invalid date `{s}`"))),
        Some(DateOrTimestamp::I64(ts)) => parse_unix_timestamp(ts)
            .map(|dt| Some(dt.date_naive()))
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        None => Ok(None),
    }
}

/// Like [`deserialize`], but an unreadable value is logged and read as no
/// date, so one malformed store row does not fail the whole load.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        String(String),
        I64(i64),
        Other(serde::de::IgnoredAny),
    }

    let date = match Option::<RawDate>::deserialize(deserializer)? {
        Some(RawDate::String(s)) if s.trim().is_empty() => None,
        Some(RawDate::String(s)) => {
            let parsed = parse_interchange(&s);
            if parsed.is_none() {
                log::warn!("Ignoring unreadable date `{s}`");
            }
            parsed
        }
        Some(RawDate::I64(ts)) => {
            let parsed = parse_unix_timestamp(ts).map(|dt| dt.date_naive());
            if parsed.is_none() {
                log::warn!("Ignoring out-of-range timestamp {ts}");
            }
            parsed
        }
        Some(RawDate::Other(_)) => {
            log::warn!("Ignoring date of unexpected type");
            None
        }
        None => None,
    };
    Ok(date)
}

/// Parses a Unix timestamp with second/millisecond auto-detection.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Values larger than 10^11 are interpreted as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// Localized date rendering for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateDisplay {
    pattern: String,
}

impl DateDisplay {
    /// Creates a formatter after checking the strftime pattern.
    pub fn new(pattern: &str) -> CoreResult<Self> {
        if pattern.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "date display format cannot be empty".to_string(),
            ));
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(CoreError::ValidationError(format!(
                "invalid date display format `{pattern}`"
            )));
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders a date; a missing date renders as an empty string.
    #[must_use]
    pub fn format(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| d.format(&self.pattern).to_string())
            .unwrap_or_default()
    }
}

impl Default for DateDisplay {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}
