//! Relative time grammar.
//!
//! Two range forms are understood:
//! - sliding windows, `last [N] <unit>`, ending at the supplied "now"
//! - absolute windows, `<datetime> to <datetime>`
//!
//! Durations use the same unit vocabulary (`1 hour`, `90m`, `1.5 days`)
//! and keep their fractional part; range bounds are whole epoch seconds.

use crate::zone::Zone;
use appreport_types::{Error, Result};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static SLIDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^last(?:\s+(?P<count>[0-9]*\.?[0-9]+))?\s+(?P<unit>[a-z]+)$").unwrap()
});

static WINDOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?P<from>.+?)\s+to\s+(?P<to>.+)$").unwrap());

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<count>[+-]?[0-9]*\.?[0-9]+)?\s*(?P<unit>[a-z]+)$").unwrap()
});

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Unit of a relative time expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(TimeUnit::Second),
            "m" | "min" | "mins" | "minute" | "minutes" => Some(TimeUnit::Minute),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(TimeUnit::Hour),
            "d" | "day" | "days" => Some(TimeUnit::Day),
            "w" | "week" | "weeks" => Some(TimeUnit::Week),
            _ => None,
        }
    }

    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3_600,
            TimeUnit::Day => 86_400,
            TimeUnit::Week => 604_800,
        }
    }
}

/// Parse a duration such as `1 hour` or `1.5 s` into seconds, fraction kept
pub fn parse_duration(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let caps = DURATION_RE
        .captures(trimmed)
        .ok_or_else(|| Error::time_parse(text, "expected '<N> <unit>', e.g. '1 hour'"))?;

    let unit = parse_unit(text, &caps["unit"])?;
    let count = match caps.name("count") {
        Some(count) => parse_count(text, count.as_str())?,
        None => 1.0,
    };

    scaled(text, count, unit)
}

/// Resolve a range phrase into `(start, end)` epoch seconds.
///
/// `now` anchors sliding windows, `now` tokens and time-only values.
/// Naive datetimes are read in `zone`.
pub fn parse_range(text: &str, now: DateTime<Utc>, zone: Zone) -> Result<(i64, i64)> {
    let trimmed = text.trim();

    if let Some(caps) = SLIDING_RE.captures(trimmed) {
        let unit = parse_unit(text, &caps["unit"])?;
        let count = match caps.name("count") {
            Some(count) => parse_count(text, count.as_str())?,
            None => 1.0,
        };
        let span = scaled(text, count, unit)?.trunc() as i64;
        let end = now.timestamp();
        let start = end
            .checked_sub(span)
            .ok_or_else(|| Error::time_parse(text, "window reaches before the earliest time"))?;
        return Ok((start, end));
    }

    if let Some(caps) = WINDOW_RE.captures(trimmed) {
        let start = parse_datetime(&caps["from"], now, zone)?;
        let end = parse_datetime(&caps["to"], now, zone)?;
        return Ok((start.timestamp(), end.timestamp()));
    }

    Err(Error::time_parse(
        text,
        "expected 'last <N> <unit>' or '<datetime> to <datetime>'",
    ))
}

/// Parse a single point in time.
///
/// Accepts RFC 3339, US style `MM/DD/YY HH:MM[:SS]`, ISO style
/// `YYYY-MM-DD HH:MM[:SS]`, bare dates (midnight), bare times (today)
/// and the word `now`.
pub fn parse_datetime(
    text: &str,
    now: DateTime<Utc>,
    zone: Zone,
) -> Result<DateTime<FixedOffset>> {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("now") {
        return Ok(now.fixed_offset());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
                .map(|time| zone.today(now).and_time(time))
        })
        .ok_or_else(|| Error::time_parse(text, "unrecognized date/time format"))?;

    match zone.localize(naive) {
        LocalResult::Single(parsed) => Ok(parsed),
        LocalResult::Ambiguous(..) => Err(Error::time_parse(
            text,
            "time is ambiguous in the configured zone",
        )),
        LocalResult::None => Err(Error::time_parse(
            text,
            "time does not exist in the configured zone",
        )),
    }
}

fn parse_unit(input: &str, unit: &str) -> Result<TimeUnit> {
    TimeUnit::parse(unit)
        .ok_or_else(|| Error::time_parse(input, format!("unknown time unit '{}'", unit)))
}

fn parse_count(input: &str, count: &str) -> Result<f64> {
    let value: f64 = count
        .parse()
        .map_err(|_| Error::time_parse(input, format!("invalid number '{}'", count)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(Error::time_parse(input, "amount must be a non-negative number"));
    }

    Ok(value)
}

fn scaled(input: &str, count: f64, unit: TimeUnit) -> Result<f64> {
    let seconds = count * unit.seconds() as f64;

    if seconds >= i64::MAX as f64 {
        return Err(Error::time_parse(input, "duration is too large"));
    }

    Ok(seconds)
}
