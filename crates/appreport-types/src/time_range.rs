use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved absolute time window in epoch seconds.
///
/// Either both bounds are set or neither is. An unbounded range means
/// "no time filtering" and is only meaningful for static sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange", into = "RawTimeRange")]
pub struct TimeRange {
    window: Option<(i64, i64)>,
}

impl TimeRange {
    /// Range that applies no time filtering
    pub fn unbounded() -> Self {
        Self { window: None }
    }

    /// Concrete window; bounds are kept exactly as given
    pub fn between(start: i64, end: i64) -> Self {
        Self {
            window: Some((start, end)),
        }
    }

    pub fn start(&self) -> Option<i64> {
        self.window.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<i64> {
        self.window.map(|(_, end)| end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.window.is_none()
    }

    /// Width of the window in seconds; `None` when unbounded or too wide for `i64`
    pub fn duration_secs(&self) -> Option<i64> {
        self.window.and_then(|(start, end)| end.checked_sub(start))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.window {
            Some((start, end)) => write!(f, "TimeRange(start={}, end={})", start, end),
            None => write!(f, "TimeRange(start=None, end=None)"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawTimeRange {
    #[serde(default)]
    start: Option<i64>,
    #[serde(default)]
    end: Option<i64>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = String;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        match (raw.start, raw.end) {
            (Some(start), Some(end)) => Ok(TimeRange::between(start, end)),
            (None, None) => Ok(TimeRange::unbounded()),
            (start, end) => Err(format!(
                "time range needs both start and end or neither (start={:?}, end={:?})",
                start, end
            )),
        }
    }
}

impl From<TimeRange> for RawTimeRange {
    fn from(range: TimeRange) -> Self {
        RawTimeRange {
            start: range.start(),
            end: range.end(),
        }
    }
}
