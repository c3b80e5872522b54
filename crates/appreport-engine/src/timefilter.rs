use crate::clock::{Clock, SystemClock};
use crate::timeparse;
use crate::zone::Zone;
use appreport_types::{Error, Result, TimeRange};
use tracing::debug;

/// Raw, loosely specified time inputs as a caller collected them.
///
/// Blank strings count as absent. Integer bounds are present whenever
/// they are `Some`, including `Some(0)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeFilterInput {
    /// Start time in epoch seconds
    pub start: Option<i64>,
    /// End time in epoch seconds
    pub end: Option<i64>,
    /// Duration phrase, e.g. `1 hour`
    pub duration: Option<String>,
    /// Range phrase, e.g. `last 1 hour` or `4/21/13 4:00 to 4/21/13 5:00`
    pub time_range: Option<String>,
}

impl TimeFilterInput {
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = Some(time_range.into());
        self
    }

    /// True when no input at all was supplied
    pub fn is_empty(&self) -> bool {
        matches!(TimeSpec::classify(self), Ok(TimeSpec::Empty))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// The one way a time window is derived from a [`TimeFilterInput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSpec {
    /// No time filtering
    Empty,
    /// Both bounds given
    Absolute { start: i64, end: i64 },
    /// Range phrase
    Relative(String),
    /// Start plus duration phrase
    StartDuration { start: i64, duration: String },
    /// End minus duration phrase
    EndDuration { end: i64, duration: String },
}

impl TimeSpec {
    /// Classify the raw inputs, rejecting any combination that does not
    /// select exactly one variant.
    pub fn classify(input: &TimeFilterInput) -> Result<Self> {
        let duration = non_blank(&input.duration);
        let time_range = non_blank(&input.time_range);

        match (input.start, input.end, duration, time_range) {
            (None, None, None, None) => Ok(TimeSpec::Empty),
            (Some(start), Some(end), None, None) => Ok(TimeSpec::Absolute { start, end }),
            (None, None, None, Some(range)) => Ok(TimeSpec::Relative(range.to_string())),
            (Some(start), None, Some(duration), None) => Ok(TimeSpec::StartDuration {
                start,
                duration: duration.to_string(),
            }),
            (None, Some(end), Some(duration), None) => Ok(TimeSpec::EndDuration {
                end,
                duration: duration.to_string(),
            }),
            _ => Err(Error::AmbiguousTimeSpec {
                start: input.start,
                end: input.end,
                duration: input.duration.clone(),
                time_range: input.time_range.clone(),
            }),
        }
    }
}

/// Turns time specifications into concrete [`TimeRange`]s.
///
/// Naive datetimes inside range phrases are read in the configured zone
/// (UTC unless changed with [`TimeRangeResolver::with_zone`]).
#[derive(Debug, Clone)]
pub struct TimeRangeResolver<C = SystemClock> {
    clock: C,
    zone: Zone,
}

impl Default for TimeRangeResolver<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> TimeRangeResolver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            zone: Zone::Utc,
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Classify and resolve raw inputs in one step
    pub fn resolve_input(&self, input: &TimeFilterInput) -> Result<TimeRange> {
        let spec = TimeSpec::classify(input)?;
        debug!(?spec, "classified time filter");
        self.resolve(&spec)
    }

    pub fn resolve(&self, spec: &TimeSpec) -> Result<TimeRange> {
        let range = match spec {
            TimeSpec::Empty => TimeRange::unbounded(),
            TimeSpec::Absolute { start, end } => TimeRange::between(*start, *end),
            TimeSpec::Relative(phrase) => {
                let now = self.clock.now();
                let (start, end) = timeparse::parse_range(phrase, now, self.zone)?;
                TimeRange::between(start, end)
            }
            TimeSpec::StartDuration { start, duration } => {
                let span = timeparse::parse_duration(duration)?;
                let end = add_span(*start, span)
                    .ok_or_else(|| Error::time_parse(duration.as_str(), "end time overflows"))?;
                TimeRange::between(*start, end)
            }
            TimeSpec::EndDuration { end, duration } => {
                let span = timeparse::parse_duration(duration)?;
                let start = sub_span(*end, span)
                    .ok_or_else(|| Error::time_parse(duration.as_str(), "start time underflows"))?;
                TimeRange::between(start, *end)
            }
        };

        debug!(%range, "resolved time range");
        Ok(range)
    }
}

/// `base + span` truncated toward zero, in integer arithmetic
fn add_span(base: i64, span: f64) -> Option<i64> {
    let sum = base.checked_add(span.trunc() as i64)?;
    if span.fract() > 0.0 && sum < 0 {
        Some(sum + 1)
    } else {
        Some(sum)
    }
}

/// `base - span` truncated toward zero, in integer arithmetic
fn sub_span(base: i64, span: f64) -> Option<i64> {
    let diff = base.checked_sub(span.trunc() as i64)?;
    if span.fract() > 0.0 && diff > 0 {
        Some(diff - 1)
    } else {
        Some(diff)
    }
}
