use std::fmt;

use crate::source::SourceKind;

/// Result type for appreport-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures raised while shaping a report request.
///
/// Every variant describes malformed caller input. None of them are
/// transient, so callers should surface them instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The supplied time inputs do not select exactly one way of deriving a window
    AmbiguousTimeSpec {
        start: Option<i64>,
        end: Option<i64>,
        duration: Option<String>,
        time_range: Option<String>,
    },

    /// A time range, datetime or duration string could not be parsed
    TimeParse { input: String, reason: String },

    /// A live source was requested without a time window
    MissingTimeRange { kind: SourceKind, id: String },

    /// A report request was built without any columns
    EmptyColumns,
}

impl Error {
    pub fn time_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::TimeParse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

struct Raw<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Raw<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "None"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AmbiguousTimeSpec {
                start,
                end,
                duration,
                time_range,
            } => write!(
                f,
                "Start/end timestamps can not be derived from start \"{}\" end \"{}\" duration \"{}\" time_range \"{}\"",
                Raw(start),
                Raw(end),
                Raw(duration),
                Raw(time_range),
            ),
            Error::TimeParse { input, reason } => {
                write!(f, "Could not parse time \"{}\": {}", input, reason)
            }
            Error::MissingTimeRange { kind, id } => write!(
                f,
                "Time range must be provided for '{}' source \"{}\"",
                kind, id
            ),
            Error::EmptyColumns => write!(f, "Report request needs at least one column"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_every_input() {
        let err = Error::AmbiguousTimeSpec {
            start: Some(100),
            end: Some(200),
            duration: Some("50 seconds".to_string()),
            time_range: None,
        };

        assert_eq!(
            err.to_string(),
            "Start/end timestamps can not be derived from start \"100\" end \"200\" duration \"50 seconds\" time_range \"None\""
        );
    }

    #[test]
    fn test_time_parse_message_includes_input() {
        let err = Error::time_parse("last 3 fortnights", "unknown unit 'fortnights'");
        assert!(err.to_string().contains("last 3 fortnights"));
        assert!(err.to_string().contains("fortnights'"));
    }

    #[test]
    fn test_missing_time_range_message() {
        let err = Error::MissingTimeRange {
            kind: SourceKind::Job,
            id: "default_job".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Time range must be provided for 'job' source \"default_job\""
        );
    }
}
