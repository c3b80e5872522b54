use appreport_engine::Zone;
use appreport_types::SourceKind;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SourceType {
    File,
    Clip,
    Job,
}

impl From<SourceType> for SourceKind {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::File => SourceKind::File,
            SourceType::Clip => SourceKind::Clip,
            SourceType::Job => SourceKind::Job,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Zone used for datetimes written without an explicit offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneSetting {
    #[default]
    Utc,
    Local,
}

impl From<TimeZoneSetting> for Zone {
    fn from(value: TimeZoneSetting) -> Self {
        match value {
            TimeZoneSetting::Utc => Zone::Utc,
            TimeZoneSetting::Local => Zone::Local,
        }
    }
}
