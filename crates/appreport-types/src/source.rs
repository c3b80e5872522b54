use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of packet data a report runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Uploaded packet capture file
    File,
    /// Pre-extracted clip of a capture job
    Clip,
    /// Running capture job (live stream)
    Job,
}

impl SourceKind {
    /// Live sources never end, so every report against them needs a time window
    pub fn is_live(&self) -> bool {
        matches!(self, SourceKind::Job)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::File => "file",
            SourceKind::Clip => "clip",
            SourceKind::Job => "job",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(SourceKind::File),
            "clip" => Ok(SourceKind::Clip),
            "job" => Ok(SourceKind::Job),
            other => Err(format!(
                "Source type should be one of 'file', 'clip', 'job', got '{}'",
                other
            )),
        }
    }
}

/// Opaque reference to a source as returned by the appliance lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHandle {
    kind: SourceKind,
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl SourceHandle {
    pub fn new(kind: SourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{} ({})", self.kind, self.id, name),
            None => write!(f, "{}:{}", self.kind, self.id),
        }
    }
}
