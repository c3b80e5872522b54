//! Offline appliance that answers from a recorded capture file.
//!
//! A capture is JSON of the form:
//!
//! ```json
//! {
//!   "sources": [{ "kind": "job", "id": "a1b2", "name": "default_job" }],
//!   "reports": [{
//!     "source": "a1b2",
//!     "legend": ["src_ip.addr", "sum_traffic.total_bytes"],
//!     "rows": [["10.1.1.1", 1024]]
//!   }]
//! }
//! ```

use crate::error::{Error, Result};
use crate::service::{Appliance, ReportService, SourceService};
use appreport_engine::ReportRequest;
use appreport_types::{ReportData, SourceHandle, SourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capture {
    #[serde(default)]
    pub sources: Vec<RecordedSource>,
    #[serde(default)]
    pub reports: Vec<RecordedReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSource {
    pub kind: SourceKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RecordedSource {
    fn matches(&self, kind: SourceKind, id: &str) -> bool {
        if self.kind != kind {
            return false;
        }

        match kind {
            SourceKind::Job => self.name.as_deref() == Some(id) || self.id == id,
            SourceKind::File | SourceKind::Clip => self.id == id,
        }
    }

    fn handle(&self) -> SourceHandle {
        let handle = SourceHandle::new(self.kind, self.id.clone());
        match &self.name {
            Some(name) => handle.with_name(name.clone()),
            None => handle,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedReport {
    pub source: String,
    pub legend: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

pub struct ReplayAppliance {
    name: String,
    capture: Arc<Capture>,
}

impl ReplayAppliance {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let capture: Capture = serde_json::from_str(&content).map_err(|e| {
            Error::InvalidInput(format!("Invalid capture file {}: {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            sources = capture.sources.len(),
            reports = capture.reports.len(),
            "loaded replay capture"
        );

        Ok(Self {
            name: path.display().to_string(),
            capture: Arc::new(capture),
        })
    }

    pub fn from_capture(name: impl Into<String>, capture: Capture) -> Self {
        Self {
            name: name.into(),
            capture: Arc::new(capture),
        }
    }
}

impl Appliance for ReplayAppliance {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind_sources(&self) -> Result<Box<dyn SourceService>> {
        Ok(Box::new(ReplaySources(self.capture.clone())))
    }

    fn bind_reports(&self) -> Result<Box<dyn ReportService>> {
        Ok(Box::new(ReplayReports(self.capture.clone())))
    }
}

struct ReplaySources(Arc<Capture>);

impl SourceService for ReplaySources {
    fn lookup(&self, kind: SourceKind, id: &str) -> Result<SourceHandle> {
        self.0
            .sources
            .iter()
            .find(|source| source.matches(kind, id))
            .map(RecordedSource::handle)
            .ok_or_else(|| Error::NotFound(format!("{} '{}'", kind, id)))
    }
}

struct ReplayReports(Arc<Capture>);

impl ReportService for ReplayReports {
    fn run(&self, request: &ReportRequest) -> Result<ReportData> {
        let wanted = request.column_names();

        self.0
            .reports
            .iter()
            .find(|report| report.source == request.source().id() && report.legend == wanted)
            .map(|report| ReportData::new(report.legend.clone(), report.rows.clone()))
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "No recorded report for {} with columns {}",
                    request.source(),
                    wanted.join(",")
                ))
            })
    }
}
