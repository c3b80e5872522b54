use crate::error::Result;
use appreport_engine::ReportRequest;
use appreport_types::{ReportData, SourceHandle, SourceKind};

/// Resolves source identifiers into handles.
///
/// Files and clips are looked up by id, capture jobs by name.
pub trait SourceService {
    fn lookup(&self, kind: SourceKind, id: &str) -> Result<SourceHandle>;
}

/// Executes report requests and returns the resulting table
pub trait ReportService {
    fn run(&self, request: &ReportRequest) -> Result<ReportData>;
}

/// A backend able to provide the appliance services.
///
/// Binding may be expensive (session setup, version negotiation); the
/// [`Client`](crate::Client) calls each `bind_*` method at most once.
pub trait Appliance {
    fn name(&self) -> &str;

    fn bind_sources(&self) -> Result<Box<dyn SourceService>>;

    fn bind_reports(&self) -> Result<Box<dyn ReportService>>;
}
