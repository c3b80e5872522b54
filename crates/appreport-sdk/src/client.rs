use crate::error::Result;
use crate::service::{Appliance, ReportService, SourceService};
use appreport_engine::ReportRequest;
use appreport_types::{ReportData, SourceHandle, SourceKind};
use once_cell::unsync::OnceCell;
use tracing::{debug, info, warn};

/// Entry point for running reports against an appliance.
///
/// Service handles are bound lazily on first use and cached for the
/// lifetime of the client.
pub struct Client<A: Appliance> {
    appliance: A,
    sources: OnceCell<Box<dyn SourceService>>,
    reports: OnceCell<Box<dyn ReportService>>,
}

impl<A: Appliance> Client<A> {
    pub fn new(appliance: A) -> Self {
        Self {
            appliance,
            sources: OnceCell::new(),
            reports: OnceCell::new(),
        }
    }

    pub fn appliance(&self) -> &A {
        &self.appliance
    }

    pub fn sources(&self) -> Result<&dyn SourceService> {
        let service = self.sources.get_or_try_init(|| {
            debug!(appliance = self.appliance.name(), "Initializing sources service");
            self.appliance.bind_sources()
        })?;
        Ok(service.as_ref())
    }

    pub fn reports(&self) -> Result<&dyn ReportService> {
        let service = self.reports.get_or_try_init(|| {
            debug!(appliance = self.appliance.name(), "Initializing reports service");
            self.appliance.bind_reports()
        })?;
        Ok(service.as_ref())
    }

    pub fn lookup_source(&self, kind: SourceKind, id: &str) -> Result<SourceHandle> {
        self.sources()?.lookup(kind, id)
    }

    pub fn run_report(&self, request: &ReportRequest) -> Result<ReportData> {
        info!(
            source = %request.source(),
            range = %request.time_range(),
            "running report"
        );
        let data = self.reports()?.run(request)?;
        if data.is_empty() {
            warn!(source = %request.source(), "report returned no rows");
        } else {
            info!(rows = data.rows.len(), "report finished");
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use appreport_types::{Column, TimeRange};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        sources: Cell<usize>,
        reports: Cell<usize>,
    }

    struct CountingAppliance {
        counters: Rc<Counters>,
    }

    struct EchoSources;

    impl SourceService for EchoSources {
        fn lookup(&self, kind: SourceKind, id: &str) -> Result<SourceHandle> {
            Ok(SourceHandle::new(kind, id))
        }
    }

    struct EchoReports;

    impl ReportService for EchoReports {
        fn run(&self, request: &ReportRequest) -> Result<ReportData> {
            let legend = request
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();
            Ok(ReportData::new(legend, Vec::new()))
        }
    }

    impl Appliance for CountingAppliance {
        fn name(&self) -> &str {
            "counting"
        }

        fn bind_sources(&self) -> Result<Box<dyn SourceService>> {
            self.counters.sources.set(self.counters.sources.get() + 1);
            Ok(Box::new(EchoSources))
        }

        fn bind_reports(&self) -> Result<Box<dyn ReportService>> {
            self.counters.reports.set(self.counters.reports.get() + 1);
            Ok(Box::new(EchoReports))
        }
    }

    struct BrokenAppliance {
        attempts: Cell<usize>,
    }

    impl Appliance for BrokenAppliance {
        fn name(&self) -> &str {
            "broken"
        }

        fn bind_sources(&self) -> Result<Box<dyn SourceService>> {
            self.attempts.set(self.attempts.get() + 1);
            Err(Error::NotFound("sources service".to_string()))
        }

        fn bind_reports(&self) -> Result<Box<dyn ReportService>> {
            Err(Error::NotFound("reports service".to_string()))
        }
    }

    #[test]
    fn test_services_bound_once() {
        let counters = Rc::new(Counters::default());
        let client = Client::new(CountingAppliance {
            counters: counters.clone(),
        });

        assert_eq!(counters.sources.get(), 0);

        let source = client.lookup_source(SourceKind::Clip, "c1").unwrap();
        client.lookup_source(SourceKind::Clip, "c2").unwrap();
        assert_eq!(counters.sources.get(), 1);

        let request = ReportRequest::builder(source)
            .column(Column::key("a"))
            .time_range(TimeRange::unbounded())
            .build()
            .unwrap();
        client.run_report(&request).unwrap();
        client.run_report(&request).unwrap();
        assert_eq!(counters.reports.get(), 1);
    }

    #[test]
    fn test_failed_binding_is_retried_on_next_access() {
        let client = Client::new(BrokenAppliance {
            attempts: Cell::new(0),
        });

        assert!(client.sources().is_err());
        assert!(client.sources().is_err());
        assert_eq!(client.appliance().attempts.get(), 2);
    }
}
