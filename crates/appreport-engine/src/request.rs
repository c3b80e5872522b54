use crate::clock::Clock;
use crate::timefilter::{TimeFilterInput, TimeRangeResolver};
use appreport_types::{Column, Error, Result, SourceHandle, TimeRange};
use serde::Serialize;
use tracing::debug;

/// A validated report definition ready to hand to an appliance.
///
/// Column order is preserved and becomes the legend order of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    source: SourceHandle,
    columns: Vec<Column>,
    time_range: TimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    granularity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<u64>,
}

impl ReportRequest {
    pub fn builder(source: SourceHandle) -> ReportRequestBuilder {
        ReportRequestBuilder::new(source)
    }

    pub fn source(&self) -> &SourceHandle {
        &self.source
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_key())
    }

    pub fn value_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_key())
    }

    /// Column names in request order, i.e. the expected legend
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Summary bucket width in seconds; `None` leaves it to the appliance
    pub fn granularity(&self) -> Option<u64> {
        self.granularity
    }

    /// Extra aggregation in seconds on top of the granularity
    pub fn resolution(&self) -> Option<u64> {
        self.resolution
    }
}

#[derive(Debug, Clone)]
pub struct ReportRequestBuilder {
    source: SourceHandle,
    columns: Vec<Column>,
    time_range: TimeRange,
    granularity: Option<u64>,
    resolution: Option<u64>,
}

impl ReportRequestBuilder {
    pub fn new(source: SourceHandle) -> Self {
        Self {
            source,
            columns: Vec::new(),
            time_range: TimeRange::unbounded(),
            granularity: None,
            resolution: None,
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    /// Resolve raw time inputs and use the result as the request window
    pub fn resolve_time<C: Clock>(
        self,
        resolver: &TimeRangeResolver<C>,
        input: &TimeFilterInput,
    ) -> Result<Self> {
        let range = resolver.resolve_input(input)?;
        Ok(self.time_range(range))
    }

    pub fn granularity(mut self, granularity: Option<u64>) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn resolution(mut self, resolution: Option<u64>) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn build(self) -> Result<ReportRequest> {
        if self.columns.is_empty() {
            return Err(Error::EmptyColumns);
        }

        if self.source.kind().is_live() && self.time_range.is_unbounded() {
            return Err(Error::MissingTimeRange {
                kind: self.source.kind(),
                id: self.source.id().to_string(),
            });
        }

        debug!(
            source = %self.source,
            columns = self.columns.len(),
            range = %self.time_range,
            "built report request"
        );

        Ok(ReportRequest {
            source: self.source,
            columns: self.columns,
            time_range: self.time_range,
            granularity: self.granularity,
            resolution: self.resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appreport_types::{ColumnRole, SourceKind};

    fn columns() -> Vec<Column> {
        vec![Column::key("a"), Column::value("b"), Column::value("c")]
    }

    #[test]
    fn test_column_order_and_roles_preserved() {
        let request = ReportRequest::builder(SourceHandle::new(SourceKind::File, "f1"))
            .columns(columns())
            .build()
            .unwrap();

        assert_eq!(request.column_names(), vec!["a", "b", "c"]);
        let roles: Vec<ColumnRole> = request.columns().iter().map(Column::role).collect();
        assert_eq!(
            roles,
            vec![ColumnRole::Key, ColumnRole::Value, ColumnRole::Value]
        );
        assert_eq!(request.key_columns().count(), 1);
        assert_eq!(request.value_columns().count(), 2);
    }

    #[test]
    fn test_job_requires_time_range() {
        let result = ReportRequest::builder(SourceHandle::new(SourceKind::Job, "default_job"))
            .columns(columns())
            .build();

        assert_eq!(
            result.unwrap_err(),
            Error::MissingTimeRange {
                kind: SourceKind::Job,
                id: "default_job".to_string(),
            }
        );
    }

    #[test]
    fn test_static_sources_allow_unbounded_range() {
        for kind in [SourceKind::File, SourceKind::Clip] {
            let request = ReportRequest::builder(SourceHandle::new(kind, "src"))
                .columns(columns())
                .build()
                .unwrap();
            assert!(request.time_range().is_unbounded());
        }
    }

    #[test]
    fn test_empty_columns_rejected() {
        let result = ReportRequest::builder(SourceHandle::new(SourceKind::Clip, "c1")).build();
        assert_eq!(result.unwrap_err(), Error::EmptyColumns);
    }

    #[test]
    fn test_key_value_mix_not_enforced() {
        let request = ReportRequest::builder(SourceHandle::new(SourceKind::File, "f1"))
            .column(Column::value("sum_traffic.total_bytes"))
            .build()
            .unwrap();
        assert_eq!(request.key_columns().count(), 0);
    }

    #[test]
    fn test_hints_pass_through() {
        let request = ReportRequest::builder(SourceHandle::new(SourceKind::Job, "j"))
            .columns(columns())
            .time_range(TimeRange::between(100, 200))
            .granularity(Some(60))
            .resolution(Some(300))
            .build()
            .unwrap();

        assert_eq!(request.granularity(), Some(60));
        assert_eq!(request.resolution(), Some(300));
        assert_eq!(request.time_range(), TimeRange::between(100, 200));
    }

    #[test]
    fn test_serializes_for_dry_run() {
        let request = ReportRequest::builder(SourceHandle::new(SourceKind::Job, "j"))
            .column(Column::key("src_ip.addr"))
            .column(Column::value("sum_traffic.total_bytes"))
            .time_range(TimeRange::between(100, 200))
            .granularity(Some(60))
            .build()
            .unwrap();

        insta::assert_json_snapshot!(request, @r#"
        {
          "source": {
            "kind": "job",
            "id": "j"
          },
          "columns": [
            {
              "name": "src_ip.addr",
              "role": "key"
            },
            {
              "name": "sum_traffic.total_bytes",
              "role": "value"
            }
          ],
          "time_range": {
            "start": 100,
            "end": 200
          },
          "granularity": 60
        }
        "#);
    }
}
