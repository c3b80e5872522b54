//! Time range resolution and report request assembly.
//!
//! The engine turns loosely specified user input (absolute bounds, a
//! relative phrase such as `last 1 hour`, or a bound plus a duration) into
//! a concrete [`TimeRange`], then combines it with typed columns into a
//! [`ReportRequest`] that an appliance can execute.
//!
//! ```
//! use appreport_engine::{FixedClock, ReportRequest, TimeFilterInput, TimeRangeResolver};
//! use appreport_types::{Column, SourceHandle, SourceKind};
//!
//! let resolver = TimeRangeResolver::new(FixedClock::at_epoch(1_500_000_000));
//! let input = TimeFilterInput::default().with_time_range("last 1 hour");
//!
//! let request = ReportRequest::builder(SourceHandle::new(SourceKind::Job, "default_job"))
//!     .column(Column::key("src_ip.addr"))
//!     .column(Column::value("sum_traffic.total_bytes"))
//!     .resolve_time(&resolver, &input)?
//!     .build()?;
//!
//! assert_eq!(request.time_range().duration_secs(), Some(3600));
//! # Ok::<(), appreport_types::Error>(())
//! ```

pub mod clock;
pub mod request;
pub mod timefilter;
pub mod timeparse;
pub mod zone;

pub use appreport_types::{Error, Result, TimeRange};
pub use clock::{Clock, FixedClock, SystemClock};
pub use request::{ReportRequest, ReportRequestBuilder};
pub use timefilter::{TimeFilterInput, TimeRangeResolver, TimeSpec};
pub use zone::Zone;
