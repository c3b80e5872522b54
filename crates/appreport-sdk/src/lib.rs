//! appreport-sdk: run packet reports against an appliance.
//!
//! # Overview
//!
//! The SDK pairs the request model from `appreport-engine` with an
//! [`Appliance`] backend. A [`Client`] binds the appliance's source and
//! report services on first use and keeps them for its lifetime.
//!
//! # Quickstart
//!
//! ```no_run
//! use appreport_sdk::{Client, ReplayAppliance};
//! use appreport_sdk::types::{Column, SourceKind};
//! use appreport_sdk::engine::{ReportRequest, TimeFilterInput, TimeRangeResolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ReplayAppliance::load("capture.json")?);
//! let source = client.lookup_source(SourceKind::Job, "default_job")?;
//!
//! let request = ReportRequest::builder(source)
//!     .column(Column::key("src_ip.addr"))
//!     .column(Column::value("sum_traffic.total_bytes"))
//!     .resolve_time(
//!         &TimeRangeResolver::default(),
//!         &TimeFilterInput::default().with_time_range("last 1 hour"),
//!     )?
//!     .build()?;
//!
//! let data = client.run_report(&request)?;
//! println!("{}", data.legend.join(","));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod replay;
pub mod service;

pub use client::Client;
pub use error::{Error, Result};
pub use replay::{Capture, RecordedReport, RecordedSource, ReplayAppliance};
pub use service::{Appliance, ReportService, SourceService};

pub use appreport_engine as engine;
pub use appreport_types as types;
