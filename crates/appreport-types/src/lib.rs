pub mod column;
pub mod error;
pub mod report;
pub mod source;
pub mod time_range;

pub use column::{Column, ColumnRole};
pub use error::{Error, Result};
pub use report::ReportData;
pub use source::{SourceHandle, SourceKind};
pub use time_range::TimeRange;
