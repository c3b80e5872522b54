mod enums;

pub use enums::*;

use appreport_engine::TimeFilterInput;
use appreport_types::{Column, ColumnRole};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "appreport")]
#[command(
    about = "Run a report against sources of packets (capture job, clips, files)",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Type of data source to run report against")]
    pub sourcetype: SourceType,

    #[arg(long, help = "ID of the source to run report against (job name for 'job')")]
    pub sourceid: String,

    #[arg(long, help = "List of key column names separated by comma")]
    pub keycolumns: String,

    #[arg(long, help = "List of value column names separated by comma")]
    pub valuecolumns: String,

    #[arg(
        long,
        help = "Time range to analyze, valid formats are: \"06/05/17 17:09:00 to 06/05/17 18:09:00\" or \"17:09:00 to 18:09:00\" or \"last 1 hour\""
    )]
    pub timerange: Option<String>,

    #[arg(long, allow_negative_numbers = true, help = "Start time in epoch seconds")]
    pub start: Option<i64>,

    #[arg(long, allow_negative_numbers = true, help = "End time in epoch seconds")]
    pub end: Option<i64>,

    #[arg(long, help = "Duration added to --start or taken from --end, e.g. \"1 hour\"")]
    pub duration: Option<String>,

    #[arg(
        long,
        help = "The amount of time in seconds for which the data source computes a summary of the metrics it received"
    )]
    pub granularity: Option<u64>,

    #[arg(
        long,
        help = "Additional granularity in seconds to tell the data source to aggregate further"
    )]
    pub resolution: Option<u64>,

    #[arg(long, help = "CSV file to store report data (defaults to stdout)")]
    pub csvfile: Option<PathBuf>,

    #[arg(long, help = "Answer from a recorded capture file instead of a live appliance")]
    pub replay: Option<PathBuf>,

    #[arg(long, help = "Path to config.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Zone for datetimes written without an offset")]
    pub timezone: Option<TimeZoneSetting>,

    #[arg(long, help = "Print the resolved report request as JSON without running it")]
    pub dry_run: bool,

    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Cross-field checks clap cannot express declaratively
    pub fn validate(&self) -> Result<(), clap::Error> {
        let mut cmd = Cli::command();

        if self.key_columns().is_empty() {
            return Err(cmd.error(
                ErrorKind::ValueValidation,
                "Key column names must be provided",
            ));
        }

        if self.value_columns().is_empty() {
            return Err(cmd.error(
                ErrorKind::ValueValidation,
                "Value column names must be provided",
            ));
        }

        if self.sourcetype == SourceType::Job && self.time_filter().is_empty() {
            return Err(cmd.error(
                ErrorKind::MissingRequiredArgument,
                "Time range must be provided for 'job' source",
            ));
        }

        Ok(())
    }

    pub fn key_columns(&self) -> Vec<Column> {
        Column::parse_list(&self.keycolumns, ColumnRole::Key)
    }

    pub fn value_columns(&self) -> Vec<Column> {
        Column::parse_list(&self.valuecolumns, ColumnRole::Value)
    }

    /// Key columns first, then value columns, each in the order given
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = self.key_columns();
        columns.extend(self.value_columns());
        columns
    }

    pub fn time_filter(&self) -> TimeFilterInput {
        TimeFilterInput {
            start: self.start,
            end: self.end,
            duration: self.duration.clone(),
            time_range: self.timerange.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["appreport"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_columns_keep_order() {
        let cli = parse(&[
            "--sourcetype",
            "file",
            "--sourceid",
            "f1",
            "--keycolumns",
            "src_ip.addr,dst_ip.addr",
            "--valuecolumns",
            "sum_traffic.total_bytes",
        ]);

        let names: Vec<String> = cli.columns().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["src_ip.addr", "dst_ip.addr", "sum_traffic.total_bytes"]
        );
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_job_without_time_is_rejected() {
        let cli = parse(&[
            "--sourcetype",
            "job",
            "--sourceid",
            "default_job",
            "--keycolumns",
            "a",
            "--valuecolumns",
            "b",
        ]);

        let err = cli.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_job_with_start_and_duration_is_accepted() {
        let cli = parse(&[
            "--sourcetype",
            "job",
            "--sourceid",
            "default_job",
            "--keycolumns",
            "a",
            "--valuecolumns",
            "b",
            "--start",
            "1496682540",
            "--duration",
            "1 hour",
        ]);

        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_blank_columns_are_rejected() {
        let cli = parse(&[
            "--sourcetype",
            "clip",
            "--sourceid",
            "c1",
            "--keycolumns",
            " , ",
            "--valuecolumns",
            "b",
        ]);

        assert_eq!(cli.validate().unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_unknown_source_type_is_rejected() {
        let result = Cli::try_parse_from([
            "appreport",
            "--sourcetype",
            "capture",
            "--sourceid",
            "x",
            "--keycolumns",
            "a",
            "--valuecolumns",
            "b",
        ]);
        assert!(result.is_err());
    }
}
