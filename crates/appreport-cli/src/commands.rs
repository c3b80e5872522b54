use crate::args::Cli;
use crate::config::Config;
use crate::output;
use anyhow::{Context, Result, bail};
use appreport_engine::{ReportRequest, SystemClock, TimeRangeResolver};
use appreport_sdk::{Client, ReplayAppliance};
use appreport_types::{SourceHandle, SourceKind};
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    let timezone = cli
        .timezone
        .or(config.defaults.timezone)
        .unwrap_or_default();
    let resolver = TimeRangeResolver::new(SystemClock).with_zone(timezone.into());

    let client = match cli.replay.as_ref().or(config.appliance.replay.as_ref()) {
        Some(path) => {
            let appliance = ReplayAppliance::load(path)
                .with_context(|| format!("Failed to open capture: {}", path.display()))?;
            Some(Client::new(appliance))
        }
        None => None,
    };

    let kind = SourceKind::from(cli.sourcetype);
    let source = match &client {
        Some(client) => client.lookup_source(kind, &cli.sourceid)?,
        None if cli.dry_run => SourceHandle::new(kind, cli.sourceid.clone()),
        None => bail!(
            "No appliance configured: pass --replay <FILE> or set [appliance] replay in the config file"
        ),
    };

    let request = ReportRequest::builder(source)
        .columns(cli.columns())
        .resolve_time(&resolver, &cli.time_filter())?
        .granularity(cli.granularity.or(config.defaults.granularity))
        .resolution(cli.resolution.or(config.defaults.resolution))
        .build()?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let client = client.context("No appliance configured")?;
    let data = client.run_report(&request)?;

    match &cli.csvfile {
        Some(path) => {
            output::write_csv_file(path, &data)?;
            info!(path = %path.display(), rows = data.rows.len(), "wrote report");
        }
        None => output::write_csv(std::io::stdout().lock(), &data)?,
    }

    Ok(())
}
