use anyhow::{Context, Result};
use appreport_types::ReportData;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write the legend as a header row followed by every data row
pub fn write_csv<W: Write>(writer: W, data: &ReportData) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(&data.legend)?;
    for row in data.text_rows() {
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, data: &ReportData) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    write_csv(file, data)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))
}
