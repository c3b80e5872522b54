//! Custom assertions for appreport output validation.

use anyhow::{Context, Result};

/// Assert that CSV output starts with the expected header row.
pub fn assert_csv_header(csv: &str, expected: &[&str]) -> Result<()> {
    let header = csv.lines().next().context("Expected a CSV header line")?;
    let columns: Vec<&str> = header.split(',').collect();

    if columns != expected {
        anyhow::bail!("Expected header {:?}, got {:?}", expected, columns);
    }

    Ok(())
}

/// Assert that CSV output contains the expected number of data rows.
pub fn assert_csv_row_count(csv: &str, expected: usize) -> Result<()> {
    let rows = csv.lines().skip(1).filter(|line| !line.is_empty()).count();

    if rows != expected {
        anyhow::bail!("Expected {} data rows, got {}", expected, rows);
    }

    Ok(())
}
