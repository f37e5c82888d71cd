//! Regression samples from CSV.
//!
//! Two columns, x then y. A header row is optional: a first row whose
//! fields are not both numbers is treated as one.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read `(x, y)` pairs from a CSV file.
pub fn read_samples(path: &Path) -> Result<Vec<(f64, f64)>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
    parse_samples(file).with_context(|| format!("Failed to read samples from {}", path.display()))
}

/// Parse `(x, y)` pairs from CSV text.
pub fn parse_samples<R: Read>(reader: R) -> Result<Vec<(f64, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut samples = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(index as u64 + 1, |p| p.line());

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 2 {
            bail!("line {}: expected 2 columns (x,y), found {}", line, record.len());
        }

        let x = record[0].parse::<f64>();
        let y = record[1].parse::<f64>();
        match (x, y) {
            (Ok(x), Ok(y)) => samples.push((x, y)),
            _ if index == 0 => {
                tracing::debug!(header = ?record, "Skipping CSV header row");
            }
            _ => bail!(
                "line {}: '{}' and '{}' must both be numbers",
                line,
                &record[0],
                &record[1]
            ),
        }
    }

    if samples.is_empty() {
        bail!("no samples found");
    }
    Ok(samples)
}
