// ABOUTME: Writes scrape outcomes to timestamped JSON and CSV files.
// ABOUTME: CSV columns are the sorted union of record keys; nested values are JSON-encoded cells.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use csv::Writer;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::Format;
use crate::error::ExportError;
use crate::outcome::ScrapeOutcome;

/// Timestamp layout used in exported file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes outcomes to the configured output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
    formats: Vec<Format>,
    filename_prefix: String,
}

impl Exporter {
    pub fn new(
        directory: impl Into<PathBuf>,
        formats: Vec<Format>,
        filename_prefix: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            formats,
            filename_prefix: filename_prefix.into(),
        }
    }

    /// Export `outcomes` in every configured format, returning the files written.
    ///
    /// All files of one call share a single UTC timestamp.
    pub fn export(&self, outcomes: &[ScrapeOutcome]) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(&self.directory).map_err(|source| ExportError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let mut written = Vec::new();
        for format in &self.formats {
            let path = self.directory.join(format!(
                "{}_{}.{}",
                self.filename_prefix,
                timestamp,
                format.extension()
            ));
            let wrote = match format {
                Format::Json => {
                    export_json(outcomes, &path)?;
                    true
                }
                Format::Csv => export_csv(outcomes, &path)?,
            };
            if wrote {
                written.push(path);
            }
        }
        Ok(written)
    }
}

/// Write outcomes as a pretty-printed JSON array.
pub fn export_json(outcomes: &[ScrapeOutcome], path: &Path) -> Result<(), ExportError> {
    debug!("Exporting {} records to JSON: {}", outcomes.len(), path.display());
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, outcomes)?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!("Exported {} records to JSON: {}", outcomes.len(), path.display());
    Ok(())
}

/// Write outcomes as CSV. Returns false without creating a file when there is nothing to write.
pub fn export_csv(outcomes: &[ScrapeOutcome], path: &Path) -> Result<bool, ExportError> {
    if outcomes.is_empty() {
        warn!(path = %path.display(), "no records to export to CSV");
        return Ok(false);
    }
    debug!("Exporting {} records to CSV: {}", outcomes.len(), path.display());

    let rows = outcomes
        .iter()
        .map(|o| {
            serde_json::to_value(o).map(|v| match v {
                Value::Object(map) => map,
                _ => Map::new(),
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    let header: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut wtr = Writer::from_writer(file);
    wtr.write_record(&header)?;
    for row in &rows {
        let cells = header
            .iter()
            .map(|key| row.get(*key).map_or(Ok(String::new()), csv_cell))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        wtr.write_record(&cells)?;
    }
    wtr.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported {} records to CSV: {}", outcomes.len(), path.display());
    Ok(true)
}

/// Render one value as a CSV cell.
fn csv_cell(value: &Value) -> Result<String, serde_json::Error> {
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
    })
}
