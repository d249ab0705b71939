use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CensusError;
use crate::models::record::{format_file_size, FileRecord};

/// Column order of the census CSV. This is the contract between the
/// census writer and the summary reader; both sides go through
/// [`CensusRow`] so they cannot drift apart.
pub const CSV_COLUMNS: [&str; 6] = [
    "filename",
    "full_path",
    "size_bytes",
    "size_formatted",
    "modified_date",
    "extension",
];

/// Timestamp format of the `modified_date` column.
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire row matching [`CSV_COLUMNS`].
#[derive(Debug, Serialize, Deserialize)]
struct CensusRow {
    filename: String,
    full_path: String,
    size_bytes: u64,
    size_formatted: String,
    modified_date: String,
    extension: String,
}

impl From<&FileRecord> for CensusRow {
    fn from(record: &FileRecord) -> Self {
        Self {
            filename: record.name.clone(),
            full_path: record.path.to_string_lossy().into_owned(),
            size_bytes: record.size_bytes,
            size_formatted: format_file_size(record.size_bytes),
            modified_date: record.modified.format(CSV_DATE_FORMAT).to_string(),
            extension: record.extension.clone(),
        }
    }
}

/// Streaming census writer.
///
/// The header row goes out at construction, so an empty scan still
/// produces a valid one-line CSV and an interrupted scan finalizes
/// with whatever rows made it out.
pub struct CensusWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl<W: Write> CensusWriter<W> {
    pub fn new(out: W) -> Result<Self, csv::Error> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        writer.write_record(CSV_COLUMNS)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Serialize one record as a CSV row.
    pub fn append(&mut self, record: &FileRecord) -> Result<(), csv::Error> {
        self.writer.serialize(CensusRow::from(record))?;
        self.rows += 1;
        Ok(())
    }

    /// Rows appended so far, header excluded.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush everything through and return the row count.
    pub fn finish(mut self) -> io::Result<u64> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

/// Read a census CSV back into file records.
///
/// `relative_path` is not stored in the CSV and comes back empty. Any
/// row that does not fit the schema is fatal; a census is small enough
/// that a partial summary over silently dropped rows would mislead
/// more than it helps.
pub fn read_census(path: &Path) -> Result<Vec<FileRecord>, CensusError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CensusError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => CensusError::PermissionDenied(path.to_path_buf()),
        _ => CensusError::ReadFailure {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers().map_err(|e| map_csv_error(path, e))?.clone();
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| map_csv_error(path, e))?;
        // Quoted fields can span physical lines, so the reported line
        // comes from the parser's position, not the record index.
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: CensusRow = record
            .deserialize(Some(&headers))
            .map_err(|e| map_csv_error(path, e))?;
        let modified = NaiveDateTime::parse_from_str(&row.modified_date, CSV_DATE_FORMAT)
            .map_err(|e| CensusError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason: format!("bad modified_date {:?}: {e}", row.modified_date),
            })?;
        records.push(FileRecord {
            name: row.filename,
            path: row.full_path.into(),
            relative_path: String::new(),
            size_bytes: row.size_bytes,
            modified,
            extension: row.extension,
        });
    }
    tracing::debug!("Loaded {} census rows from {}", records.len(), path.display());
    Ok(records)
}

fn map_csv_error(path: &Path, err: csv::Error) -> CensusError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => CensusError::ReadFailure {
            path: path.to_path_buf(),
            source,
        },
        _ => CensusError::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason,
        },
    }
}
