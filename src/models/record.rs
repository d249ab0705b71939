use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};

/// One regular file captured during a scan pass.
///
/// Records are immutable snapshots: a later scan produces a fresh set
/// rather than updating these in place.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Base filename.
    pub name: String,
    /// Full path as discovered.
    pub path: PathBuf,
    /// Path relative to the scan root; empty for records read back from
    /// a census CSV, which does not store it.
    pub relative_path: String,
    pub size_bytes: u64,
    /// Last-modification time as local wall-clock time, the same value
    /// the census CSV serializes.
    pub modified: NaiveDateTime,
    /// Lower-cased suffix including the leading dot, or empty.
    pub extension: String,
}

impl FileRecord {
    /// Build a record from a stat result obtained during traversal.
    pub fn from_metadata(path: &Path, root: &Path, meta: &Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let relative_path = path
            .strip_prefix(root)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let extension = match path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
        {
            Some(ext) => format!(".{}", ext.to_lowercase()),
            None => String::new(),
        };
        let modified = local_datetime(meta.modified().unwrap_or(SystemTime::UNIX_EPOCH));

        Self {
            name,
            path: path.to_path_buf(),
            relative_path,
            size_bytes: meta.len(),
            modified,
            extension,
        }
    }
}

/// One immediate subdirectory of the scan root, rolled up recursively.
/// Only emitted when at least one file exists somewhere underneath.
#[derive(Debug, Clone)]
pub struct FolderRecord {
    pub name: String,
    pub path: PathBuf,
    /// Files anywhere under this subdirectory.
    pub file_count: usize,
    pub total_size: u64,
    /// Creation time where the platform reports one, otherwise the
    /// directory's modification time.
    pub created: NaiveDateTime,
}

/// Convert a filesystem timestamp to local wall-clock time.
pub fn local_datetime(t: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(t).naive_local()
}

/// Human-readable byte count in binary units with one fractional digit.
/// Zero is special-cased and never divided: `format_file_size(0)` is
/// `"0 B"`, `format_file_size(1536)` is `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{size:.1} {}", UNITS[unit])
}

/// Decimal count with comma thousands separators, `"1,234,567"` style.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short display form used by the review tables.
pub fn format_date(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}
