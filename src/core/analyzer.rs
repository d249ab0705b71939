use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDateTime};

use crate::models::record::{FileRecord, FolderRecord};

/// Group label for files without an extension.
pub const NO_EXTENSION_LABEL: &str = "(no extension)";

/// Rows in the review's largest-files table.
const TOP_LARGEST: usize = 15;
/// Rows in the review's oldest-files table.
const TOP_OLDEST: usize = 15;
/// The recent-files window, anchored at the analysis timestamp.
const RECENT_WINDOW_HOURS: i64 = 7 * 24;
/// Rows in the summary's largest-files table.
const SUMMARY_TOP_LARGEST: usize = 10;

/// Statistics behind the weekly review, derived from one scan pass.
///
/// Derivation is pure: `now` anchors the trailing seven-day window so
/// the same inputs always produce the same output. Every ranking uses
/// a stable sort, so ties keep discovery order.
#[derive(Debug, Clone)]
pub struct ReviewStats {
    pub total_files: usize,
    pub total_size: u64,
    /// Integer mean; zero when no files were scanned.
    pub average_size: u64,
    pub oldest: Option<NaiveDateTime>,
    pub newest: Option<NaiveDateTime>,
    /// Largest first, at most fifteen.
    pub largest_files: Vec<FileRecord>,
    /// Modified within the window, newest first, unbounded.
    pub recent_files: Vec<FileRecord>,
    /// Oldest first, at most fifteen.
    pub oldest_files: Vec<FileRecord>,
    /// Largest total size first.
    pub subfolders: Vec<FolderRecord>,
}

impl ReviewStats {
    pub fn compute(
        files: &[FileRecord],
        subfolders: &[FolderRecord],
        now: NaiveDateTime,
    ) -> Self {
        let total_files = files.len();
        let total_size: u64 = files.iter().map(|f| f.size_bytes).sum();
        let average_size = if total_files > 0 {
            total_size / total_files as u64
        } else {
            0
        };

        let oldest = files.iter().map(|f| f.modified).min();
        let newest = files.iter().map(|f| f.modified).max();

        let mut largest_files = files.to_vec();
        largest_files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        largest_files.truncate(TOP_LARGEST);

        // The boundary is inclusive: a file modified exactly one window
        // ago still counts as recent.
        let window_start = now - Duration::hours(RECENT_WINDOW_HOURS);
        let mut recent_files: Vec<FileRecord> = files
            .iter()
            .filter(|f| f.modified >= window_start)
            .cloned()
            .collect();
        recent_files.sort_by(|a, b| b.modified.cmp(&a.modified));

        let mut oldest_files = files.to_vec();
        oldest_files.sort_by(|a, b| a.modified.cmp(&b.modified));
        oldest_files.truncate(TOP_OLDEST);

        let mut subfolders = subfolders.to_vec();
        subfolders.sort_by(|a, b| b.total_size.cmp(&a.total_size));

        Self {
            total_files,
            total_size,
            average_size,
            oldest,
            newest,
            largest_files,
            recent_files,
            oldest_files,
            subfolders,
        }
    }
}

/// One extension group in the summary's type breakdown.
#[derive(Debug, Clone)]
pub struct TypeStat {
    /// Lower-cased extension with its dot, or [`NO_EXTENSION_LABEL`].
    pub extension: String,
    pub count: usize,
    pub total_size: u64,
}

/// One calendar-year group, keyed by modification year.
#[derive(Debug, Clone)]
pub struct YearStat {
    pub year: i32,
    pub count: usize,
    pub total_size: u64,
}

/// Statistics behind the census summary report.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub total_files: usize,
    pub total_size: u64,
    /// Largest first, at most ten.
    pub largest_files: Vec<FileRecord>,
    /// Count descending; equal counts keep first-encounter order.
    pub file_types: Vec<TypeStat>,
    /// Year descending.
    pub files_by_year: Vec<YearStat>,
}

impl SummaryStats {
    pub fn compute(files: &[FileRecord]) -> Self {
        let total_files = files.len();
        let total_size: u64 = files.iter().map(|f| f.size_bytes).sum();

        let mut largest_files = files.to_vec();
        largest_files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        largest_files.truncate(SUMMARY_TOP_LARGEST);

        // Group in encounter order first, then stable-sort by count, so
        // ties between extensions resolve to whichever appeared first.
        let mut file_types: Vec<TypeStat> = Vec::new();
        let mut type_index: HashMap<String, usize> = HashMap::new();
        for file in files {
            let ext = file.extension.to_lowercase();
            let label = if ext.is_empty() {
                NO_EXTENSION_LABEL.to_string()
            } else {
                ext
            };
            match type_index.get(&label) {
                Some(&i) => {
                    file_types[i].count += 1;
                    file_types[i].total_size += file.size_bytes;
                }
                None => {
                    type_index.insert(label.clone(), file_types.len());
                    file_types.push(TypeStat {
                        extension: label,
                        count: 1,
                        total_size: file.size_bytes,
                    });
                }
            }
        }
        file_types.sort_by(|a, b| b.count.cmp(&a.count));

        let mut by_year: BTreeMap<i32, YearStat> = BTreeMap::new();
        for file in files {
            let year = file.modified.year();
            let stat = by_year.entry(year).or_insert(YearStat {
                year,
                count: 0,
                total_size: 0,
            });
            stat.count += 1;
            stat.total_size += file.size_bytes;
        }
        let files_by_year: Vec<YearStat> = by_year.into_values().rev().collect();

        Self {
            total_files,
            total_size,
            largest_files,
            file_types,
            files_by_year,
        }
    }
}
