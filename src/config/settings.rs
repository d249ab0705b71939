use std::path::PathBuf;

use chrono::Local;

/// Folder scanned when none is given on the command line.
///
/// `dirs::download_dir` follows the platform convention (XDG user dirs
/// on Linux, Known Folders on Windows). When the platform reports
/// nothing, fall back to `~/Downloads`, then to a bare relative
/// `Downloads` as a last resort.
pub fn downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

/// Resolve the scan folder flag: fall back to [`downloads_dir`], then
/// make the result absolute so report links and recorded paths do not
/// depend on the working directory.
pub fn resolve_scan_root(flag: Option<PathBuf>) -> PathBuf {
    let folder = flag.unwrap_or_else(downloads_dir);
    std::path::absolute(&folder).unwrap_or(folder)
}

/// Default census output: a timestamped CSV in the working directory.
pub fn default_census_output() -> PathBuf {
    PathBuf::from(format!("file_census_{}.csv", timestamp_slug()))
}

/// Default summary output: a timestamped Markdown file.
pub fn default_summary_output() -> PathBuf {
    PathBuf::from(format!("file_census_summary_{}.md", timestamp_slug()))
}

fn timestamp_slug() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
