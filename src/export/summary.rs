use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::core::analyzer::{SummaryStats, NO_EXTENSION_LABEL};
use crate::error::CensusError;
use crate::models::record::{format_count, format_file_size};

use super::census::CSV_DATE_FORMAT;
use super::escape_pipes;

/// Extension rows shown before the breakdown rolls up into one
/// `...and N more` line.
const MAX_TYPE_ROWS: usize = 20;

/// Extensions feeding the trailing hashtag line.
const MAX_TAGS: usize = 10;

/// Render the census summary report as a Markdown string.
///
/// `generated` is stamped into the header; passing it in keeps the
/// renderer deterministic.
pub fn render_summary(stats: &SummaryStats, generated: NaiveDateTime) -> anyhow::Result<String> {
    let mut md = String::new();

    writeln!(md, "# File Census Summary Report")?;
    writeln!(md)?;
    writeln!(md, "Generated on: {}", generated.format(CSV_DATE_FORMAT))?;
    writeln!(md)?;

    writeln!(md, "## Overview")?;
    writeln!(md)?;
    writeln!(
        md,
        "- **Total Files**: {}",
        format_count(stats.total_files as u64)
    )?;
    writeln!(
        md,
        "- **Total Size**: {} ({} bytes)",
        format_file_size(stats.total_size),
        format_count(stats.total_size),
    )?;
    writeln!(md)?;

    writeln!(md, "## Top 10 Largest Files")?;
    writeln!(md)?;
    writeln!(md, "| Rank | Filename | Size | Modified Date |")?;
    writeln!(md, "|------|----------|------|---------------|")?;
    for (rank, file) in stats.largest_files.iter().enumerate() {
        writeln!(
            md,
            "| {} | `{}` | {} | {} |",
            rank + 1,
            escape_pipes(&file.name),
            format_file_size(file.size_bytes),
            file.modified.format(CSV_DATE_FORMAT),
        )?;
    }
    writeln!(md)?;

    writeln!(md, "## File Type Breakdown")?;
    writeln!(md)?;
    writeln!(md, "| Extension | Count | Total Size | Percentage |")?;
    writeln!(md, "|-----------|-------|------------|------------|")?;
    for stat in stats.file_types.iter().take(MAX_TYPE_ROWS) {
        let display = if stat.extension == NO_EXTENSION_LABEL {
            "*no extension*"
        } else {
            stat.extension.as_str()
        };
        writeln!(
            md,
            "| `{}` | {} | {} | {:.1}% |",
            display,
            format_count(stat.count as u64),
            format_file_size(stat.total_size),
            percentage(stat.count, stats.total_files),
        )?;
    }
    if stats.file_types.len() > MAX_TYPE_ROWS {
        writeln!(
            md,
            "| *...and {} more* | | | |",
            stats.file_types.len() - MAX_TYPE_ROWS
        )?;
    }
    writeln!(md)?;

    writeln!(md, "## Files by Year")?;
    writeln!(md)?;
    writeln!(md, "| Year | Count | Total Size | Percentage |")?;
    writeln!(md, "|------|-------|------------|------------|")?;
    for stat in &stats.files_by_year {
        writeln!(
            md,
            "| {} | {} | {} | {:.1}% |",
            stat.year,
            format_count(stat.count as u64),
            format_file_size(stat.total_size),
            percentage(stat.count, stats.total_files),
        )?;
    }
    writeln!(md)?;

    // Obsidian picks these up as tags.
    writeln!(md, "## File Extensions Summary")?;
    writeln!(md)?;
    for stat in stats.file_types.iter().take(MAX_TAGS) {
        let tag = if stat.extension.starts_with('.') {
            stat.extension.replace('.', "")
        } else {
            stat.extension.clone()
        };
        if tag != NO_EXTENSION_LABEL {
            write!(md, "#{tag} ")?;
        }
    }
    writeln!(md)?;
    writeln!(md)?;
    writeln!(md, "---")?;
    writeln!(md)?;
    writeln!(md, "*Report generated by File Census Tool*")?;

    Ok(md)
}

/// Render the summary and write it to `output_path`.
pub fn export_summary(
    stats: &SummaryStats,
    generated: NaiveDateTime,
    output_path: &Path,
) -> anyhow::Result<()> {
    let md = render_summary(stats, generated)?;
    std::fs::write(output_path, md).map_err(|source| CensusError::WriteFailure {
        path: output_path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}
