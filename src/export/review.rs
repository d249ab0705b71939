use std::io::{self, Write};
use std::path::Path;

use crate::core::analyzer::ReviewStats;
use crate::models::record::{format_count, format_date, format_file_size, FileRecord, FolderRecord};

use super::{escape_pipes, truncate_filename};

/// Longest filename shown in a review table before truncation.
const MAX_NAME_LEN: usize = 40;

/// Obsidian Shell Commands id wired to delete the file passed through
/// the `_file_path` variable.
const DELETE_COMMAND_ID: &str = "19bemkchg3";

/// Write the weekly-review Markdown to `out`.
///
/// The review goes to stdout in normal use, so nothing here may print
/// anywhere else. `root` is the folder that was scanned; it backs the
/// open-folder button.
pub fn export_review<W: Write>(out: &mut W, stats: &ReviewStats, root: &Path) -> io::Result<()> {
    writeln!(out, "# Downloads Weekly Review")?;
    writeln!(out)?;

    write_summary(out, stats)?;
    write_open_button(out, root)?;
    write_largest(out, &stats.largest_files)?;
    write_recent(out, &stats.recent_files)?;
    write_subfolders(out, &stats.subfolders)?;
    write_oldest(out, &stats.oldest_files)?;

    Ok(())
}

/// Percent-encode a path for embedding in an `obsidian://` URI while
/// keeping `/` and `:` readable. Backslashes are normalized first so
/// Windows paths produce the same link shape.
pub fn encode_action_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    urlencoding::encode(&forward)
        .replace("%2F", "/")
        .replace("%3A", ":")
}

fn write_summary<W: Write>(out: &mut W, stats: &ReviewStats) -> io::Result<()> {
    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(
        out,
        "- **Total files:** {}",
        format_count(stats.total_files as u64)
    )?;
    match (stats.oldest, stats.newest) {
        (Some(oldest), Some(newest)) => writeln!(
            out,
            "- **Date range:** {} to {}",
            format_date(oldest),
            format_date(newest)
        )?,
        _ => writeln!(out, "- **Date range:** n/a")?,
    }
    writeln!(out, "- **Total size:** {}", format_file_size(stats.total_size))?;
    writeln!(
        out,
        "- **Average file size:** {}",
        format_file_size(stats.average_size)
    )?;
    writeln!(out)
}

fn write_open_button<W: Write>(out: &mut W, root: &Path) -> io::Result<()> {
    writeln!(out, "```button")?;
    writeln!(out, "name Open Downloads Folder 📁")?;
    writeln!(out, "type link")?;
    writeln!(out, "action file:///{}", root.display())?;
    writeln!(out, "```")?;
    writeln!(out)
}

fn write_largest<W: Write>(out: &mut W, files: &[FileRecord]) -> io::Result<()> {
    writeln!(out, "## 🔥 Top 15 Largest Files")?;
    writeln!(out)?;
    if files.is_empty() {
        writeln!(out, "*No files found*")?;
        return writeln!(out);
    }
    writeln!(out, "| File | Size | Date | Delete |")?;
    writeln!(out, "|------|------|------|--------|")?;
    for file in files {
        let name = escape_pipes(&truncate_filename(&file.name, MAX_NAME_LEN));
        let target = encode_action_path(&file.path.to_string_lossy());
        writeln!(
            out,
            "| {} | {} | {} | [🗑️](obsidian://shell-commands/?execute={}&_file_path={}) |",
            name,
            format_file_size(file.size_bytes),
            format_date(file.modified),
            DELETE_COMMAND_ID,
            target,
        )?;
    }
    writeln!(out)
}

fn write_recent<W: Write>(out: &mut W, files: &[FileRecord]) -> io::Result<()> {
    writeln!(out, "## 📅 Files from Last Week")?;
    writeln!(out)?;
    if files.is_empty() {
        writeln!(out, "*No files modified in the last 7 days*")?;
        return writeln!(out);
    }
    writeln!(out, "*{} files modified in the last 7 days*", files.len())?;
    writeln!(out)?;
    writeln!(out, "| File | Size | Date |")?;
    writeln!(out, "|------|------|------|")?;
    for file in files {
        writeln!(
            out,
            "| {} | {} | {} |",
            escape_pipes(&truncate_filename(&file.name, MAX_NAME_LEN)),
            format_file_size(file.size_bytes),
            format_date(file.modified),
        )?;
    }
    writeln!(out)
}

fn write_subfolders<W: Write>(out: &mut W, folders: &[FolderRecord]) -> io::Result<()> {
    writeln!(out, "## 📁 Subfolders")?;
    writeln!(out)?;
    if folders.is_empty() {
        writeln!(out, "*No subfolders found*")?;
        return writeln!(out);
    }
    writeln!(out, "| Folder | Files | Total Size | Created |")?;
    writeln!(out, "|--------|-------|------------|---------|")?;
    for folder in folders {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            escape_pipes(&folder.name),
            format_count(folder.file_count as u64),
            format_file_size(folder.total_size),
            format_date(folder.created),
        )?;
    }
    writeln!(out)
}

fn write_oldest<W: Write>(out: &mut W, files: &[FileRecord]) -> io::Result<()> {
    writeln!(out, "## 🕰️ 15 Oldest Files")?;
    writeln!(out)?;
    if files.is_empty() {
        writeln!(out, "*No files found*")?;
        return writeln!(out);
    }
    writeln!(out, "| File | Size | Date |")?;
    writeln!(out, "|------|------|------|")?;
    for file in files {
        writeln!(
            out,
            "| {} | {} | {} |",
            escape_pipes(&truncate_filename(&file.name, MAX_NAME_LEN)),
            format_file_size(file.size_bytes),
            format_date(file.modified),
        )?;
    }
    writeln!(out)
}
