use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::CensusError;
use crate::models::record::{local_datetime, FileRecord, FolderRecord};

/// A traversal entry that could not be enumerated or stat-ed.
/// Recorded and logged, never fatal.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub message: String,
}

/// Everything one collect-based scan pass produced.
#[derive(Debug)]
pub struct FolderScan {
    pub files: Vec<FileRecord>,
    pub skipped: Vec<SkippedEntry>,
}

/// Lazy depth-first traversal yielding a [`FileRecord`] per regular file.
///
/// Symbolic links are not followed, which also rules out link cycles;
/// a link to a file is not a regular file and is not counted. Entries
/// that fail mid-walk are pushed onto the skip list and the walk
/// continues.
#[derive(Debug)]
pub struct FileWalker {
    root: PathBuf,
    walker: walkdir::IntoIter,
    skipped: Vec<SkippedEntry>,
}

impl FileWalker {
    /// Validate `root` and open a walk over it.
    ///
    /// Root problems are fatal here so that every error surfaced later
    /// by the iterator can be treated as skippable.
    pub fn new(root: &Path) -> Result<Self, CensusError> {
        validate_root(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            walker: WalkDir::new(root).into_iter(),
            skipped: Vec::new(),
        })
    }

    /// Entries skipped so far.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    fn record_skip(&mut self, path: PathBuf, message: String) {
        tracing::warn!("Skipping {}: {}", path.display(), message);
        self.skipped.push(SkippedEntry { path, message });
    }
}

impl Iterator for FileWalker {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    self.record_skip(path, e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(meta) => {
                    return Some(FileRecord::from_metadata(entry.path(), &self.root, &meta));
                }
                Err(e) => {
                    self.record_skip(entry.path().to_path_buf(), e.to_string());
                }
            }
        }
    }
}

/// Scan every regular file under `root` into memory.
///
/// `cancel` is polled between entries; a set flag aborts the pass with
/// [`CensusError::Interrupted`].
pub fn scan_files(root: &Path, cancel: &AtomicBool) -> Result<FolderScan, CensusError> {
    let mut walker = FileWalker::new(root)?;
    let mut files = Vec::new();
    for record in walker.by_ref() {
        if cancel.load(Ordering::SeqCst) {
            return Err(CensusError::Interrupted);
        }
        files.push(record);
    }
    tracing::debug!(
        "Scanned {} files under {} ({} skipped)",
        files.len(),
        root.display(),
        walker.skipped.len()
    );
    Ok(FolderScan {
        files,
        skipped: walker.skipped,
    })
}

/// Roll up every immediate child directory of `root`: recursive file
/// count, recursive total size, and the directory's own timestamp.
/// Children without a single readable file underneath are omitted.
pub fn scan_subfolders(root: &Path, cancel: &AtomicBool) -> Result<Vec<FolderRecord>, CensusError> {
    validate_root(root)?;

    let entries = std::fs::read_dir(root).map_err(|e| read_failure(root, e))?;
    let mut folders = Vec::new();
    for entry in entries {
        if cancel.load(Ordering::SeqCst) {
            return Err(CensusError::Interrupted);
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping entry under {}: {}", root.display(), e);
                continue;
            }
        };
        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        }
        if let Some(folder) = measure_subfolder(&path) {
            folders.push(folder);
        }
    }
    Ok(folders)
}

/// Counting pre-pass: how many regular files a scan of `root` will
/// visit. Unreadable entries are dropped silently, so the count can
/// run low on permission errors; it is a progress denominator, not a
/// guarantee.
pub fn count_files(root: &Path, cancel: &AtomicBool) -> Result<usize, CensusError> {
    validate_root(root)?;

    let mut count = 0;
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if cancel.load(Ordering::SeqCst) {
            return Err(CensusError::Interrupted);
        }
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Recursive rollup for one subdirectory. `None` when no file is
/// discoverable underneath or the directory itself cannot be stat-ed.
fn measure_subfolder(path: &Path) -> Option<FolderRecord> {
    let mut file_count = 0usize;
    let mut total_size = 0u64;
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            file_count += 1;
            total_size += meta.len();
        }
    }
    if file_count == 0 {
        return None;
    }

    let meta = std::fs::metadata(path).ok()?;
    // Creation time is not available on every filesystem; fall back to
    // the modification time like the reports expect.
    let created = meta
        .created()
        .or_else(|_| meta.modified())
        .map(local_datetime)
        .unwrap_or_else(|_| local_datetime(SystemTime::UNIX_EPOCH));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    Some(FolderRecord {
        name,
        path: path.to_path_buf(),
        file_count,
        total_size,
        created,
    })
}

/// Check that `root` exists, is a directory, and can be enumerated.
/// A denied root is fatal; per-entry errors later are merely skipped.
fn validate_root(root: &Path) -> Result<(), CensusError> {
    let meta = std::fs::metadata(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CensusError::NotFound(root.to_path_buf()),
        ErrorKind::PermissionDenied => CensusError::PermissionDenied(root.to_path_buf()),
        _ => read_failure(root, e),
    })?;
    if !meta.is_dir() {
        return Err(CensusError::NotADirectory(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => CensusError::PermissionDenied(root.to_path_buf()),
        _ => read_failure(root, e),
    })?;
    Ok(())
}

fn read_failure(path: &Path, source: std::io::Error) -> CensusError {
    CensusError::ReadFailure {
        path: path.to_path_buf(),
        source,
    }
}
