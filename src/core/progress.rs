/// Census progress reporting on stderr.
///
/// The census runs two traversal passes: a counting pass that fixes
/// the denominator, then the scan pass that emits records. When the
/// counting pass found nothing, per-file ticks stay silent and only
/// the completion line is printed. Disabled progress prints nothing
/// at all.
pub struct Progress {
    enabled: bool,
    total: usize,
    processed: usize,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            total: 0,
            processed: 0,
        }
    }

    /// Announce the counting pass.
    pub fn counting(&self) {
        if self.enabled {
            eprint!("Counting files...");
        }
    }

    /// Record the counting pass result.
    pub fn counted(&mut self, total: usize) {
        self.total = total;
        if self.enabled {
            eprintln!(" Found {total} files");
        }
    }

    /// Record one scanned file. Every hundredth file rewrites a
    /// carriage-returned percentage line.
    pub fn tick(&mut self) {
        self.processed += 1;
        if self.enabled && self.total > 0 && self.processed % 100 == 0 {
            let pct = (self.processed as f64 / self.total as f64) * 100.0;
            eprint!(
                "\rProcessing files... {}/{} ({pct:.1}%)",
                self.processed, self.total
            );
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Close out a completed scan pass.
    pub fn finish(&self) {
        if self.enabled {
            eprintln!("\nCompleted scanning {} files.", self.processed);
        }
    }

    /// Close out an interrupted scan pass.
    pub fn interrupted(&self) {
        if self.enabled {
            eprintln!("\nInterrupted. Processed {} files.", self.processed);
        }
    }
}
