use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use filecensus::config::settings;
use filecensus::core::progress::Progress;
use filecensus::core::scanner;
use filecensus::error::CensusError;
use filecensus::export::census::CensusWriter;

#[derive(Parser, Debug)]
#[command(
    name = "file-census",
    version,
    about = "Scan a folder and write a CSV census of every file"
)]
struct Cli {
    /// Folder to scan (default: the Downloads folder)
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Output CSV file (default: file_census_<timestamp>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CensusError>() {
            Some(CensusError::Interrupted) => eprintln!("\nOperation cancelled by user."),
            _ => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let folder = settings::resolve_scan_root(cli.folder);
    let output = cli.output.unwrap_or_else(settings::default_census_output);
    let mut progress = Progress::new(!cli.quiet);

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

    if !cli.quiet {
        eprintln!("Scanning folder: {}", folder.display());
    }

    // Validates the root, so a bad folder fails before the counting
    // pass runs or the output file is created.
    let mut walker = scanner::FileWalker::new(&folder)?;

    // Counting pass fixes the progress denominator. Quiet runs skip it
    // and scan in a single pass; nothing would consume the count.
    if !cli.quiet {
        progress.counting();
        let total = scanner::count_files(&folder, &cancel)?;
        progress.counted(total);
    }

    let file = File::create(&output).map_err(|source| CensusError::WriteFailure {
        path: output.clone(),
        source,
    })?;
    let mut writer = CensusWriter::new(BufWriter::new(file))?;
    let mut interrupted = false;
    for record in walker.by_ref() {
        if cancel.load(Ordering::SeqCst) {
            interrupted = true;
            break;
        }
        writer.append(&record)?;
        progress.tick();
    }

    if interrupted {
        // Finalize what was already written; a truncated census is
        // still a parseable one.
        writer.finish()?;
        progress.interrupted();
        return Err(CensusError::Interrupted.into());
    }

    progress.finish();
    let rows = writer.finish()?;

    if !cli.quiet {
        if !walker.skipped().is_empty() {
            eprintln!("Skipped {} unreadable entries.", walker.skipped().len());
        }
        let shown = std::path::absolute(&output).unwrap_or_else(|_| output.clone());
        eprintln!("CSV report created: {}", shown.display());
        eprintln!("Total files processed: {rows}");
    }

    Ok(())
}
