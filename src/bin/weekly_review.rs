use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use filecensus::config::settings;
use filecensus::core::analyzer::ReviewStats;
use filecensus::core::scanner;
use filecensus::error::CensusError;
use filecensus::export::review::export_review;

#[derive(Parser, Debug)]
#[command(
    name = "weekly-review",
    version,
    about = "Generate an Obsidian-formatted weekly review of the Downloads folder"
)]
struct Cli {
    /// Folder to scan (default: the Downloads folder)
    #[arg(short, long)]
    folder: Option<PathBuf>,
}

fn main() {
    // Logs go to stderr; stdout is reserved for the report itself.
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
            Some(_) => eprintln!("Error: {err:#}"),
            None => eprintln!("Unexpected error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // The button and delete links embed the path, so a relative flag is
    // resolved before anything renders.
    let folder = settings::resolve_scan_root(cli.folder);

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

    let scan = scanner::scan_files(&folder, &cancel)?;
    let subfolders = scanner::scan_subfolders(&folder, &cancel)?;
    let stats = ReviewStats::compute(
        &scan.files,
        &subfolders,
        chrono::Local::now().naive_local(),
    );

    // Render only after both passes finished, so an interrupted run
    // never leaves half a report on stdout.
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    export_review(&mut out, &stats, &folder)?;
    out.flush()?;

    Ok(())
}
