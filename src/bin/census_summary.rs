use std::path::PathBuf;

use clap::Parser;

use filecensus::config::settings;
use filecensus::core::analyzer::SummaryStats;
use filecensus::export::census::read_census;
use filecensus::export::summary::export_summary;

#[derive(Parser, Debug)]
#[command(
    name = "census-summary",
    version,
    about = "Generate a Markdown summary report from a file census CSV"
)]
struct Cli {
    /// Input CSV file from the file census
    csv_file: PathBuf,

    /// Output Markdown file (default: file_census_summary_<timestamp>.md)
    #[arg(short, long)]
    output: Option<PathBuf>,
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
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let output = cli.output.unwrap_or_else(settings::default_summary_output);

    eprintln!("Reading data from: {}", cli.csv_file.display());
    let records = read_census(&cli.csv_file)?;

    eprintln!("Analyzing data...");
    let stats = SummaryStats::compute(&records);

    eprintln!("Generating markdown report...");
    export_summary(&stats, chrono::Local::now().naive_local(), &output)?;

    let shown = std::path::absolute(&output).unwrap_or_else(|_| output.clone());
    eprintln!("Summary report created: {}", shown.display());

    Ok(())
}
