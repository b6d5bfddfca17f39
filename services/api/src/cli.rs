use crate::commands::{run_export, run_summary, ExportArgs, SummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crime_intel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Crime Intelligence Platform",
    about = "Filter, summarize, and export crime-report feeds from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print analytics for a report batch
    Summary(SummaryArgs),
    /// Write a report batch as CSV or JSON
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Report batch (.json or .csv) to serve instead of APP_REPORTS_PATH
    #[arg(long)]
    pub(crate) reports: Option<std::path::PathBuf>,
    /// Reload the batch every N minutes (0 disables)
    #[arg(long)]
    pub(crate) refresh_minutes: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Summary(args) => run_summary(args),
        Command::Export(args) => run_export(args),
    }
}
