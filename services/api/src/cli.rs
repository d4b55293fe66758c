use crate::analyze::{run_analyze, AnalyzeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wastewise::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WasteWise",
    about = "Analyze multifamily waste service spend and serve the analysis API",
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
    /// Analyze a property payload and print or export the reports
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
    }
}
