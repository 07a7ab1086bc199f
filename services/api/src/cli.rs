use crate::demo::{run_compliance_report, run_demo, DemoArgs, ReportArgs};
use crate::server;
use byggdok::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Byggdok",
    about = "Track building compliance documents and surface documentation gaps",
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
    /// Inspect documentation gaps from the command line
    Compliance {
        #[command(subcommand)]
        command: ComplianceCommand,
    },
    /// Run a CLI demo over the seeded property portfolio
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ComplianceCommand {
    /// Print the gap report for the demo portfolio
    Report(ReportArgs),
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
        Command::Compliance {
            command: ComplianceCommand::Report(args),
        } => run_compliance_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
