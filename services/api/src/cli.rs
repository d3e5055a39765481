use crate::batch::{run_batch, run_evaluate, EvaluateArgs, RunArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobhunt_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Hunt Automation",
    about = "Score job postings against a candidate profile and track applications",
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
    /// Score a single posting and print the evaluation
    Evaluate(EvaluateArgs),
    /// Process a JSON file of postings through the full pipeline
    Run(RunArgs),
    /// Run the built-in sample postings through an in-memory pipeline
    Demo(DemoArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Run(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
