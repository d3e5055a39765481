use crate::infra::build_pipeline;
use clap::Args;
use jobhunt_ai::config::AppConfig;
use jobhunt_ai::error::AppError;
use jobhunt_ai::telemetry;
use jobhunt_ai::workflows::matching::{JobPosting, MatchEngine};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Posting title
    #[arg(long)]
    pub(crate) title: String,
    /// Posting description (the title is reused when omitted)
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// JSON file holding an array of postings, e.g. `config/sample_postings.json`
    #[arg(long)]
    pub(crate) postings: PathBuf,
    /// Override the configured CSV application log
    #[arg(long)]
    pub(crate) application_log: Option<PathBuf>,
}

/// Scores one posting with the configured profile and prints the evaluation as JSON.
pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = MatchEngine::new(
        config.matching.load_profile()?,
        config.matching.load_vocabulary()?,
    );

    let evaluation = engine.evaluate(&args.title, args.description.as_deref());
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}

/// Processes a batch of postings end to end and prints the run report as JSON.
pub(crate) fn run_batch(args: RunArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.application_log {
        config.matching.application_log = Some(path);
    }
    telemetry::init(&config.telemetry)?;

    let postings = read_postings(&args.postings)?;
    let pipeline = build_pipeline(&config.matching)?;
    let report = pipeline.run(&postings);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_postings(path: &Path) -> Result<Vec<JobPosting>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
