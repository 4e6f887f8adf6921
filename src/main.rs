// src/main.rs
mod config;
mod extractors;
mod generation;
mod pipeline;
mod report;
mod server;
mod storage;
mod utils;

use clap::Parser;
use config::{Args, Command};
use generation::OllamaClient;
use pipeline::ReportPipeline;
use storage::ArtifactStore;
use utils::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments (env fallbacks included)
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting with args: {:?}", args);

    // 3. Load configuration layers
    let vocabulary = args.load_vocabulary()?;
    let front_matter = args.load_front_matter()?;
    tracing::debug!(
        "Recognizing {} section titles",
        vocabulary.titles().len()
    );

    // 4. Initialize storage and the generation client
    let store = ArtifactStore::new(&args.output_dir)?;
    let client = OllamaClient::new(&args.generator)?;
    tracing::debug!("Generation model: {}", client.model());

    let pipeline = ReportPipeline::new(client, vocabulary, front_matter, store)
        .with_revisions(args.revisions.clone())
        .with_debug(args.debug);

    // 5. Dispatch
    match args.command {
        Command::Generate { subject } => {
            println!(
                "Please wait, the report for {} is generating (this usually takes 10-15 minutes)...",
                subject
            );
            let report = pipeline.generate(&subject).await?;
            println!(
                "Report written to {} ({} sections)",
                report.path.display(),
                report.sections.len()
            );
        }
        Command::Render { subject, input } => {
            let raw = std::fs::read_to_string(&input)?;
            tracing::info!("Read {} bytes of raw text from {}", raw.len(), input.display());
            let report = pipeline.render_raw(&subject, &raw)?;
            println!(
                "Report written to {} ({} sections)",
                report.path.display(),
                report.sections.len()
            );
        }
        Command::Serve { bind } => {
            server::serve(pipeline, &bind).await?;
        }
    }

    Ok(())
}
