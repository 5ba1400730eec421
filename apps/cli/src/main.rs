//! Scribe - clinical note generation for FHIR bundles
//!
//! Reads a patient-record bundle, generates a narrative note for each
//! document reference whose encounter selects a template, and writes the
//! annotated bundle copy to `output/`.

mod config;
mod error;
mod output;
mod pipeline;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use config::Config;
use scribe_bundle::Bundle;
use scribe_llm::{NoteGenerator, OpenAiClient, RetryPolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Tool for generating the clinical notes of a FHIR bundle with a
/// chat-completion service.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about)]
struct Args {
    /// The filename of the input FHIR bundle
    #[arg(short, long)]
    bundle: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if !args.bundle.exists() {
        Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("unable to find bundle file: {}", args.bundle.display()),
            )
            .exit();
    }

    let config = Config::from_env().context("Failed to load configuration")?;

    let json = std::fs::read_to_string(&args.bundle)
        .with_context(|| format!("Failed to read bundle file {}", args.bundle.display()))?;
    let bundle = Bundle::from_json(&json)
        .with_context(|| format!("Failed to parse bundle file {}", args.bundle.display()))?;

    tracing::info!(
        bundle = %args.bundle.display(),
        entries = bundle.entries().len(),
        model = %config.model,
        "Starting note generation"
    );

    let client = match &config.base_url {
        Some(base_url) => OpenAiClient::with_base_url(&config.api_key, &config.model, base_url),
        None => OpenAiClient::new(&config.api_key, &config.model),
    }
    .context("Failed to create generation client")?;
    let generator = NoteGenerator::new(client, RetryPolicy::default());

    let annotated = pipeline::run(&bundle, &generator, pipeline::INTER_REQUEST_DELAY)
        .await
        .context("Note generation failed")?;

    let path = output::persist(&args.bundle, &annotated).context("Failed to write output bundle")?;
    tracing::info!(path = %path.display(), "Wrote annotated bundle");

    Ok(())
}
