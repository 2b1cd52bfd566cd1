//! Command handlers
//!
//! `handle_analyze` runs the whole job: check the API key, load the
//! inventory, classify in batches, then render and write both reports.
//! The two fatal preconditions are checked before any remote call, and both
//! reports are rendered before either file is touched.

use anyhow::Result;
use chrono::Local;
use organizer_sdk::errors::EngineError;
use organizer_sdk::types::{AnalyzedProject, ClassificationSource, ProjectRecord};
use serde::Serialize;
use std::path::PathBuf;

use crate::conductor::BatchConductor;
use crate::config::Config;
use crate::llm::gemini::GeminiClassifier;
use crate::llm::Classifier;
use crate::report::{build_sync_payload, render_proposal, render_sync_payload, write_atomic};
use crate::secrets::{api_key_from_env, SecretString};
use crate::store::load_projects;

/// Output format for the end-of-run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What a completed run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_projects: usize,
    pub remote_classified: usize,
    pub fallback_classified: usize,
    pub proposal_file: PathBuf,
    pub sync_file: PathBuf,
}

/// Run the analysis with the API key from the configured environment variable
pub async fn handle_analyze(config: &Config) -> Result<RunSummary> {
    let api_key = api_key_from_env(&config.classifier.api_key_env)?;
    analyze(config, api_key).await
}

/// Run the analysis against Gemini with an explicit key
pub async fn analyze(config: &Config, api_key: SecretString) -> Result<RunSummary> {
    let projects = load_projects(&config.projects_file())?;
    tracing::info!("Loaded {} projects", projects.len());

    let classifier = GeminiClassifier::new(config.classifier.clone(), api_key)
        .map_err(|e| EngineError::Classifier(e.to_string()))?;

    run_pipeline(config, Box::new(classifier), projects).await
}

/// Classify `projects` with `classifier` and write both reports
pub async fn run_pipeline(
    config: &Config,
    classifier: Box<dyn Classifier>,
    projects: Vec<ProjectRecord>,
) -> Result<RunSummary> {
    let conductor = BatchConductor::new(classifier, config.classifier.batch_size);
    let analyzed = conductor.run(projects).await;

    let generated_at = Local::now();
    let proposal = render_proposal(&analyzed, &generated_at);
    let payload = build_sync_payload(&analyzed, &generated_at)?;
    let sync_json = render_sync_payload(&payload)?;

    let proposal_file = config.proposal_file();
    write_atomic(&proposal_file, proposal.as_bytes()).await?;
    tracing::info!("Proposal generated: {}", proposal_file.display());

    let sync_file = config.sync_file();
    write_atomic(&sync_file, sync_json.as_bytes()).await?;
    tracing::info!("Sync data generated: {}", sync_file.display());

    let summary = summarize(&analyzed, proposal_file, sync_file);
    if summary.fallback_classified > 0 {
        tracing::warn!(
            "{} of {} projects used fallback classifications",
            summary.fallback_classified,
            summary.total_projects
        );
    }

    Ok(summary)
}

fn summarize(analyzed: &[AnalyzedProject], proposal_file: PathBuf, sync_file: PathBuf) -> RunSummary {
    let remote_classified = analyzed
        .iter()
        .filter(|p| p.source == ClassificationSource::Remote)
        .count();

    RunSummary {
        total_projects: analyzed.len(),
        remote_classified,
        fallback_classified: analyzed.len() - remote_classified,
        proposal_file,
        sync_file,
    }
}

/// Print the end-of-run summary to stdout
pub fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Analysis complete!");
            println!(
                "  Projects: {} ({} classified remotely, {} fallback)",
                summary.total_projects, summary.remote_classified, summary.fallback_classified
            );
            println!();
            println!("Next steps:");
            println!(
                "  1. Review proposal: cat {}",
                summary.proposal_file.display()
            );
            println!("  2. Review sync data: cat {}", summary.sync_file.display());
            println!("  3. Sync the payload to the notes service");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
    }
    Ok(())
}
