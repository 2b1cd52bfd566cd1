// Project Organizer
// Main entry point for the project-organizer binary

use clap::Parser;
use organizer_engine::cli::Cli;
use organizer_engine::config::Config;
use organizer_engine::handlers::{handle_analyze, print_summary, OutputFormat};
use organizer_engine::telemetry::init_telemetry_with_level;
use organizer_sdk::errors::{EngineError, OrganizerErrorExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let config = match Config::load_with(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => exit_with(&anyhow::Error::new(e)),
    };

    init_telemetry_with_level(&config.core.log_level);

    tracing::info!(
        "Project Organizer v{} ({} - {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_COMMIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );

    let result = match handle_analyze(&config).await {
        Ok(summary) => print_summary(&summary, format),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

/// Print the diagnostic (and a hint for engine errors) to stderr and exit 1
fn exit_with(err: &anyhow::Error) -> ! {
    eprintln!("[ERROR] {:#}", err);
    if let Some(engine_err) = err.downcast_ref::<EngineError>() {
        eprintln!("[INFO] {}", engine_err.user_hint());
        if engine_err.is_recoverable() {
            eprintln!("[INFO] This may be transient; try running again.");
        }
    }
    std::process::exit(1)
}
