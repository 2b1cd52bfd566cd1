//! CLI interface for the project organizer
//!
//! This module provides the command-line interface using clap's derive API.
//! The tool does one thing per invocation, so there are only global flags;
//! each one overrides the matching configuration value.

use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

/// Project Organizer
///
/// Classifies a scanned project inventory with Gemini and writes a markdown
/// proposal plus a sync payload for the notes service.
#[derive(Parser, Debug)]
#[command(name = "project-organizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding projects.json and the generated reports
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Gemini model to use
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Projects per classifier call
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            log_level: self.log.clone(),
            data_dir: self.data_dir.clone(),
            model: self.model.clone(),
            batch_size: self.batch_size,
        }
    }
}
