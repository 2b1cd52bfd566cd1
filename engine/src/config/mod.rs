//! Configuration management
//!
//! This module handles loading, validation and command-line overrides of the
//! organizer configuration. Configuration is stored in TOML format at
//! ~/.project_data/organizer.toml. When that file does not exist the built-in
//! defaults are used; nothing is written to disk.
//!
//! # Configuration Sections
//!
//! - **core**: Log level, data directory
//! - **paths**: Inventory, proposal and sync payload file names
//! - **classifier**: Gemini endpoint, model, batching and generation settings
//!
//! # Path Expansion
//!
//! `~` is expanded to the user's home directory. Relative file names in
//! `[paths]` are resolved against `core.data_dir`.
//!
//! # Examples
//!
//! ```no_run
//! use organizer_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! println!("Inventory: {:?}", config.projects_file());
//! println!("Model: {}", config.classifier.model);
//! # Ok(())
//! # }
//! ```

use organizer_sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
///
/// Built once at startup and passed by reference to every component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Input and output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Remote classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the inventory and both reports (supports ~ expansion)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// File locations, relative to `core.data_dir` unless absolute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Scanner output read at startup
    #[serde(default = "default_projects_file")]
    pub projects_file: PathBuf,

    /// Human-readable markdown proposal
    #[serde(default = "default_proposal_file")]
    pub proposal_file: PathBuf,

    /// JSON payload for the note-taking service
    #[serde(default = "default_sync_file")]
    pub sync_file: PathBuf,
}

/// Gemini classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL for the Gemini API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Projects sent per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    // Note: the key itself is never stored in config
}

/// Command-line overrides applied on top of the loaded file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub model: Option<String>,
    pub batch_size: Option<usize>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("~/.project_data")
}

fn default_projects_file() -> PathBuf {
    PathBuf::from("projects.json")
}

fn default_proposal_file() -> PathBuf {
    PathBuf::from("organization_proposal.md")
}

fn default_sync_file() -> PathBuf {
    PathBuf::from("notes_sync_data.json")
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_batch_size() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f64 {
    0.2
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f64 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            projects_file: default_projects_file(),
            proposal_file: default_proposal_file(),
            sync_file: default_sync_file(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicit path must exist. Without one, ~/.project_data/organizer.toml
    /// is read if present and built-in defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit configuration file cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        Self::load_with(path, &Overrides::default())
    }

    /// Load configuration and apply command-line overrides before validating
    pub fn load_with(path: Option<&Path>, overrides: &Overrides) -> Result<Self, EngineError> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Self::read_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(overrides);
        config.validate_and_process()?;

        Ok(config)
    }

    /// Parse configuration from a TOML string and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let mut config: Config = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate_and_process()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default configuration file path (~/.project_data/organizer.toml)
    fn default_config_path() -> Result<PathBuf, EngineError> {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".project_data").join("organizer.toml"))
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(level) = &overrides.log_level {
            self.core.log_level = level.clone();
        }
        if let Some(dir) = &overrides.data_dir {
            self.core.data_dir = dir.clone();
        }
        if let Some(model) = &overrides.model {
            self.classifier.model = model.clone();
        }
        if let Some(size) = overrides.batch_size {
            self.classifier.batch_size = size;
        }
    }

    /// Scanner inventory location
    pub fn projects_file(&self) -> PathBuf {
        self.resolve(&self.paths.projects_file)
    }

    /// Markdown proposal location
    pub fn proposal_file(&self) -> PathBuf {
        self.resolve(&self.paths.proposal_file)
    }

    /// Sync payload location
    pub fn sync_file(&self) -> PathBuf {
        self.resolve(&self.paths.sync_file)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.core.data_dir.join(file)
        }
    }

    /// Validate and process configuration
    ///
    /// This method:
    /// - Validates the log level and classifier settings
    /// - Expands ~ in the data directory and file paths
    ///
    /// The data directory is not created here: a missing inventory is
    /// reported by the loader.
    fn validate_and_process(&mut self) -> Result<(), EngineError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                valid_log_levels.join(", ")
            )));
        }

        if self.classifier.batch_size == 0 {
            return Err(EngineError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.classifier.timeout_secs == 0 {
            return Err(EngineError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.classifier.temperature) {
            return Err(EngineError::Config(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.classifier.top_p) {
            return Err(EngineError::Config(
                "top_p must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.classifier.api_key_env.trim().is_empty() {
            return Err(EngineError::Config(
                "api_key_env must name an environment variable".to_string(),
            ));
        }

        self.core.data_dir = expand_path(&self.core.data_dir)?;
        self.paths.projects_file = expand_path(&self.paths.projects_file)?;
        self.paths.proposal_file = expand_path(&self.paths.proposal_file)?;
        self.paths.sync_file = expand_path(&self.paths.sync_file)?;

        Ok(())
    }
}

/// Expand ~ in path to user's home directory
///
/// # Examples
///
/// ```ignore
/// let path = PathBuf::from("~/.project_data");
/// let expanded = expand_path(&path)?;
/// // expanded is now /home/user/.project_data (on Unix)
/// ```
fn expand_path(path: &Path) -> Result<PathBuf, EngineError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| EngineError::Config("Invalid UTF-8 in path".to_string()))?;

    if let Some(rest) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(rest))
    } else if path_str == "~" {
        dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default();

        assert_eq!(config.core.log_level, "info");
        assert_eq!(config.classifier.model, "gemini-1.5-flash");
        assert_eq!(config.classifier.batch_size, 5);
        assert_eq!(config.classifier.timeout(), Duration::from_secs(30));
        assert_eq!(config.classifier.top_k, 40);
        assert_eq!(config.classifier.max_output_tokens, 2048);
        assert_eq!(config.classifier.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test");
        let expanded = expand_path(&path).unwrap();

        let home = dirs::home_dir().unwrap();
        assert_eq!(expanded, home.join("test"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = PathBuf::from("/absolute/path");
        let expanded = expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_file_paths_resolve_against_data_dir() {
        let config = Config::from_toml_str(
            r#"
[core]
data_dir = "/srv/inventory"

[paths]
sync_file = "/tmp/sync.json"
"#,
        )
        .unwrap();

        assert_eq!(
            config.projects_file(),
            PathBuf::from("/srv/inventory/projects.json")
        );
        assert_eq!(
            config.proposal_file(),
            PathBuf::from("/srv/inventory/organization_proposal.md")
        );
        assert_eq!(config.sync_file(), PathBuf::from("/tmp/sync.json"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_toml_str("[classifier]\nbatch_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("batch_size"));

        let err = Config::from_toml_str("[core]\nlog_level = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));

        let err = Config::from_toml_str("[classifier]\ntop_p = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("top_p"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides {
            log_level: Some("debug".into()),
            data_dir: Some(PathBuf::from("/data")),
            model: Some("gemini-1.5-pro".into()),
            batch_size: Some(2),
        });
        config.validate_and_process().unwrap();

        assert_eq!(config.core.log_level, "debug");
        assert_eq!(config.projects_file(), PathBuf::from("/data/projects.json"));
        assert_eq!(config.classifier.model, "gemini-1.5-pro");
        assert_eq!(config.classifier.batch_size, 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string(&config).unwrap();

        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(config.core.log_level, deserialized.core.log_level);
        assert_eq!(config.classifier.model, deserialized.classifier.model);
    }
}
