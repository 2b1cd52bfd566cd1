//! Project store loader
//!
//! Reads the inventory written by the upstream scanner: a JSON array of
//! project records. There is no other source to fall back to, so a missing
//! or malformed inventory is reported as a fatal [`EngineError`].

use organizer_sdk::errors::EngineError;
use organizer_sdk::types::ProjectRecord;
use std::fs;
use std::path::Path;

/// Load every project record from `path`, in file order.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>, EngineError> {
    if !path.exists() {
        return Err(EngineError::ProjectsFileMissing(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let projects: Vec<ProjectRecord> = serde_json::from_str(&contents)
        .map_err(|e| EngineError::ProjectsFileInvalid(path.to_path_buf(), e.to_string()))?;

    tracing::debug!("Read {} project records from {:?}", projects.len(), path);

    Ok(projects)
}
