//! Report generation
//!
//! Both reports are rendered fully in memory from the same analyzed
//! projects and then written through [`write_atomic`], so a run either
//! replaces a report completely or leaves the previous one untouched.

use organizer_sdk::errors::EngineError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub mod proposal;
pub mod sync;

pub use proposal::render_proposal;
pub use sync::{build_sync_payload, render_sync_payload};

/// Write `contents` to a sibling temp file, then rename it over `path`.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), EngineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    if let Err(e) = tokio::fs::write(&tmp, contents).await {
        tokio::fs::remove_file(&tmp).await.ok();
        return Err(EngineError::Report(format!(
            "Failed to write {:?}: {}",
            tmp, e
        )));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        tokio::fs::remove_file(&tmp).await.ok();
        return Err(EngineError::Report(format!(
            "Failed to replace {:?}: {}",
            path, e
        )));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Group digits in threes with commas: 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
