//! Storage zone handling
//!
//! The warehouse owns two filesystem areas: the landing zone raw files are
//! ingested from, and the checkpoint base. Teardown removes both.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Remove a storage path and everything under it
///
/// An absent path counts as already removed. Returns whether anything was
/// deleted.
pub fn remove_zone(path: &Path) -> Result<bool> {
    if !path.exists() {
        tracing::debug!("zone {} already absent", path.display());
        return Ok(false);
    }
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    tracing::debug!("removed zone {}", path.display());
    Ok(true)
}
