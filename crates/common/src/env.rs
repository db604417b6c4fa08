//! Environment/runtime helpers
//!
//! Sanity checks to ensure the storage file's directory exists at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding `storage_path` exists; warn when the file itself
/// is missing (the store starts empty in that case).
pub async fn ensure_storage_dir(storage_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = storage_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(storage_path).await.is_err() {
        warn!(path = %storage_path.display(), "storage file not found; starting with an empty store");
    } else {
        info!(path = %storage_path.display(), "storage file present");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_directory() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("booking_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("storage.json");
        ensure_storage_dir(&file).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        // file itself is not created
        assert!(tokio::fs::metadata(&file).await.is_err());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_needs_no_directory() -> Result<(), anyhow::Error> {
        ensure_storage_dir(Path::new("booking-storage-does-not-exist.json")).await?;
        Ok(())
    }
}
