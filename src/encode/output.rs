use crate::foundation::error::{CarpetError, CarpetResult};
use std::path::{Path, PathBuf};

/// Output file written under a hidden sibling name and renamed onto the destination only when
/// the encoder finished cleanly.
///
/// Dropping an uncommitted `StagedOutput` deletes the staged file.
#[derive(Debug)]
pub struct StagedOutput {
    dest: PathBuf,
    staging: PathBuf,
    committed: bool,
}

impl StagedOutput {
    /// Prepare to write `dest`. Fails when `dest` exists and `overwrite` is false.
    pub fn new(dest: impl Into<PathBuf>, overwrite: bool) -> CarpetResult<Self> {
        let dest = dest.into();
        let file_name = dest
            .file_name()
            .ok_or_else(|| {
                CarpetError::parameter(
                    "output",
                    format!("'{}' has no file name", dest.display()),
                )
            })?
            .to_string_lossy()
            .into_owned();

        ensure_parent_dir(&dest)?;
        if !overwrite && dest.exists() {
            return Err(CarpetError::parameter(
                "output",
                format!("output file '{}' already exists", dest.display()),
            ));
        }

        let staging = dest.with_file_name(format!(".{file_name}.partial"));
        if staging.exists() {
            std::fs::remove_file(&staging).map_err(|e| {
                CarpetError::encoding(format!(
                    "failed to remove stale staging file '{}': {e}",
                    staging.display()
                ))
            })?;
        }

        Ok(Self {
            dest,
            staging,
            committed: false,
        })
    }

    /// Path the encoder writes to until [`StagedOutput::commit`].
    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    /// Move the staged file onto the destination.
    pub fn commit(mut self) -> CarpetResult<PathBuf> {
        std::fs::rename(&self.staging, &self.dest).map_err(|e| {
            CarpetError::encoding(format!(
                "failed to move '{}' to '{}': {e}",
                self.staging.display(),
                self.dest.display()
            ))
        })?;
        self.committed = true;
        tracing::debug!(path = %self.dest.display(), "output committed");
        Ok(self.dest.clone())
    }

    /// Delete the staged file.
    pub fn discard(self) {
        drop(self);
    }
}

impl Drop for StagedOutput {
    fn drop(&mut self) {
        if !self.committed && self.staging.exists() {
            if let Err(e) = std::fs::remove_file(&self.staging) {
                tracing::warn!(path = %self.staging.display(), error = %e, "failed to remove staged output");
            } else {
                tracing::debug!(path = %self.staging.display(), "staged output discarded");
            }
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> CarpetResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
