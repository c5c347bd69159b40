//! Staged report files
//!
//! Reports are written to a hidden temp sibling of their target and only
//! renamed into place once every report of the run has been written. A staged
//! file that is dropped without being committed removes its temp file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A fully written report waiting to be moved to its target path
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Write a report through `write` into the temp sibling of `target`.
    pub fn write_with<F>(target: &Path, write: F) -> Result<Self>
    where
        F: FnOnce(&mut std::fs::File) -> Result<()>,
    {
        let staged = Self {
            temp_path: temp_sibling(target)?,
            target: target.to_path_buf(),
            committed: false,
        };

        let mut file = std::fs::File::create(&staged.temp_path).with_context(|| {
            format!("Failed to create output file: {}", staged.temp_path.display())
        })?;
        write(&mut file)?;

        Ok(staged)
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the temp file onto the target path.
    pub fn commit(mut self) -> Result<()> {
        std::fs::rename(&self.temp_path, &self.target)
            .with_context(|| format!("Failed to move report into place: {}", self.target.display()))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.temp_path);
        }
    }
}

/// Commit staged reports in order.
///
/// If any rename fails, reports already moved into place are removed again.
pub fn commit_all(staged: Vec<StagedFile>) -> Result<()> {
    let mut committed: Vec<PathBuf> = Vec::with_capacity(staged.len());

    for file in staged {
        let target = file.target().to_path_buf();
        if let Err(err) = file.commit() {
            for path in &committed {
                let _ = std::fs::remove_file(path);
            }
            return Err(err);
        }
        committed.push(target);
    }

    Ok(())
}

pub(crate) fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Output path has no file name: {}", path.display()))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name)))
}
