//! Reading and atomically writing the JSON artifacts

use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Read a JSON document without imposing a schema
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PipelineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// A document written to a temporary file beside its destination, not yet
/// visible under the final name
#[derive(Debug)]
pub struct StagedJson {
    file: tempfile::NamedTempFile,
    path: PathBuf,
}

impl StagedJson {
    /// Pretty-print `value` into a temporary file in the destination
    /// directory, creating the directory when needed
    pub fn stage<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<Self> {
        let io_err = |source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut content = serde_json::to_string_pretty(value).map_err(|source| PipelineError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        content.push('\n');

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(io_err)?;

        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        file.write_all(content.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        debug!("Staged {} bytes for {}", content.len(), path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Replace the destination in one rename
    pub fn commit(self) -> Result<()> {
        let path = self.path;
        self.file.persist(&path).map_err(|e| PipelineError::Io {
            path: path.clone(),
            source: e.error,
        })?;
        debug!("Replaced {}", path.display());
        Ok(())
    }
}

/// Pretty-print `value` and replace `path` in one rename.
///
/// Readers never observe a partially written file.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    StagedJson::stage(path, value)?.commit()
}
