//! Sources - The I/O Boundary
//!
//! Everything else in the crate works on in-memory text. Files are opened
//! here, only for the duration of a read or a write.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move artifact into {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The three opaque inputs of an amalgamation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub declarations: String,
    pub implementation: String,
    pub license: String,
}

impl SourceSet {
    pub fn new(
        declarations: impl Into<String>,
        implementation: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        Self {
            declarations: declarations.into(),
            implementation: implementation.into(),
            license: license.into(),
        }
    }

    pub fn load(paths: &SourcePaths) -> Result<Self, SourceError> {
        Ok(Self {
            declarations: read_text(&paths.header)?,
            implementation: read_text(&paths.source)?,
            license: read_text(&paths.license)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub header: PathBuf,
    pub source: PathBuf,
    pub license: PathBuf,
}

impl SourcePaths {
    /// File name of the header, as it appears in `#include` lines.
    pub fn header_name(&self) -> String {
        file_name(&self.header)
    }

    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn read_text(path: &Path) -> Result<String, SourceError> {
    debug!(path = %path.display(), "reading input");
    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the artifact next to its destination, then rename it into place.
///
/// A failed write leaves any previous artifact untouched; the temporary file
/// is removed when it is dropped.
pub fn write_artifact(path: &Path, text: &str) -> Result<(), SourceError> {
    let write_err = |source| SourceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    tmp.persist(path).map_err(|e| SourceError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), bytes = text.len(), "artifact written");
    Ok(())
}
