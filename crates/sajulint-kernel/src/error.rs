//! Error types for audit plumbing.
//!
//! Extraction and checks never fail; an unmatched pattern degrades to
//! "absent". Only file IO and artifact parsing produce errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// A required input document does not exist.
    #[error("input file missing: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Reading or writing a file failed.
    #[error("io failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A persisted artifact (report or patch plan) failed to parse.
    #[error("malformed artifact {}: {source}", path.display())]
    MalformedArtifact {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl AuditError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
