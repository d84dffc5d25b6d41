//! Error types for bitruvius_pose

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving or querying pose libraries
#[derive(Error, Debug)]
pub enum PoseError {
    /// Reading or writing a library file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A library file is not a JSON array of pose records
    #[error("Invalid pose library JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No entry with this id exists
    #[error("Unknown pose id: {0}")]
    UnknownPose(String),
}

/// Result type for bitruvius_pose operations
pub type Result<T> = std::result::Result<T, PoseError>;
