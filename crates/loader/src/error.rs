//! Model loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// A model could not be loaded. Callers continue with an empty world.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("model {} is unreachable: {source}", .path.display())]
    Unreachable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid model JSON.
    #[error("model {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parsed but describes an unusable model.
    #[error("model {} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// The loading task went away before reporting a result.
    #[error("model load was cancelled")]
    Cancelled,
}
