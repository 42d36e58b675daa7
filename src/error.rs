use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while touching the shared counter file.
///
/// None of these cross the app/widget boundary: callers coerce them
/// through [`crate::state::policy`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create shared directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read counter file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write counter file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode counter record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("counter file '{path}' does not hold a valid record")]
    Decode { path: PathBuf },

    #[error("background storage task did not complete: {0}")]
    Task(String),
}
