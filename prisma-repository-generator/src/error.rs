//! Error types for code generation
//!
//! Every failure aborts the run; nothing here is recovered locally.

use std::path::PathBuf;

/// Error type for code generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The DMMF document was missing or could not be decoded
    #[error("schema extraction error: {0}")]
    SchemaExtraction(String),

    /// Generator options could not be resolved (output path, env values)
    #[error("options error: {0}")]
    Options(String),

    /// File system failure while preparing or writing output
    #[error("{}: {source}", path.display())]
    Io {
        /// Path being touched when the failure happened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or decode a protocol message
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}
