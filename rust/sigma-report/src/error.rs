use std::path::PathBuf;

/// Errors that can occur while building or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed pair record on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
