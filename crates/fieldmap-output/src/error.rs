//! Error types for mapping export.

use std::path::PathBuf;

use fieldmap_model::ExportFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Format the exporter does not render itself.
    #[error("export format {format} is not supported here")]
    UnsupportedFormat { format: ExportFormat },

    #[error("failed to serialize mapping: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
