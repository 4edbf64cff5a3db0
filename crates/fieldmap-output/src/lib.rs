//! Field mapper export.
//!
//! Renders the export triples of a mapping as JSON or CSV. Image export is
//! drawn by the host and is rejected here.

mod csv_export;
mod error;
mod json_export;

use std::fs;
use std::path::Path;

use tracing::info;

use fieldmap_model::{ExportFormat, ExportTriple};

pub use csv_export::{CSV_HEADER, export_csv};
pub use error::{OutputError, Result};
pub use json_export::export_json;

/// Renders `triples` in `format`.
pub fn export(triples: &[ExportTriple], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(triples, format),
        ExportFormat::Csv => export_csv(triples),
        ExportFormat::Image => Err(OutputError::UnsupportedFormat { format }),
    }
}

/// Renders `triples` and writes them to `path`, creating parent directories.
pub fn write_export(path: &Path, triples: &[ExportTriple], format: ExportFormat) -> Result<()> {
    let rendered = export(triples, format)?;
    ensure_parent_dir(path)?;
    fs::write(path, rendered).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), %format, connections = triples.len(), "wrote mapping export");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
