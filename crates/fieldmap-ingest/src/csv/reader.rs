//! CSV file reading with upload guards.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

use super::line::{parse_csv_line, split_lines};

/// Maximum upload size accepted by default (50 MB).
pub const MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;

/// Options for reading an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_UPLOAD_SIZE,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Parsed CSV content: the header row and the data rows after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// First `limit` data rows, for the preview panel.
    pub fn preview(&self, limit: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(limit)]
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parses in-memory CSV text.
///
/// `name` is only used in error messages. A leading byte-order mark is
/// ignored.
pub fn parse_csv_text(name: &str, text: &str) -> Result<CsvTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines = split_lines(text);
    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(IngestError::EmptyFile {
            name: name.to_string(),
        });
    };

    let headers = parse_csv_line(header_line);
    let rows: Vec<Vec<String>> = data_lines.iter().map(|line| parse_csv_line(line)).collect();
    debug!(
        file = name,
        columns = headers.len(),
        rows = rows.len(),
        "parsed CSV text"
    );
    Ok(CsvTable { headers, rows })
}

/// Reads and parses a CSV file from disk.
pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<CsvTable> {
    check_file_size(path, options.max_file_size)?;
    validate_encoding(path)?;

    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let name = path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    parse_csv_text(&name, &text)
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects UTF-16 encoded files, which the line parser cannot read.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::io(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::io(path, e))?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}
