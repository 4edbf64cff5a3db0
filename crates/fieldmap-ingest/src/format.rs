//! Upload format detection.

use std::fmt;
use std::path::Path;

use tracing::warn;

use crate::csv::{CsvTable, IngestOptions, read_csv_table};
use crate::error::{IngestError, Result};

/// File types accepted by the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    /// Maps a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("xlsx") {
            Some(Self::Xlsx)
        } else if ext.eq_ignore_ascii_case("xls") {
            Some(Self::Xls)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }

    /// Spreadsheet formats are accepted for upload but cannot be parsed.
    pub fn is_parseable(&self) -> bool {
        matches!(self, Self::Csv)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Detects the upload format from the file extension.
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceFormat::from_extension)
        .ok_or_else(|| IngestError::UnsupportedFormat {
            name: display_name(path),
        })
}

/// Reads an uploaded file into a table, dispatching on its format.
pub fn read_table(path: &Path, options: &IngestOptions) -> Result<CsvTable> {
    let format = detect_format(path)?;
    if !format.is_parseable() {
        warn!(file = %path.display(), %format, "spreadsheet parsing is not supported");
        return Err(IngestError::UnsupportedFormat {
            name: display_name(path),
        });
    }
    read_csv_table(path, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_case_insensitive() {
        assert_eq!(
            detect_format(Path::new("data/Source.CSV")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            detect_format(Path::new("target.xlsx")).unwrap(),
            SourceFormat::Xlsx
        );
        assert_eq!(detect_format(Path::new("old.XLS")).unwrap(), SourceFormat::Xls);
    }

    #[test]
    fn test_detect_format_rejects_other_extensions() {
        assert!(matches!(
            detect_format(Path::new("notes.txt")),
            Err(IngestError::UnsupportedFormat { name }) if name == "notes.txt"
        ));
        assert!(detect_format(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_spreadsheets_are_not_parseable() {
        assert!(SourceFormat::Csv.is_parseable());
        assert!(!SourceFormat::Xlsx.is_parseable());
        let result = read_table(Path::new("book.xlsx"), &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
    }
}
