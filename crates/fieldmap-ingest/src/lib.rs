//! Field mapper ingestion utilities.
//!
//! Turns an uploaded file into the ordered list of column names the mapping
//! engine consumes, plus the remaining rows for the data preview.
//!
//! # Features
//!
//! - **CSV Parsing**: line splitting, blank-line removal and quote-aware
//!   field splitting
//! - **Format Detection**: accepted upload extensions (`.csv`, `.xlsx`,
//!   `.xls`); only CSV is parsed
//! - **File Guards**: size limit and UTF-16 rejection before reading
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fieldmap_ingest::{IngestOptions, read_table};
//!
//! let table = read_table(Path::new("customers.csv"), &IngestOptions::default())?;
//! println!("{:?}", table.headers);
//! ```

mod csv;
mod error;
mod format;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Parsing ===
pub use csv::{
    CsvTable, IngestOptions, MAX_UPLOAD_SIZE, check_file_size, parse_csv_line, parse_csv_text,
    read_csv_table, split_lines, validate_encoding,
};

// === Format Detection ===
pub use format::{SourceFormat, detect_format, read_table};
