//! CSV reading utilities.

mod line;
mod reader;

pub use line::{parse_csv_line, split_lines};
pub use reader::{
    CsvTable, IngestOptions, MAX_UPLOAD_SIZE, check_file_size, parse_csv_text, read_csv_table,
    validate_encoding,
};
