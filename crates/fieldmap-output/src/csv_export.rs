//! CSV rendering of a mapping.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use fieldmap_model::ExportTriple;

use crate::error::{OutputError, Result};

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 3] = ["Source Field", "Target Field", "Status"];

/// Header line, then one fully quoted row per correspondence.
///
/// Quotes inside values are doubled. Every record, the last included, ends
/// with `\n`.
pub fn export_csv(triples: &[ExportTriple]) -> Result<String> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(CSV_HEADER)?;
    let buffer = header
        .into_inner()
        .map_err(|e| OutputError::Csv(e.into_error().into()))?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);
    for triple in triples {
        rows.write_record([
            triple.source_field_name.as_str(),
            triple.target_field_name.as_str(),
            triple.status.as_str(),
        ])?;
    }
    let bytes = rows
        .into_inner()
        .map_err(|e| OutputError::Csv(e.into_error().into()))?;

    // Every field came from a `&str`.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
