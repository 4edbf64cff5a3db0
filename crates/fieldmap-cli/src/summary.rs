use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fieldmap_ingest::CsvTable;
use fieldmap_map::MappingSession;
use fieldmap_model::{FieldStatus, MappingStatus, MappingSummary, Side};

use fieldmap_cli::pipeline::ReplayReport;

use crate::commands::ExportOutcome;

/// Both field lists side by side with their status.
pub fn print_fields(session: &MappingSession) {
    let query = session.query();
    let source = query.field_views(Side::Source);
    let target = query.field_views(Side::Target);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Source"),
        header_cell("Status"),
        header_cell("Target"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);

    for idx in 0..source.len().max(target.len()) {
        let mut row = vec![dim_cell(idx)];
        for views in [&source, &target] {
            match views.get(idx) {
                Some(view) => {
                    row.push(Cell::new(format!("{} ({})", view.field.name, view.field.id)));
                    row.push(field_status_cell(view.status));
                }
                None => {
                    row.push(dim_cell("-"));
                    row.push(dim_cell("-"));
                }
            }
        }
        table.add_row(row);
    }
    println!("{table}");
    print_mapping_summary(&query.summary());
}

/// The current correspondences in insertion order.
pub fn print_suggestions(session: &MappingSession) {
    let query = session.query();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);

    for (corr, triple) in query.correspondences().iter().zip(query.export_triples()) {
        table.add_row(vec![
            dim_cell(&corr.id),
            Cell::new(triple.source_field_name),
            Cell::new(triple.target_field_name),
            mapping_status_cell(corr.status),
        ]);
    }
    if query.correspondences().is_empty() {
        println!("No suggestions.");
    } else {
        println!("{table}");
    }
}

pub fn print_mapping_summary(summary: &MappingSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Matched"),
        header_cell("Suggested"),
        header_cell("Manual"),
        header_cell("Unmapped source"),
        header_cell("Unmapped target"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 0..6 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        count_cell(summary.matched, Color::Green),
        count_cell(summary.suggested, Color::Yellow),
        count_cell(summary.manual, Color::Blue),
        count_cell(summary.unmapped_source, Color::DarkGrey),
        count_cell(summary.unmapped_target, Color::DarkGrey),
    ]);
    println!("{table}");
}

/// Rejected gestures go to stderr so an export on stdout stays clean.
pub fn print_rejected(report: &ReplayReport) {
    if report.rejected.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Gesture"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for rejected in &report.rejected {
        table.add_row(vec![
            Cell::new(rejected.step),
            Cell::new(&rejected.gesture),
            Cell::new(&rejected.error).fg(Color::Red),
        ]);
    }
    eprintln!("Rejected gestures:");
    eprintln!("{table}");
}

pub fn print_export_summary(outcome: &ExportOutcome) {
    if let Some(path) = &outcome.output {
        eprintln!("Export: {} ({})", path.display(), outcome.format);
    }
    eprintln!(
        "Gestures: {} applied, {} rejected",
        outcome.replay.applied,
        outcome.replay.rejected.len()
    );
    let summary = &outcome.summary;
    eprintln!(
        "Connections: {} ({} matched, {} suggested, {} manual)",
        summary.total, summary.matched, summary.suggested, summary.manual
    );
}

/// Header plus the first `rows` data rows of an upload.
pub fn print_preview(path: &Path, csv: &CsvTable, rows: usize) {
    println!("File: {}", path.display());
    println!("Columns: {}  Rows: {}", csv.headers.len(), csv.row_count());
    let mut table = Table::new();
    table.set_header(csv.headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in csv.preview(rows) {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    println!("{table}");
    if csv.row_count() > rows {
        println!("... {} more row(s)", csv.row_count() - rows);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn field_status_cell(status: FieldStatus) -> Cell {
    match status {
        FieldStatus::Matched => Cell::new("matched").fg(Color::Green),
        FieldStatus::Suggested => Cell::new("suggested").fg(Color::Yellow),
        FieldStatus::Manual => Cell::new("manual").fg(Color::Blue),
        FieldStatus::Unmapped => dim_cell("unmapped"),
    }
}

fn mapping_status_cell(status: MappingStatus) -> Cell {
    field_status_cell(status.into())
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
