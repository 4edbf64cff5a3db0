//! Steps shared by the CLI commands: load, seed, replay, render.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use fieldmap_ingest::{CsvTable, IngestOptions, read_table};
use fieldmap_map::{Gesture, MappingSession, NameSimilarityPolicy};
use fieldmap_model::{ExportFormat, MappingError};
use fieldmap_output::export;

/// How the initial suggestions are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SeedPolicy {
    /// Index `i` with index `i`.
    #[default]
    Positional,
    /// Similar names, at or above the given score.
    Names { min_similarity: f64 },
}

/// Reads one uploaded file.
pub fn load_table(path: &Path, options: &IngestOptions) -> Result<CsvTable> {
    read_table(path, options).with_context(|| format!("read {}", path.display()))
}

/// Loads both files and seeds suggestions.
pub fn build_session(
    source: &Path,
    target: &Path,
    options: &IngestOptions,
    policy: SeedPolicy,
) -> Result<MappingSession> {
    let span = info_span!("load", source = %source.display(), target = %target.display());
    let _guard = span.enter();

    let source_table = load_table(source, options)?;
    let target_table = load_table(target, options)?;
    let mut session = MappingSession::new(source_table.headers, target_table.headers)
        .context("register columns")?;
    let created = match policy {
        SeedPolicy::Positional => session.seed(),
        SeedPolicy::Names { min_similarity } => {
            session.seed_with(NameSimilarityPolicy::new(min_similarity))
        }
    };
    info!(
        source_fields = session.registry().source().len(),
        target_fields = session.registry().target().len(),
        suggestions = created.len(),
        "session ready"
    );
    Ok(session)
}

/// Reads a gesture script: a JSON array of tagged actions.
pub fn load_gestures(path: &Path) -> Result<Vec<Gesture>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse gestures in {}", path.display()))
}

/// A gesture that did not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedGesture {
    /// Position in the script, starting at 1.
    pub step: usize,
    pub gesture: Gesture,
    pub error: MappingError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<RejectedGesture>,
}

/// Applies gestures in order. Rejected ones leave the session unchanged
/// and the replay carries on.
pub fn replay(session: &mut MappingSession, gestures: &[Gesture]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (idx, gesture) in gestures.iter().enumerate() {
        match session.apply(gesture) {
            Ok(()) => report.applied += 1,
            Err(error) => report.rejected.push(RejectedGesture {
                step: idx + 1,
                gesture: gesture.clone(),
                error,
            }),
        }
    }
    if !report.rejected.is_empty() {
        warn!(
            applied = report.applied,
            rejected = report.rejected.len(),
            "some gestures were rejected"
        );
    }
    report
}

/// Renders the session's export triples.
pub fn render_export(session: &MappingSession, format: ExportFormat) -> Result<String> {
    let triples = session.export_triples();
    export(&triples, format).with_context(|| format!("render {format} export"))
}

/// Writes a rendered export to a stream.
///
/// The bytes match what `write_export` puts in a file. A final newline is
/// added only when the rendering lacks one.
pub fn emit_export<W: Write>(writer: &mut W, rendered: &str) -> Result<()> {
    writer
        .write_all(rendered.as_bytes())
        .context("write export")?;
    if !rendered.ends_with('\n') {
        writer.write_all(b"\n").context("write export")?;
    }
    writer.flush().context("flush export")
}
