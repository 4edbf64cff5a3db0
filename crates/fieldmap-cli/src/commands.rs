use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use fieldmap_ingest::IngestOptions;
use fieldmap_map::MappingSession;
use fieldmap_model::{ExportFormat, MappingSummary};
use fieldmap_output::write_export;

use fieldmap_cli::pipeline::{
    ReplayReport, SeedPolicy, build_session, emit_export, load_gestures, load_table,
    render_export, replay,
};

use crate::cli::{ExportArgs, ExportFormatArg, MappingInputs, PreviewArgs, SuggestArgs};
use crate::summary::{print_fields, print_preview, print_rejected, print_suggestions};

/// Result of `fieldmap export`.
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub replay: ReplayReport,
    pub summary: MappingSummary,
}

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let session = open_session(&args.inputs)?;
    print_fields(&session);
    print_suggestions(&session);
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<ExportOutcome> {
    let format = match args.format {
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Csv => ExportFormat::Csv,
    };
    let span = info_span!("export", %format);
    let _guard = span.enter();

    let mut session = open_session(&args.inputs)?;
    if args.accept_all {
        let accepted = session.accept_all();
        info!(accepted, "accepted all suggestions");
    }

    let replay = match &args.gestures {
        Some(path) => {
            let gestures = load_gestures(path)?;
            replay(&mut session, &gestures)
        }
        None => ReplayReport::default(),
    };
    print_rejected(&replay);
    if args.strict && !replay.rejected.is_empty() {
        bail!("{} gesture(s) rejected", replay.rejected.len());
    }

    match &args.output {
        Some(path) => {
            write_export(path, &session.export_triples(), format)
                .with_context(|| format!("write {}", path.display()))?;
        }
        None => {
            let rendered = render_export(&session, format)?;
            emit_export(&mut io::stdout().lock(), &rendered)
                .context("write export to stdout")?;
        }
    }

    Ok(ExportOutcome {
        format,
        output: args.output.clone(),
        replay,
        summary: session.query().summary(),
    })
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let options = IngestOptions::default().with_max_file_size(args.max_file_size);
    let table = load_table(&args.file, &options)?;
    print_preview(&args.file, &table, args.rows);
    Ok(())
}

fn open_session(inputs: &MappingInputs) -> Result<MappingSession> {
    let options = IngestOptions::default().with_max_file_size(inputs.max_file_size);
    let policy = if inputs.match_names {
        SeedPolicy::Names {
            min_similarity: inputs.min_similarity,
        }
    } else {
        SeedPolicy::Positional
    };
    build_session(&inputs.source, &inputs.target, &options, policy)
}
