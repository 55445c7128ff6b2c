//! CLI command handlers for the edit operations.
//!
//! The binary stands in for the host: it loads the timeline document, runs
//! one operation against the active sequence, prints the notices, and writes
//! the document back when anything moved or an output path was given.

use std::path::Path;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::cli::{AlignAudioArgs, AlignImagesArgs, AppContext, GlueArgs, ZigZagArgs};
use crate::core::error::{EditError, exit_code_for};
use crate::core::host::{MemoryNotifier, Notice, Notifier};
use crate::core::ops::{
    self, AudioCsvRequest, GapInput, GlueRequest, ImagesCsvRequest, Report, ZigZagRequest,
};
use crate::core::timeline::TimelineDocument;
use crate::infra::config::load_config;
use crate::infra::io::{PathCsvSource, load_timeline, save_timeline};
use crate::infra::notify::TerminalNotifier;

/// Single JSON object printed under `--json`
#[derive(Debug, Serialize)]
struct CommandOutput<'a>
{
    ok: bool,
    report: Option<&'a Report>,
    error: Option<String>,
    notices: &'a [Notice],
    written: Option<Utf8PathBuf>,
}

impl<'a> CommandOutput<'a>
{
    fn new(
        outcome: &'a Outcome,
        written: Option<&Path>,
    ) -> Self
    {
        Self {
            ok: outcome
                .result
                .is_ok(),
            report: outcome
                .result
                .as_ref()
                .ok(),
            error: outcome
                .result
                .as_ref()
                .err()
                .map(ToString::to_string),
            notices: &outcome.notices,
            written: written.and_then(|p| Utf8PathBuf::from_path_buf(p.to_path_buf()).ok()),
        }
    }
}

/// An operation failure that has already been shown to the user
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub EditError);

/// One operation applied to the loaded document, not yet written
#[derive(Debug)]
struct Outcome
{
    result: Result<Report, EditError>,
    notices: Vec<Notice>,
    doc: TimelineDocument,
    changed: bool,
}

fn apply<F>(
    ctx: &AppContext,
    op: F,
) -> Result<Outcome>
where
    F: FnOnce(&mut TimelineDocument, &mut MemoryNotifier) -> Result<Report, EditError>,
{
    let mut doc = load_timeline(&ctx.timeline)?;
    let before = doc.clone();

    let mut notices = MemoryNotifier::default();
    let result = ops::run(&mut notices, |n| op(&mut doc, n));

    // Failed batches may still have moved clips; those stay applied
    let changed = doc != before;

    Ok(Outcome { result, notices: notices.notices, doc, changed })
}

/// Changed documents go back to disk; an explicit `--output` always gets a file
fn should_write(
    ctx: &AppContext,
    changed: bool,
) -> bool
{
    !ctx.dry_run && (changed || ctx.output.is_some())
}

/// Load, run, write back, report. Operation failures come back as
/// [`Reported`] inside the `anyhow::Error`.
fn execute<F>(
    ctx: &AppContext,
    op: F,
) -> Result<()>
where
    F: FnOnce(&mut TimelineDocument, &mut MemoryNotifier) -> Result<Report, EditError>,
{
    let outcome = apply(ctx, op)?;

    let written = if should_write(ctx, outcome.changed)
    {
        let out = ctx.output_path();
        if let Err(e) = save_timeline(&outcome.doc, out)
        {
            // The operation's own notices still reach the user
            report(ctx, &outcome, None)?;
            let what = match &outcome.result
            {
                Ok(_) => "operation succeeded but the timeline was not saved".to_string(),
                Err(op_err) => format!("operation failed ({op_err}) and the timeline was not saved"),
            };
            return Err(e.context(what));
        }

        debug!(path = %out.display(), "timeline written");
        Some(out.as_path())
    }
    else
    {
        None
    };

    report(ctx, &outcome, written)?;

    outcome
        .result
        .map(|_| ())
        .map_err(|e| Reported(e).into())
}

fn report(
    ctx: &AppContext,
    outcome: &Outcome,
    written: Option<&Path>,
) -> Result<()>
{
    if ctx.json
    {
        let output = CommandOutput::new(outcome, written);
        println!("{}", serde_json::to_string_pretty(&output).context("serialize command output")?);
        return Ok(());
    }

    let mut term = TerminalNotifier::new(ctx.quiet, !ctx.no_color);
    for notice in &outcome.notices
    {
        term.notify(notice.clone());
    }

    if !ctx.quiet
    {
        match written
        {
            Some(path) => println!("Timeline written to {}", path.display()),
            None if ctx.dry_run && outcome.changed => println!("Dry run: timeline not written"),
            None => {}
        }
    }

    Ok(())
}

#[instrument(skip_all)]
pub fn glue_run(
    args: GlueArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    let req = GlueRequest { gap: GapInput::new(args.gap, config.glue.gap) };

    execute(ctx, |doc, n| ops::glue_selected_audio(doc, n, &req))
}

#[instrument(skip_all)]
pub fn zigzag_run(
    args: ZigZagArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?.zigzag;
    let req = ZigZagRequest {
        gap_after_a: GapInput::new(args.gap_a, config.gap_after_a),
        gap_after_b: GapInput::new(args.gap_b, config.gap_after_b),
        track_a: args
            .track_a
            .unwrap_or(config.track_a),
        track_b: args
            .track_b
            .unwrap_or(config.track_b),
    };

    execute(ctx, |doc, n| ops::zig_zag_audio(doc, n, &req))
}

#[instrument(skip_all)]
pub fn align_video_run(ctx: &AppContext) -> Result<()>
{
    execute(ctx, |doc, _| ops::align_video_to_audio(doc))
}

#[instrument(skip_all)]
pub fn align_audio_run(
    args: AlignAudioArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    let req = AudioCsvRequest {
        track: args.track,
        column: args
            .column
            .unwrap_or(config.csv.audio_column),
    };
    let mut source = PathCsvSource::new(args.csv);

    execute(ctx, |doc, _| ops::align_audio_to_csv(doc, &mut source, &req))
}

#[instrument(skip_all)]
pub fn align_images_run(
    args: AlignImagesArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    let req = ImagesCsvRequest {
        column: args
            .column
            .unwrap_or(config.csv.images_column),
    };
    let mut source = PathCsvSource::new(args.csv);

    execute(ctx, |doc, _| ops::align_images_to_csv(doc, &mut source, &req))
}

/// Exit code for a command result: edit errors map through
/// [`exit_code_for`], anything else is 1
pub fn exit_code(result: &Result<()>) -> i32
{
    let Err(e) = result
    else
    {
        return 0;
    };

    if let Some(Reported(edit)) = e.downcast_ref::<Reported>()
    {
        return exit_code_for(edit);
    }

    e.downcast_ref::<EditError>()
        .map_or(1, exit_code_for)
}

/// Convert Result<()> to exit codes for the CLI harness.
/// Reported failures were already shown as notices; anything else is printed here.
pub fn finish_with_exit(result: Result<()>) -> !
{
    if let Err(e) = &result
        && e.downcast_ref::<Reported>()
            .is_none()
    {
        eprintln!("Error: {e:#}");
    }

    std::process::exit(exit_code(&result));
}
