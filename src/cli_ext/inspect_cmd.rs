//! Read-only views: the current selection and a CSV's marker rows.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::{AppContext, KindFilter, MarkersArgs, SelectedArgs};
use crate::core::error::EditError;
use crate::core::markers::extract_markers;
use crate::core::ops::read_csv;
use crate::core::selection::{selected_in_collection, sort_by_start};
use crate::core::timeline::{SequenceProvider, TrackKind};
use crate::infra::io::PathCsvSource;
use crate::infra::utils::NumberUtils;

#[derive(Debug, Serialize, Tabled)]
struct SelectedRow
{
    #[tabled(rename = "#")]
    index: usize,
    kind: TrackKind,
    track: usize,
    id: String,
    name: String,
    #[tabled(display = "secs")]
    start: f64,
    #[tabled(display = "secs")]
    end: f64,
    #[tabled(display = "secs")]
    duration: f64,
}

fn secs(v: &f64) -> String
{
    NumberUtils::fmt_seconds(*v)
}

fn kinds(filter: KindFilter) -> &'static [TrackKind]
{
    match filter
    {
        KindFilter::Video => &[TrackKind::Video],
        KindFilter::Audio => &[TrackKind::Audio],
        KindFilter::All => &[TrackKind::Video, TrackKind::Audio],
    }
}

/// Table (or JSON list) of selected clips, each kind sorted by start
pub fn selected_run(
    args: SelectedArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let mut doc = crate::infra::io::load_timeline(&ctx.timeline)?;
    let seq = doc
        .active_sequence()
        .ok_or(EditError::NoActiveSequence)?;

    let mut rows = Vec::new();
    for &kind in kinds(args.kind)
    {
        let mut refs = selected_in_collection(seq, kind);
        sort_by_start(seq, &mut refs);

        for r in refs
        {
            let c = &seq[r];
            rows.push(SelectedRow {
                index: rows.len() + 1,
                kind,
                track: r.track + 1,
                id: c
                    .id
                    .clone(),
                name: c
                    .name
                    .clone(),
                start: c.start,
                end: c.end,
                duration: c.duration(),
            });
        }
    }

    if ctx.json
    {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty()
    {
        if !ctx.quiet
        {
            println!("No selected clips in sequence \"{}\"", seq.name);
        }
        return Ok(());
    }

    if !ctx.quiet
    {
        let title = format!("Sequence \"{}\": {} selected", seq.name, rows.len());
        if ctx.no_color
        {
            println!("{title}");
        }
        else
        {
            println!("{}", title.bold());
        }
    }

    println!("{}", Table::new(rows));
    Ok(())
}

#[derive(Debug, Tabled)]
struct MarkerRow
{
    row: usize,
    value: u64,
}

/// Print the marker rows `--column` yields in `--csv`
pub fn markers_run(
    args: MarkersArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let text = read_csv(&mut PathCsvSource::new(&args.csv))?;
    let set = extract_markers(&text, &args.column)?;

    if ctx.json
    {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "column": args.column,
                "marker_rows": set.marker_rows,
                "marker_values": set.marker_values,
                "total_data_rows": set.total_data_rows,
            }))?
        );
        return Ok(());
    }

    if !ctx.quiet
    {
        println!(
            "Column \"{}\": {} markers, {} data rows",
            args.column,
            set.len(),
            set.total_data_rows
        );
    }

    let rows: Vec<MarkerRow> = set
        .marker_rows
        .iter()
        .zip(&set.marker_values)
        .map(|(&row, &value)| MarkerRow { row, value })
        .collect();
    println!("{}", Table::new(rows));

    Ok(())
}
