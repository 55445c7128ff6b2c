//! Alignment engine: boundary alignment between two clip sequences and
//! marker-driven alignment against a CSV marker set.
//!
//! All inputs are handle slices already sorted by start time. Count checks
//! happen before the first mutation; a marker that runs out of range inside
//! the loop fails there and leaves earlier clips moved.

use tracing::debug;

use crate::core::error::EditError;
use crate::core::markers::MarkerSet;
use crate::core::reposition::{set_start_end, shift_to};
use crate::core::timeline::{ClipRef, Sequence};

/// Give `moving` the reference sequence's partitioning.
///
/// `moving[i]` starts where `reference[i]` starts and ends where
/// `reference[i + 1]` starts; the last moving clip ends with its reference
/// clip. Requires `moving.len() <= reference.len()`.
pub fn align_clips(
    seq: &mut Sequence,
    moving: &[ClipRef],
    reference: &[ClipRef],
) -> Result<usize, EditError>
{
    if moving.len() > reference.len()
    {
        return Err(EditError::count_mismatch(
            "Reference clips",
            format!("at least {}", moving.len()),
            reference.len(),
        ));
    }

    let last = moving
        .len()
        .saturating_sub(1);

    for (i, &m) in moving
        .iter()
        .enumerate()
    {
        let r = &seq[reference[i]];
        let start = r.start;
        let end = if i < last { seq[reference[i + 1]].start } else { r.end };

        set_start_end(&mut seq[m], start, end);
    }

    debug!(aligned = moving.len(), "boundary alignment done");
    Ok(moving.len())
}

/// Shift each `moving[k]` onto `target[marker_rows[k] - 1]` without
/// resizing it.
pub fn align_to_markers(
    seq: &mut Sequence,
    moving: &[ClipRef],
    target: &[ClipRef],
    marker_rows: &[usize],
) -> Result<usize, EditError>
{
    if moving.len() != marker_rows.len()
    {
        return Err(EditError::count_mismatch(
            format!("Clips to move ({} markers)", marker_rows.len()),
            marker_rows.len(),
            moving.len(),
        ));
    }

    let max_row = marker_rows
        .iter()
        .copied()
        .max()
        .unwrap_or(0);
    if max_row > target.len()
    {
        return Err(EditError::MarkerIndexOutOfRange { marker: max_row, available: target.len() });
    }

    for (&m, &row) in moving
        .iter()
        .zip(marker_rows)
    {
        // Rows are 1-based; a zero row has no target
        let Some(&t) = row
            .checked_sub(1)
            .and_then(|i| target.get(i))
        else
        {
            continue;
        };

        let start = seq[t].start;
        shift_to(&mut seq[m], start);
    }

    Ok(moving.len())
}

/// Resize each video clip to span the audio between consecutive markers.
///
/// `audio` must hold exactly `markers.total_data_rows` clips and `video`
/// exactly one clip fewer than there are markers. The final video clip ends
/// with the audio clip at the next marker if there is one, otherwise with the
/// last audio clip.
pub fn align_images_to_markers(
    seq: &mut Sequence,
    audio: &[ClipRef],
    video: &[ClipRef],
    markers: &MarkerSet,
) -> Result<usize, EditError>
{
    let rows = &markers.marker_rows;
    if rows.len() < 2
    {
        return Err(EditError::NotEnoughMarkers { found: rows.len(), required: 2 });
    }

    if audio.len() != markers.total_data_rows
    {
        return Err(EditError::count_mismatch(
            "Audio clips (one per CSV data row)",
            markers.total_data_rows,
            audio.len(),
        ));
    }

    if video.len() != rows.len() - 1
    {
        return Err(EditError::count_mismatch(
            format!("Video clips ({} markers)", rows.len()),
            rows.len() - 1,
            video.len(),
        ));
    }

    let audio_at = |row: usize| -> Result<ClipRef, EditError> {
        row.checked_sub(1)
            .and_then(|i| audio.get(i))
            .copied()
            .ok_or(EditError::MarkerIndexOutOfRange { marker: row, available: audio.len() })
    };

    let last = video.len() - 1;
    for (v, &clip) in video
        .iter()
        .enumerate()
    {
        let start = seq[audio_at(rows[v])?].start;
        let next = rows[v + 1];

        let end = if v < last
        {
            seq[audio_at(next)?].start
        }
        else
        {
            match audio_at(next)
            {
                Ok(a) => seq[a].end,
                Err(_) => audio
                    .last()
                    .map_or(start, |&a| seq[a].end),
            }
        };

        set_start_end(&mut seq[clip], start, end);
    }

    debug!(aligned = video.len(), "image alignment done");
    Ok(video.len())
}
