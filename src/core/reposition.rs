//! Interval repositioning: the one mutation primitive the engine uses.

use tracing::trace;

use crate::core::timeline::Clip;

/// Move `clip` so it starts at `start`, then set its end to `end`.
///
/// The move is relative so attached keyframes travel with the clip; the end
/// is then written absolutely. If `start`/`end` disagree with the clip's
/// duration the duration changes. `end > start` is the caller's job.
pub fn set_start_end(
    clip: &mut Clip,
    start: f64,
    end: f64,
)
{
    let shift = start - clip.start;
    trace!(clip = %clip.id, shift, end, "reposition");

    clip.move_by(shift);
    clip.set_end(end);
}

/// Shift without resizing
pub fn shift_to(
    clip: &mut Clip,
    start: f64,
)
{
    let shift = start - clip.start;
    trace!(clip = %clip.id, shift, "shift");

    clip.move_by(shift);
}
