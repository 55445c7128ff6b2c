//! Zig-zag scheduling and gap removal.
//!
//! Both place clips end-to-end from an anchor taken from the first clip,
//! which itself never moves.

use crate::core::reposition::set_start_end;
use crate::core::timeline::{ClipRef, Sequence};

/// Place `clip` at `at`, keeping its duration; returns its new end
fn place(
    seq: &mut Sequence,
    clip: ClipRef,
    at: f64,
) -> f64
{
    let c = &mut seq[clip];
    let dur = c.duration();
    set_start_end(c, at, at + dur);
    c.end
}

/// Alternate `b` and `a` clips end-to-end after `a[0]`.
///
/// `a[0]` stays put. `b[i]` starts `gap_after_a` after the preceding `a`
/// clip ends, and `a[i + 1]` starts `gap_after_b` after `b[i]` ends. Walks
/// `min(a.len(), b.len())` steps and returns the number of clips placed.
pub fn zig_zag(
    seq: &mut Sequence,
    a: &[ClipRef],
    b: &[ClipRef],
    gap_after_a: f64,
    gap_after_b: f64,
) -> usize
{
    let Some(&first) = a.first()
    else
    {
        return 0;
    };

    let mut anchor = seq[first].end + gap_after_a;
    let mut placed = 0;

    for i in 0..a
        .len()
        .min(b.len())
    {
        anchor = place(seq, b[i], anchor) + gap_after_b;
        placed += 1;

        let Some(&next_a) = a.get(i + 1)
        else
        {
            break;
        };

        anchor = place(seq, next_a, anchor) + gap_after_a;
        placed += 1;
    }

    placed
}

/// Pack `clips` (sorted by start) end-to-end with `gap` between them.
///
/// The first clip stays put; returns the number of clips moved.
pub fn glue(
    seq: &mut Sequence,
    clips: &[ClipRef],
    gap: f64,
) -> usize
{
    let Some((&first, rest)) = clips.split_first()
    else
    {
        return 0;
    };

    let mut cursor = seq[first].end;
    for &clip in rest
    {
        cursor = place(seq, clip, cursor + gap);
    }

    rest.len()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::timeline::{Clip, Track, TrackKind};

    fn two_tracks(
        a: &[(f64, f64)],
        b: &[(f64, f64)],
    ) -> (Sequence, Vec<ClipRef>, Vec<ClipRef>)
    {
        let mut s = Sequence::new("zz");
        for (n, spans) in [a, b]
            .iter()
            .enumerate()
        {
            let clips = spans
                .iter()
                .enumerate()
                .map(|(i, &(st, en))| Clip::new(format!("{n}-{i}"), st, en))
                .collect();
            s.audio_tracks
                .push(Track::new(clips));
        }

        let refs = |t: usize, n: usize| {
            (0..n)
                .map(|clip| ClipRef { kind: TrackKind::Audio, track: t, clip })
                .collect::<Vec<_>>()
        };

        (s, refs(0, a.len()), refs(1, b.len()))
    }

    #[test]
    fn equal_lengths_alternate_with_gaps()
    {
        let (mut s, a, b) = two_tracks(&[(0.0, 2.0), (10.0, 11.0)], &[(20.0, 21.5), (30.0, 30.5)]);
        let placed = zig_zag(&mut s, &a, &b, 0.5, 0.25);

        assert_eq!(placed, 3);
        assert_eq!((s[a[0]].start, s[a[0]].end), (0.0, 2.0));
        assert_eq!((s[b[0]].start, s[b[0]].end), (2.5, 4.0));
        assert_eq!((s[a[1]].start, s[a[1]].end), (4.25, 5.25));
        assert_eq!((s[b[1]].start, s[b[1]].end), (5.75, 6.25));
    }

    #[test]
    fn a_longer_by_one_places_trailing_a()
    {
        let (mut s, a, b) = two_tracks(&[(0.0, 1.0), (5.0, 6.0)], &[(9.0, 10.0)]);
        zig_zag(&mut s, &a, &b, 0.5, 0.5);

        assert_eq!(s[b[0]].start, 1.5);
        assert_eq!(s[a[1]].start, 3.0);
        assert_eq!(s[a[1]].end, 4.0);
    }

    #[test]
    fn b_longer_by_one_leaves_last_b()
    {
        let (mut s, a, b) = two_tracks(&[(0.0, 1.0)], &[(3.0, 4.0), (7.0, 8.0)]);
        let placed = zig_zag(&mut s, &a, &b, 0.0, 0.0);

        assert_eq!(placed, 1);
        assert_eq!(s[b[0]].start, 1.0);
        assert_eq!(s[b[1]].start, 7.0);
    }

    #[test]
    fn empty_a_is_noop()
    {
        let (mut s, a, b) = two_tracks(&[], &[(3.0, 4.0)]);
        assert_eq!(zig_zag(&mut s, &a, &b, 0.5, 0.2), 0);
        assert_eq!(s[b[0]].start, 3.0);
    }

    #[test]
    fn glue_packs_after_first()
    {
        let (mut s, a, _) = two_tracks(&[(1.0, 2.0), (5.0, 5.5), (9.0, 10.0)], &[]);
        assert_eq!(glue(&mut s, &a, 0.25), 2);

        assert_eq!((s[a[0]].start, s[a[0]].end), (1.0, 2.0));
        assert_eq!((s[a[1]].start, s[a[1]].end), (2.25, 2.75));
        assert_eq!((s[a[2]].start, s[a[2]].end), (3.0, 4.0));
    }
}
