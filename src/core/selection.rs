//! Selection queries over a sequence's tracks.

use crate::core::timeline::{ClipId, ClipRef, Sequence, Track, TrackKind, TrackRef};

/// Outcome of looking up one id on a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdLookup<'a>
{
    /// Index of the first clip carrying the id
    Found(usize),
    Missing(&'a str),
}

/// Selected clips on the referenced tracks of one kind, in iteration order.
///
/// Not sorted; callers that care about time order use [`sort_by_start`].
/// Track indices past the end of the collection are skipped.
pub fn selected_clips(
    seq: &Sequence,
    kind: TrackKind,
    tracks: &TrackRef,
) -> Vec<ClipRef>
{
    let indices: Vec<usize> = match tracks
    {
        TrackRef::Single(t) => vec![*t],
        TrackRef::Many(ts) => ts.clone(),
        TrackRef::All => (0..seq
            .tracks(kind)
            .len())
            .collect(),
    };

    let mut out = Vec::new();
    for t in indices
    {
        let Some(track) = seq
            .tracks(kind)
            .get(t)
        else
        {
            continue;
        };

        out.extend(
            track
                .clips
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_selected())
                .map(|(i, _)| ClipRef { kind, track: t, clip: i }),
        );
    }

    out
}

/// Selected clips across a whole track collection
pub fn selected_in_collection(
    seq: &Sequence,
    kind: TrackKind,
) -> Vec<ClipRef>
{
    selected_clips(seq, kind, &TrackRef::All)
}

/// Stable sort of handles by clip start time
pub fn sort_by_start(
    seq: &Sequence,
    clips: &mut [ClipRef],
)
{
    clips.sort_by(|a, b| {
        seq.start_of(*a)
            .total_cmp(&seq.start_of(*b))
    });
}

/// Ids of every clip on a track, in track order
pub fn clip_ids(track: &Track) -> Vec<ClipId>
{
    track
        .clips
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

/// Per-id lookup that keeps misses visible
pub fn lookup_ids<'a, S: AsRef<str>>(
    track: &Track,
    ids: &'a [S],
) -> Vec<IdLookup<'a>>
{
    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            track
                .clips
                .iter()
                .position(|c| c.id == id)
                .map_or(IdLookup::Missing(id), IdLookup::Found)
        })
        .collect()
}

/// Clip indices for `ids` in the given order; ids with no clip are dropped,
/// so the result may be shorter than `ids`.
pub fn clips_by_ids<S: AsRef<str>>(
    track: &Track,
    ids: &[S],
) -> Vec<usize>
{
    lookup_ids(track, ids)
        .into_iter()
        .filter_map(|l| match l
        {
            IdLookup::Found(i) => Some(i),
            IdLookup::Missing(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::timeline::Clip;

    fn seq() -> Sequence
    {
        let mut s = Sequence::new("s");
        s.audio_tracks
            .push(Track::new(vec![
                Clip::new("a1", 4.0, 5.0).with_selected(true),
                Clip::new("a2", 0.0, 1.0),
                Clip::new("a3", 2.0, 3.0).with_selected(true),
            ]));
        s.audio_tracks
            .push(Track::new(vec![Clip::new("b1", 1.0, 2.0).with_selected(true)]));
        s
    }

    fn ids(s: &Sequence, refs: &[ClipRef]) -> Vec<String>
    {
        refs.iter()
            .map(|r| s[*r].id.clone())
            .collect()
    }

    #[test]
    fn selection_follows_iteration_order()
    {
        let s = seq();
        let all = selected_in_collection(&s, TrackKind::Audio);
        assert_eq!(ids(&s, &all), vec!["a1", "a3", "b1"]);

        let second_first = selected_clips(&s, TrackKind::Audio, &TrackRef::Many(vec![1, 0]));
        assert_eq!(ids(&s, &second_first), vec!["b1", "a1", "a3"]);
    }

    #[test]
    fn single_track_and_missing_track()
    {
        let s = seq();
        let one = selected_clips(&s, TrackKind::Audio, &TrackRef::Single(1));
        assert_eq!(ids(&s, &one), vec!["b1"]);

        assert!(selected_clips(&s, TrackKind::Audio, &TrackRef::Single(9)).is_empty());
        assert!(selected_in_collection(&s, TrackKind::Video).is_empty());
    }

    #[test]
    fn sort_is_by_start_and_stable()
    {
        let mut s = seq();
        s.audio_tracks[1]
            .clips
            .push(Clip::new("b2", 2.0, 2.5).with_selected(true));

        let mut all = selected_in_collection(&s, TrackKind::Audio);
        sort_by_start(&s, &mut all);
        assert_eq!(ids(&s, &all), vec!["b1", "a3", "b2", "a1"]);
    }

    #[test]
    fn id_lookup_drops_misses()
    {
        let s = seq();
        let track = &s.audio_tracks[0];

        assert_eq!(clip_ids(track), vec!["a1", "a2", "a3"]);
        assert_eq!(clips_by_ids(track, &["a3", "zz", "a1"]), vec![2, 0]);
        assert_eq!(
            lookup_ids(track, &["a3", "zz"]),
            vec![IdLookup::Found(2), IdLookup::Missing("zz")]
        );
    }
}
