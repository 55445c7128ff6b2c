//! User-facing edit operations.
//!
//! Each operation is one synchronous transaction against the active
//! sequence: validate, compute, mutate, report. Failures come back as
//! [`EditError`]; [`run`] turns the outcome into exactly one notice. There is
//! no rollback, so an error found mid-batch leaves earlier clips moved.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::align::{align_clips, align_images_to_markers, align_to_markers};
use crate::core::error::EditError;
use crate::core::host::{CsvSource, Notice, Notifier};
use crate::core::markers::extract_markers;
use crate::core::selection::{selected_clips, selected_in_collection, sort_by_start};
use crate::core::timeline::{ClipRef, Sequence, SequenceProvider, TrackKind, TrackRef};
use crate::core::zigzag::{glue, zig_zag};
use crate::infra::utils::NumberUtils;

/// Which entry point produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation
{
    Glue,
    ZigZag,
    AlignVideo,
    AlignAudioCsv,
    AlignImagesCsv,
}

/// Successful outcome of an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report
{
    pub operation: Operation,
    pub sequence: String,
    /// Clips whose position was written
    pub moved: usize,
    pub message: String,
}

/// A gap value as typed by the user, with its fallback
#[derive(Debug, Clone, PartialEq)]
pub struct GapInput
{
    pub raw: Option<String>,
    pub default: f64,
}

impl GapInput
{
    pub fn new(
        raw: Option<String>,
        default: f64,
    ) -> Self
    {
        Self { raw, default }
    }

    /// Parsed value, or the default. Unparseable text warns and proceeds.
    pub fn resolve(
        &self,
        notifier: &mut impl Notifier,
    ) -> f64
    {
        let Some(raw) = &self.raw
        else
        {
            return self.default;
        };

        match NumberUtils::parse_float_lenient(raw)
        {
            Some(v) => v,
            None =>
            {
                warn!(input = %raw, default = self.default, "gap is not a number");
                notifier.notify(Notice::Warning(format!(
                    "\"{raw}\" is not a number, using the default of {} s",
                    NumberUtils::fmt_seconds(self.default)
                )));
                self.default
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlueRequest
{
    pub gap: GapInput,
}

impl Default for GlueRequest
{
    fn default() -> Self
    {
        Self { gap: GapInput::new(None, 0.0) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZigZagRequest
{
    /// Pause after each clip of track A
    pub gap_after_a: GapInput,
    /// Pause after each clip of track B
    pub gap_after_b: GapInput,
    /// 1-based audio track numbers
    pub track_a: usize,
    pub track_b: usize,
}

impl Default for ZigZagRequest
{
    fn default() -> Self
    {
        Self {
            gap_after_a: GapInput::new(None, 0.5),
            gap_after_b: GapInput::new(None, 0.2),
            track_a: 1,
            track_b: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioCsvRequest
{
    /// 1-based audio track holding the clips to move
    pub track: usize,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagesCsvRequest
{
    pub column: String,
}

impl Default for ImagesCsvRequest
{
    fn default() -> Self
    {
        Self { column: "images".to_string() }
    }
}

/// Run an operation and report its outcome through `notifier`
pub fn run<N: Notifier>(
    notifier: &mut N,
    op: impl FnOnce(&mut N) -> Result<Report, EditError>,
) -> Result<Report, EditError>
{
    let result = op(notifier);

    match &result
    {
        Ok(report) =>
        {
            info!(operation = ?report.operation, moved = report.moved, "operation done");
            notifier.notify(Notice::Info(report.message.clone()));
        }
        Err(e) =>
        {
            warn!(error = %e, "operation failed");
            notifier.notify(Notice::Error(e.to_string()));
        }
    }

    result
}

fn active(provider: &mut impl SequenceProvider) -> Result<&mut Sequence, EditError>
{
    provider
        .active_sequence()
        .ok_or(EditError::NoActiveSequence)
}

/// 1-based track number to index, validated against the sequence
fn track_index(
    seq: &Sequence,
    kind: TrackKind,
    number: usize,
) -> Result<usize, EditError>
{
    let available = seq
        .tracks(kind)
        .len();
    if number == 0 || number > available
    {
        return Err(EditError::TrackOutOfRange { kind, number, available });
    }

    Ok(number - 1)
}

/// Text of the chosen CSV; a cancelled chooser counts as a failed open
pub fn read_csv(source: &mut impl CsvSource) -> Result<String, EditError>
{
    match source.open_csv()
    {
        Ok(Some(text)) => Ok(text),
        Ok(None) => Err(EditError::FileOpen { reason: "no file selected".to_string() }),
        Err(e) => Err(EditError::FileOpen { reason: e.to_string() }),
    }
}

fn sorted(
    seq: &Sequence,
    mut clips: Vec<ClipRef>,
) -> Vec<ClipRef>
{
    sort_by_start(seq, &mut clips);
    clips
}

/// Remove the gaps between selected audio clips, leaving `gap` seconds
/// between neighbours. The earliest clip stays where it is.
#[instrument(skip_all)]
pub fn glue_selected_audio(
    provider: &mut impl SequenceProvider,
    notifier: &mut impl Notifier,
    req: &GlueRequest,
) -> Result<Report, EditError>
{
    let seq = active(provider)?;
    let gap = req
        .gap
        .resolve(notifier);

    let clips = sorted(seq, selected_in_collection(seq, TrackKind::Audio));
    if clips.len() < 2
    {
        return Err(EditError::count_mismatch("Audio clips", "at least 2", clips.len()));
    }

    let moved = glue(seq, &clips, gap);

    Ok(Report {
        operation: Operation::Glue,
        sequence: seq
            .name
            .clone(),
        moved,
        message: format!("Clips packed with a gap of {} s", NumberUtils::fmt_seconds(gap)),
    })
}

/// Interleave selected clips of two audio tracks end-to-end.
#[instrument(skip_all, fields(track_a = req.track_a, track_b = req.track_b))]
pub fn zig_zag_audio(
    provider: &mut impl SequenceProvider,
    notifier: &mut impl Notifier,
    req: &ZigZagRequest,
) -> Result<Report, EditError>
{
    let gap_a = req
        .gap_after_a
        .resolve(notifier);
    let gap_b = req
        .gap_after_b
        .resolve(notifier);

    let seq = active(provider)?;
    let found = seq
        .audio_tracks
        .len();
    if found < 2
    {
        return Err(EditError::InsufficientTracks {
            sequence: seq
                .name
                .clone(),
            kind: TrackKind::Audio,
            found,
            required: 2,
        });
    }

    let ta = track_index(seq, TrackKind::Audio, req.track_a)?;
    let tb = track_index(seq, TrackKind::Audio, req.track_b)?;
    if ta == tb
    {
        return Err(EditError::SameTrack { kind: TrackKind::Audio, number: req.track_a });
    }

    let a = sorted(seq, selected_clips(seq, TrackKind::Audio, &TrackRef::Single(ta)));
    let b = sorted(seq, selected_clips(seq, TrackKind::Audio, &TrackRef::Single(tb)));

    // Track A's first clip anchors the whole schedule
    if a.is_empty()
    {
        return Err(EditError::NoSelection);
    }

    if a.len().abs_diff(b.len()) > 1
    {
        return Err(EditError::count_mismatch(
            format!(
                "Clips on track {} ({} selected on track {})",
                req.track_b,
                a.len(),
                req.track_a
            ),
            format!("{} to {}", a.len().saturating_sub(1), a.len() + 1),
            b.len(),
        ));
    }

    let moved = zig_zag(seq, &a, &b, gap_a, gap_b);

    Ok(Report {
        operation: Operation::ZigZag,
        sequence: seq
            .name
            .clone(),
        moved,
        message: format!("Zig-zag applied in sequence \"{}\"", seq.name),
    })
}

/// Align selected video clips to the boundaries of selected audio clips.
#[instrument(skip_all)]
pub fn align_video_to_audio(provider: &mut impl SequenceProvider) -> Result<Report, EditError>
{
    let seq = active(provider)?;

    let video = selected_in_collection(seq, TrackKind::Video);
    let audio = selected_in_collection(seq, TrackKind::Audio);
    if video.is_empty() || audio.is_empty()
    {
        return Err(EditError::NoSelection);
    }

    if audio.len() < video.len()
    {
        return Err(EditError::count_mismatch(
            "Audio clips",
            format!("at least {} (one per video clip)", video.len()),
            audio.len(),
        ));
    }

    let video = sorted(seq, video);
    let audio = sorted(seq, audio);
    let moved = align_clips(seq, &video, &audio)?;

    Ok(Report {
        operation: Operation::AlignVideo,
        sequence: seq
            .name
            .clone(),
        moved,
        message: "Video clips aligned to audio clips".to_string(),
    })
}

/// Move the selected clips of one audio track onto the other selected
/// audio clips picked by the CSV's marker rows.
#[instrument(skip_all, fields(track = req.track, column = %req.column))]
pub fn align_audio_to_csv(
    provider: &mut impl SequenceProvider,
    source: &mut impl CsvSource,
    req: &AudioCsvRequest,
) -> Result<Report, EditError>
{
    let seq = active(provider)?;
    let text = read_csv(source)?;
    let markers = extract_markers(&text, &req.column)?;

    let t = track_index(seq, TrackKind::Audio, req.track)?;

    let moving = sorted(seq, selected_clips(seq, TrackKind::Audio, &TrackRef::Single(t)));
    let target = sorted(
        seq,
        selected_in_collection(seq, TrackKind::Audio)
            .into_iter()
            .filter(|r| r.track != t)
            .collect(),
    );

    let moved = align_to_markers(seq, &moving, &target, &markers.marker_rows)?;

    Ok(Report {
        operation: Operation::AlignAudioCsv,
        sequence: seq
            .name
            .clone(),
        moved,
        message: format!("Moved {moved} clips"),
    })
}

/// Stretch selected video clips (stills) over the audio between
/// consecutive CSV markers.
#[instrument(skip_all, fields(column = %req.column))]
pub fn align_images_to_csv(
    provider: &mut impl SequenceProvider,
    source: &mut impl CsvSource,
    req: &ImagesCsvRequest,
) -> Result<Report, EditError>
{
    let seq = active(provider)?;
    let text = read_csv(source)?;
    let markers = extract_markers(&text, &req.column)?;

    let audio = sorted(seq, selected_in_collection(seq, TrackKind::Audio));
    let video = sorted(seq, selected_in_collection(seq, TrackKind::Video));

    let moved = align_images_to_markers(seq, &audio, &video, &markers)?;

    Ok(Report {
        operation: Operation::AlignImagesCsv,
        sequence: seq
            .name
            .clone(),
        moved,
        message: "Video clips aligned to CSV markers".to_string(),
    })
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::host::MemoryNotifier;
    use crate::core::timeline::{Clip, Track};

    fn audio_seq(tracks: Vec<Vec<Clip>>) -> Sequence
    {
        let mut s = Sequence::new("main");
        s.audio_tracks = tracks
            .into_iter()
            .map(Track::new)
            .collect();
        s
    }

    fn sel(
        id: &str,
        a: f64,
        b: f64,
    ) -> Clip
    {
        Clip::new(id, a, b).with_selected(true)
    }

    #[test]
    fn bad_gap_warns_and_uses_default()
    {
        let mut n = MemoryNotifier::default();
        let gap = GapInput::new(Some("abc".into()), 0.5);

        assert_eq!(gap.resolve(&mut n), 0.5);
        assert_eq!(
            n.notices,
            vec![Notice::Warning("\"abc\" is not a number, using the default of 0.5 s".into())]
        );

        let mut quiet = MemoryNotifier::default();
        assert_eq!(GapInput::new(None, 0.2).resolve(&mut quiet), 0.2);
        assert_eq!(GapInput::new(Some("0.75".into()), 0.2).resolve(&mut quiet), 0.75);
        assert!(quiet.notices.is_empty());
    }

    #[test]
    fn run_emits_one_notice_per_outcome()
    {
        let mut n = MemoryNotifier::default();
        let mut none: Option<Sequence> = None;

        let res = run(&mut n, |n| glue_selected_audio(&mut none, n, &GlueRequest::default()));
        assert_eq!(res, Err(EditError::NoActiveSequence));
        assert_eq!(n.notices, vec![Notice::Error("No active sequence".into())]);
    }

    #[test]
    fn glue_requires_two_clips()
    {
        let mut s = audio_seq(vec![vec![sel("a", 0.0, 1.0)]]);
        let mut n = MemoryNotifier::default();

        let err = glue_selected_audio(&mut s, &mut n, &GlueRequest::default()).unwrap_err();
        assert_eq!(err, EditError::count_mismatch("Audio clips", "at least 2", 1));
    }

    #[test]
    fn glue_spans_tracks()
    {
        let mut s = audio_seq(vec![
            vec![sel("a", 0.0, 1.0), sel("c", 8.0, 9.0)],
            vec![sel("b", 3.0, 3.5)],
        ]);
        let mut n = MemoryNotifier::default();
        let req = GlueRequest { gap: GapInput::new(Some("0.25".into()), 0.0) };

        let report = glue_selected_audio(&mut s, &mut n, &req).unwrap();
        assert_eq!(report.moved, 2);
        assert_eq!(report.message, "Clips packed with a gap of 0.25 s");
        assert_eq!(s.audio_tracks[1].clips[0].start, 1.25);
        assert_eq!(s.audio_tracks[0].clips[1].start, 2.0);
    }

    #[test]
    fn zig_zag_needs_two_tracks()
    {
        let mut s = audio_seq(vec![vec![sel("a", 0.0, 1.0)]]);
        let mut n = MemoryNotifier::default();

        let err = zig_zag_audio(&mut s, &mut n, &ZigZagRequest::default()).unwrap_err();
        assert!(matches!(err, EditError::InsufficientTracks { found: 1, required: 2, .. }));
    }

    #[test]
    fn zig_zag_rejects_uneven_selection()
    {
        let mut s = audio_seq(vec![
            vec![sel("a1", 0.0, 1.0)],
            vec![sel("b1", 2.0, 3.0), sel("b2", 4.0, 5.0), sel("b3", 6.0, 7.0)],
        ]);
        let before = s.clone();
        let mut n = MemoryNotifier::default();

        let err = zig_zag_audio(&mut s, &mut n, &ZigZagRequest::default()).unwrap_err();
        assert!(matches!(err, EditError::SelectionCountMismatch { actual: 3, .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn zig_zag_without_anchor_clip_fails()
    {
        let mut n = MemoryNotifier::default();

        let mut only_b = audio_seq(vec![vec![], vec![sel("b1", 3.0, 4.0)]]);
        let before = only_b.clone();
        let res = run(&mut n, |n| zig_zag_audio(&mut only_b, n, &ZigZagRequest::default()));
        assert_eq!(res, Err(EditError::NoSelection));
        assert_eq!(only_b, before);

        let mut empty = audio_seq(vec![vec![sel("a1", 0.0, 1.0).with_selected(false)], vec![]]);
        assert_eq!(
            zig_zag_audio(&mut empty, &mut n, &ZigZagRequest::default()),
            Err(EditError::NoSelection)
        );

        assert_eq!(n.notices, vec![Notice::Error("No selected clips".into())]);
    }

    #[test]
    fn zig_zag_track_numbers_are_checked()
    {
        let mut s = audio_seq(vec![vec![], vec![]]);
        let mut n = MemoryNotifier::default();
        let req = ZigZagRequest { track_b: 3, ..ZigZagRequest::default() };

        assert_eq!(
            zig_zag_audio(&mut s, &mut n, &req),
            Err(EditError::TrackOutOfRange { kind: TrackKind::Audio, number: 3, available: 2 })
        );

        let same = ZigZagRequest { track_b: 1, ..ZigZagRequest::default() };
        assert!(matches!(zig_zag_audio(&mut s, &mut n, &same), Err(EditError::SameTrack { .. })));
    }

    #[test]
    fn align_video_requires_enough_audio()
    {
        let mut s = audio_seq(vec![vec![sel("a", 0.0, 1.0)]]);
        s.video_tracks
            .push(Track::new(vec![sel("v1", 0.0, 1.0), sel("v2", 1.0, 2.0)]));

        let err = align_video_to_audio(&mut s).unwrap_err();
        assert!(matches!(err, EditError::SelectionCountMismatch { actual: 1, .. }));

        s.video_tracks[0]
            .clips
            .iter_mut()
            .for_each(|c| c.selected = false);
        assert_eq!(align_video_to_audio(&mut s), Err(EditError::NoSelection));
    }

    #[test]
    fn cancelled_csv_is_a_file_error()
    {
        let mut s = audio_seq(vec![vec![]]);
        let mut cancelled: Option<String> = None;
        let req = AudioCsvRequest { track: 1, column: "audio".into() };

        assert_eq!(
            align_audio_to_csv(&mut s, &mut cancelled, &req),
            Err(EditError::FileOpen { reason: "no file selected".into() })
        );
    }

    #[test]
    fn audio_csv_moves_designated_track_onto_targets()
    {
        let mut s = audio_seq(vec![
            vec![sel("t1", 0.0, 1.0), sel("t2", 2.0, 3.0), sel("t3", 5.0, 6.0)],
            vec![sel("fx1", 20.0, 20.5), sel("fx2", 21.0, 21.25)],
        ]);
        let mut csv = Some("name,audio\na,1\nb,\nc,2\n".to_string());
        let req = AudioCsvRequest { track: 2, column: "audio".into() };

        let report = align_audio_to_csv(&mut s, &mut csv, &req).unwrap();
        assert_eq!(report.moved, 2);

        let fx = &s.audio_tracks[1].clips;
        assert_eq!((fx[0].start, fx[0].end), (0.0, 0.5));
        assert_eq!((fx[1].start, fx[1].end), (5.0, 5.25));
    }
}
