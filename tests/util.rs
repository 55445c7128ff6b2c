//! Shared test utilities for integration tests
//!
//! Builds timeline documents and on-disk fixtures used across the
//! integration test files.

#![allow(dead_code)]

use assert_fs::prelude::*;
use clipshift::core::{Clip, Sequence, TimelineDocument, Track};

/// Selected clip spanning `start..end`
pub fn sel(
    id: &str,
    start: f64,
    end: f64,
) -> Clip
{
    Clip::new(id, start, end).with_selected(true)
}

/// Unselected clip spanning `start..end`
pub fn idle(
    id: &str,
    start: f64,
    end: f64,
) -> Clip
{
    Clip::new(id, start, end)
}

/// Sequence named "main" with the given video and audio tracks
pub fn sequence(
    video: Vec<Vec<Clip>>,
    audio: Vec<Vec<Clip>>,
) -> Sequence
{
    let mut seq = Sequence::new("main");
    seq.video_tracks = video
        .into_iter()
        .map(Track::new)
        .collect();
    seq.audio_tracks = audio
        .into_iter()
        .map(Track::new)
        .collect();
    seq
}

/// Document whose only sequence is active
pub fn document(seq: Sequence) -> TimelineDocument
{
    TimelineDocument { sequences: vec![seq], active: Some(0) }
}

/// Temp dir holding `timeline.json` and, when given, `markers.csv`
pub fn make_fixture(
    doc: &TimelineDocument,
    csv: Option<&str>,
) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("timeline.json")
        .write_str(&serde_json::to_string_pretty(doc).expect("serialize"))
        .expect("write timeline");

    if let Some(text) = csv
    {
        tmp.child("markers.csv")
            .write_str(text)
            .expect("write csv");
    }

    tmp
}

/// Read back `timeline.json` (or another file) from a fixture
pub fn read_doc(
    tmp: &assert_fs::TempDir,
    name: &str,
) -> TimelineDocument
{
    let text = std::fs::read_to_string(tmp.path().join(name)).expect("read timeline");
    serde_json::from_str(&text).expect("parse timeline")
}

/// Start and end of every clip on one track, in track order
pub fn spans(track: &Track) -> Vec<(f64, f64)>
{
    track
        .clips
        .iter()
        .map(|c| (c.start, c.end))
        .collect()
}
