//! Timeline model: clips, tracks, sequences and the host-facing
//! sequence provider.
//!
//! Clips are addressed through [`ClipRef`] handles rather than shared
//! pointers. A handle records the owning track (kind + index) and the clip's
//! position on it, so the engine can collect clips across tracks, sort them,
//! and mutate them one at a time through `&mut Sequence`.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Stable clip key, unique within a track
pub type ClipId = String;

/// Medium of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind
{
    Video,
    Audio,
}

impl std::fmt::Display for TrackKind
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        match self
        {
            TrackKind::Video => write!(f, "video"),
            TrackKind::Audio => write!(f, "audio"),
        }
    }
}

/// An editable timeline segment. Times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip
{
    pub id: ClipId,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub start: f64,
    pub end: f64,

    #[serde(default)]
    pub selected: bool,

    /// Absolute times of attached effect keyframes; they travel with the clip
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyframes: Vec<f64>,
}

impl Clip
{
    pub fn new(
        id: impl Into<ClipId>,
        start: f64,
        end: f64,
    ) -> Self
    {
        Self {
            id: id.into(),
            name: String::new(),
            start,
            end,
            selected: false,
            keyframes: Vec::new(),
        }
    }

    /// Builder-style selection flag
    pub fn with_selected(
        mut self,
        selected: bool,
    ) -> Self
    {
        self.selected = selected;
        self
    }

    pub fn with_keyframes(
        mut self,
        keyframes: Vec<f64>,
    ) -> Self
    {
        self.keyframes = keyframes;
        self
    }

    pub fn duration(&self) -> f64
    {
        self.end - self.start
    }

    pub fn is_selected(&self) -> bool
    {
        self.selected
    }

    /// Relative move: start, end and keyframes shift by `delta`
    pub fn move_by(
        &mut self,
        delta: f64,
    )
    {
        self.start += delta;
        self.end += delta;

        for k in &mut self.keyframes
        {
            *k += delta;
        }
    }

    /// Absolute end setter, independent of [`Clip::move_by`]
    pub fn set_end(
        &mut self,
        end: f64,
    )
    {
        self.end = end;
    }
}

/// Ordered container of clips; order carries no meaning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track
{
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl Track
{
    pub fn new(clips: Vec<Clip>) -> Self
    {
        Self { name: String::new(), clips }
    }
}

/// Handle to a clip inside a [`Sequence`]. Lookup only, never owns the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipRef
{
    pub kind: TrackKind,
    pub track: usize,
    pub clip: usize,
}

/// Which tracks of one kind a query looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackRef
{
    /// A single track by 0-based index
    Single(usize),
    /// An explicit list of 0-based indices, iterated in the given order
    Many(Vec<usize>),
    /// The whole track collection
    All,
}

/// The active timeline: video and audio track collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence
{
    pub name: String,

    #[serde(default)]
    pub video_tracks: Vec<Track>,

    #[serde(default)]
    pub audio_tracks: Vec<Track>,
}

impl Sequence
{
    pub fn new(name: impl Into<String>) -> Self
    {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn tracks(
        &self,
        kind: TrackKind,
    ) -> &[Track]
    {
        match kind
        {
            TrackKind::Video => &self.video_tracks,
            TrackKind::Audio => &self.audio_tracks,
        }
    }

    pub fn tracks_mut(
        &mut self,
        kind: TrackKind,
    ) -> &mut Vec<Track>
    {
        match kind
        {
            TrackKind::Video => &mut self.video_tracks,
            TrackKind::Audio => &mut self.audio_tracks,
        }
    }

    /// Checked lookup for handles that may be stale
    pub fn get(
        &self,
        r: ClipRef,
    ) -> Option<&Clip>
    {
        self.tracks(r.kind)
            .get(r.track)?
            .clips
            .get(r.clip)
    }

    /// Start time of the clip behind `r`
    pub fn start_of(
        &self,
        r: ClipRef,
    ) -> f64
    {
        self[r].start
    }
}

impl Index<ClipRef> for Sequence
{
    type Output = Clip;

    fn index(
        &self,
        r: ClipRef,
    ) -> &Clip
    {
        &self.tracks(r.kind)[r.track].clips[r.clip]
    }
}

impl IndexMut<ClipRef> for Sequence
{
    fn index_mut(
        &mut self,
        r: ClipRef,
    ) -> &mut Clip
    {
        &mut self.tracks_mut(r.kind)[r.track].clips[r.clip]
    }
}

/// Host collaborator exposing the currently active sequence
pub trait SequenceProvider
{
    /// `None` when no sequence is open
    fn active_sequence(&mut self) -> Option<&mut Sequence>;
}

impl SequenceProvider for Sequence
{
    fn active_sequence(&mut self) -> Option<&mut Sequence>
    {
        Some(self)
    }
}

impl SequenceProvider for Option<Sequence>
{
    fn active_sequence(&mut self) -> Option<&mut Sequence>
    {
        self.as_mut()
    }
}

/// Serialized project: every sequence plus which one is active
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineDocument
{
    #[serde(default)]
    pub sequences: Vec<Sequence>,

    #[serde(default)]
    pub active: Option<usize>,
}

impl SequenceProvider for TimelineDocument
{
    fn active_sequence(&mut self) -> Option<&mut Sequence>
    {
        let idx = self.active?;
        self.sequences
            .get_mut(idx)
    }
}
