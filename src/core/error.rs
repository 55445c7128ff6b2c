//! Error taxonomy for timeline edit operations.
//!
//! Every operation reports failure through [`EditError`]; the operation
//! boundary turns it into a single user-facing notice and the CLI maps it to
//! an exit code.

use crate::core::timeline::TrackKind;

/// Domain errors raised while validating or applying a clip edit
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditError
{
    /// The host has no sequence open
    #[error("No active sequence")]
    NoActiveSequence,

    /// Fewer tracks than the operation works on
    #[error("Sequence \"{sequence}\" has {found} {kind} tracks, {required} are required")]
    InsufficientTracks
    {
        sequence: String,
        kind: TrackKind,
        found: usize,
        required: usize,
    },

    /// A 1-based track number that does not exist in the sequence
    #[error("Invalid track number {number}: the sequence has {available} {kind} tracks")]
    TrackOutOfRange
    {
        kind: TrackKind,
        number: usize,
        available: usize,
    },

    /// Two track arguments that must differ point at the same track
    #[error("Track {number} was given twice, two different {kind} tracks are required")]
    SameTrack
    {
        kind: TrackKind,
        number: usize,
    },

    /// Nothing selected where the operation needs a selection
    #[error("No selected clips")]
    NoSelection,

    /// Selected clip counts do not satisfy the operation's relationship
    #[error("{what}: expected {expected}, selected {actual}")]
    SelectionCountMismatch
    {
        what: String,
        expected: String,
        actual: usize,
    },

    /// The marker column is missing from the CSV header
    #[error("Column \"{column}\" not found in the CSV header")]
    ColumnNotFound
    {
        column: String,
    },

    /// The CSV holds a header at most
    #[error("CSV contains only a header or is empty")]
    EmptyOrHeaderOnlyCsv,

    /// The CSV could not be opened or the chooser was cancelled
    #[error("Failed to open CSV file: {reason}")]
    FileOpen
    {
        reason: String,
    },

    /// Fewer numeric markers than the operation needs
    #[error("Not enough numeric markers (found {found}, need at least {required})")]
    NotEnoughMarkers
    {
        found: usize,
        required: usize,
    },

    /// A marker row points past the clips available for it
    #[error("Marker row {marker} refers to clip #{marker}, but only {available} clips are selected")]
    MarkerIndexOutOfRange
    {
        marker: usize,
        available: usize,
    },
}

impl EditError
{
    /// Convenience constructor for count mismatches
    pub fn count_mismatch(
        what: impl Into<String>,
        expected: impl ToString,
        actual: usize,
    ) -> Self
    {
        Self::SelectionCountMismatch {
            what: what.into(),
            expected: expected.to_string(),
            actual,
        }
    }
}

/// Process exit codes for failed operations
/// 2=selection, 3=invalid CSV input, 4=timeline state
pub fn exit_code_for(e: &EditError) -> i32
{
    match e
    {
        EditError::NoSelection
        | EditError::SelectionCountMismatch { .. }
        | EditError::MarkerIndexOutOfRange { .. } => 2,
        EditError::ColumnNotFound { .. }
        | EditError::EmptyOrHeaderOnlyCsv
        | EditError::FileOpen { .. }
        | EditError::NotEnoughMarkers { .. } => 3,
        EditError::NoActiveSequence
        | EditError::InsufficientTracks { .. }
        | EditError::TrackOutOfRange { .. }
        | EditError::SameTrack { .. } => 4,
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn mismatch_message_names_both_counts()
    {
        let e = EditError::count_mismatch("Video clips", 3, 2);
        assert_eq!(e.to_string(), "Video clips: expected 3, selected 2");
    }

    #[test]
    fn exit_codes_group_by_stage()
    {
        assert_eq!(exit_code_for(&EditError::NoActiveSequence), 4);
        assert_eq!(exit_code_for(&EditError::EmptyOrHeaderOnlyCsv), 3);
        assert_eq!(exit_code_for(&EditError::MarkerIndexOutOfRange { marker: 9, available: 4 }), 2);
    }
}
