//! **clipshift** - Batch repositioning of selected timeline clips
//!
//! Gap removal, two-track zig-zag interleaving, boundary alignment and
//! CSV-marker driven alignment over a video-editing sequence.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core editing model - timeline types, selection, and the positioning algorithms
pub mod core {
    /// Error taxonomy shared by every operation
    pub mod error;
    pub use error::{EditError, exit_code_for};

    /// Sequence, tracks, clips and the handles that address them
    pub mod timeline;
    pub use timeline::{
        Clip, ClipId, ClipRef, Sequence, SequenceProvider, TimelineDocument, Track, TrackKind,
        TrackRef,
    };

    /// CSV marker-row extraction
    pub mod markers;
    pub use markers::{MarkerSet, extract_markers, parse_csv_line};

    /// Selected-clip gathering, ordering and id lookups
    pub mod selection;

    /// Low-level start/end moves that carry keyframes along
    pub mod reposition;

    /// Gap removal and two-track interleaving
    pub mod zigzag;

    /// Boundary and marker-driven alignment
    pub mod align;

    /// Collaborator seams: notices and CSV sources
    pub mod host;
    pub use host::{CsvSource, MemoryNotifier, Notice, Notifier};

    /// User-facing operations: validation, defaults and reporting
    pub mod ops;
    pub use ops::{Operation, Report};
}

/// Infrastructure - Configuration, document I/O, and terminal output
pub mod infra {
    /// Configuration management with TOML and environment overrides
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Timeline document and CSV file access
    pub mod io;
    pub use io::{PathCsvSource, load_timeline, save_timeline};

    /// Terminal notifier
    pub mod notify;
    pub use notify::TerminalNotifier;

    /// Number parsing and formatting helpers
    pub mod utils;
}

/// Command handlers behind the CLI subcommands
pub mod cli_ext {
    pub mod edit_cmd;
    pub mod inspect_cmd;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{EditError, Sequence, SequenceProvider, TimelineDocument};
pub use infra::{Config, load_config};
