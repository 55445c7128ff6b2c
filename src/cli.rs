use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,              // global --quiet
    pub no_color: bool,           // global --no-color
    pub dry_run: bool,            // global --dry-run
    pub json: bool,               // global --json
    pub timeline: PathBuf,        // global --timeline
    pub output: Option<PathBuf>,  // global --output
}

impl AppContext {
    /// Where the edited timeline is written
    pub fn output_path(&self) -> &PathBuf {
        self.output.as_ref().unwrap_or(&self.timeline)
    }
}

#[derive(Parser)]
#[command(name = "cshift")]
#[command(
    about = "Reposition selected timeline clips: gap removal, zig-zag, boundary and CSV-marker alignment"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Timeline document (JSON) holding the sequences and clip selection
    #[arg(long, global = true, default_value = "timeline.json")]
    pub timeline: PathBuf,

    /// Write the edited timeline here instead of overwriting --timeline
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress success messages
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Run the operation but do not write the timeline back
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Emit results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove gaps between selected audio clips, leaving a fixed pause
    Glue(GlueArgs),

    /// Interleave selected clips of two audio tracks end-to-end
    Zigzag(ZigZagArgs),

    /// Align selected video clips to the boundaries of selected audio clips
    AlignVideo,

    /// Move clips of one audio track onto the clips picked by CSV markers
    AlignAudio(AlignAudioArgs),

    /// Stretch selected video clips over the audio between CSV markers
    AlignImages(AlignImagesArgs),

    /// List selected clips of the active sequence, sorted by start
    Selected(SelectedArgs),

    /// Show the marker rows a CSV column yields
    Markers(MarkersArgs),

    /// Initialize a clipshift.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct GlueArgs {
    /// Pause between clips in seconds (default from config, else 0)
    #[arg(long, allow_hyphen_values = true)]
    pub gap: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ZigZagArgs {
    /// Pause after each clip of track A, seconds (default 0.5)
    #[arg(long, allow_hyphen_values = true)]
    pub gap_a: Option<String>,

    /// Pause after each clip of track B, seconds (default 0.2)
    #[arg(long, allow_hyphen_values = true)]
    pub gap_b: Option<String>,

    /// First audio track number, 1-based (default 1)
    #[arg(long)]
    pub track_a: Option<usize>,

    /// Second audio track number, 1-based (default 2)
    #[arg(long)]
    pub track_b: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct AlignAudioArgs {
    /// CSV file with the marker column
    #[arg(long)]
    pub csv: PathBuf,

    /// Audio track number (1-based) holding the clips to move
    #[arg(long)]
    pub track: usize,

    /// Marker column name (default "audio")
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AlignImagesArgs {
    /// CSV file with the marker column
    #[arg(long)]
    pub csv: PathBuf,

    /// Marker column name (default "images")
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindFilter {
    Video,
    Audio,
    All,
}

#[derive(Parser, Debug)]
pub struct SelectedArgs {
    /// Which track collection to list
    #[arg(long, value_enum, default_value_t = KindFilter::All)]
    pub kind: KindFilter,
}

#[derive(Parser, Debug)]
pub struct MarkersArgs {
    /// CSV file to scan
    #[arg(long)]
    pub csv: PathBuf,

    /// Column holding the markers
    #[arg(long)]
    pub column: String,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
