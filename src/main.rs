use clap::Parser;
use clipshift::cli::{AppContext, Cli, Commands};
use clipshift::cli_ext::{edit_cmd, inspect_cmd};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays clean for --json
    let filter = EnvFilter::try_from_env("CLIPSHIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        json: cli.json,
        timeline: cli.timeline,
        output: cli.output,
    };

    let result = match cli.command {
        Commands::Glue(args) => edit_cmd::glue_run(args, &ctx),
        Commands::Zigzag(args) => edit_cmd::zigzag_run(args, &ctx),
        Commands::AlignVideo => edit_cmd::align_video_run(&ctx),
        Commands::AlignAudio(args) => edit_cmd::align_audio_run(args, &ctx),
        Commands::AlignImages(args) => edit_cmd::align_images_run(args, &ctx),
        Commands::Selected(args) => inspect_cmd::selected_run(args, &ctx),
        Commands::Markers(args) => inspect_cmd::markers_run(args, &ctx),
        Commands::Init(args) => clipshift::infra::config::init(args, &ctx),
        Commands::Completions(args) => clipshift::completion::run(args, &ctx),
    };

    edit_cmd::finish_with_exit(result);
}
