use clap::Parser;
use clipshift::cli::{Cli, Commands, KindFilter, ZigZagArgs};

#[test]
fn zigzag_flags_parse() {
    // Given
    let argv = vec![
        "cshift",
        "zigzag",
        "--gap-a",
        "0.4",
        "--gap-b",
        "abc",
        "--track-b",
        "3",
        "--timeline",
        "project.json",
        "--dry-run",
    ];

    // When
    let cli = Cli::parse_from(argv);

    // Then
    assert!(cli.dry_run);
    assert!(cli.timeline.ends_with("project.json"));
    match cli.command {
        Commands::Zigzag(ZigZagArgs { gap_a, gap_b, track_a, track_b }) => {
            assert_eq!(gap_a.as_deref(), Some("0.4"));
            // Non-numeric gaps are accepted here and fall back later with a warning
            assert_eq!(gap_b.as_deref(), Some("abc"));
            assert_eq!(track_a, None);
            assert_eq!(track_b, Some(3));
        }
        _ => panic!("expected Zigzag command"),
    }
}

#[test]
fn negative_gap_is_a_value_not_a_flag() {
    let cli = Cli::parse_from(["cshift", "glue", "--gap", "-0.5"]);
    match cli.command {
        Commands::Glue(args) => assert_eq!(args.gap.as_deref(), Some("-0.5")),
        _ => panic!("expected Glue command"),
    }
}

#[test]
fn align_audio_requires_csv_and_track() {
    assert!(Cli::try_parse_from(["cshift", "align-audio", "--csv", "m.csv"]).is_err());

    let cli = Cli::try_parse_from(["cshift", "align-audio", "--csv", "m.csv", "--track", "2"])
        .expect("parse");
    match cli.command {
        Commands::AlignAudio(args) => {
            assert_eq!(args.track, 2);
            assert!(args.column.is_none());
        }
        _ => panic!("expected AlignAudio command"),
    }
}

#[test]
fn global_flags_default() {
    let cli = Cli::parse_from(["cshift", "selected"]);
    assert_eq!(cli.timeline.to_str(), Some("timeline.json"));
    assert!(cli.output.is_none());
    assert!(!cli.json && !cli.quiet && !cli.no_color && !cli.dry_run);
    match cli.command {
        Commands::Selected(args) => assert!(matches!(args.kind, KindFilter::All)),
        _ => panic!("expected Selected command"),
    }
}
