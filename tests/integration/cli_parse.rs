use clap::{CommandFactory, Parser};
use repo_baseline::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["repo-baseline", "binaries", "--owner", "o", "--repo", "r"],
        vec![
            "repo-baseline",
            "binaries",
            "--owner",
            "o",
            "--repo",
            "r",
            "--branch",
            "dev",
            "--format",
            "json",
            "--continue-on-error",
        ],
        vec!["repo-baseline", "check", "--owner", "o", "--repo", "r"],
        vec!["repo-baseline", "check", "--format", "json", "--log-level", "debug"],
        vec![
            "repo-baseline",
            "classify",
            "--owner",
            "o",
            "--repo",
            "r",
            "--path",
            "bin/tool",
            "--truncated",
        ],
        vec![
            "repo-baseline",
            "--config",
            "baseline.toml",
            "classify",
            "--path",
            "a.bin",
            "--hint",
            "true",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn classify_requires_path() {
    assert!(Cli::try_parse_from(["repo-baseline", "classify", "--owner", "o"]).is_err());
}

#[test]
fn hint_must_be_boolean() {
    let parsed = Cli::try_parse_from([
        "repo-baseline",
        "classify",
        "--path",
        "x",
        "--hint",
        "maybe",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn classify_flags_are_parsed() {
    let cli = Cli::try_parse_from([
        "repo-baseline",
        "classify",
        "--path",
        "dir/file name",
        "--hint",
        "false",
        "--truncated",
    ])
    .unwrap();
    match cli.command {
        Commands::Classify {
            path,
            hint,
            truncated,
            ..
        } => {
            assert_eq!(path, "dir/file name");
            assert_eq!(hint, Some(false));
            assert!(truncated);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
