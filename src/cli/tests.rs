// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["gitcall", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
    assert!(cli.global.inis.is_empty());
}

#[test]
fn test_parse_no_command() {
    let cli = Cli::try_parse_from(["gitcall"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_run_with_hyphenated_args() {
    let cli = Cli::try_parse_from(["gitcall", "run", "rev_parse", "--short", "HEAD"]).unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };

    assert_eq!(args.name(), "rev_parse");
    assert_eq!(
        args.git_args(),
        [OsString::from("--short"), OsString::from("HEAD")]
    );
    assert!(!args.merge_stderr);
    assert!(!args.allow_failure);
}

#[test]
fn test_parse_run_flags_before_name() {
    let cli = Cli::try_parse_from([
        "gitcall",
        "run",
        "--merge-stderr",
        "--allow-failure",
        "--stdin",
        "hello",
        "hash_object",
        "--stdin",
    ])
    .unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };

    assert!(args.merge_stderr);
    assert!(args.allow_failure);
    assert_eq!(args.stdin.as_deref(), Some("hello"));
    assert_eq!(args.name(), "hash_object");
    assert_eq!(args.git_args(), [OsString::from("--stdin")]);
}

#[test]
fn test_parse_run_passes_run_options_after_name() {
    let cli = Cli::try_parse_from(["gitcall", "run", "commit", "--allow-failure", "-m", "msg"]).unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };

    assert!(!args.allow_failure);
    assert_eq!(args.name(), "commit");
    assert_eq!(
        args.git_args(),
        [
            OsString::from("--allow-failure"),
            OsString::from("-m"),
            OsString::from("msg"),
        ]
    );
}

#[test]
fn test_parse_run_requires_name() {
    assert!(Cli::try_parse_from(["gitcall", "run"]).is_err());
}

#[test]
fn test_parse_repeated_env() {
    let cli = Cli::try_parse_from([
        "gitcall",
        "-e",
        "GIT_AUTHOR_NAME=Jane Doe",
        "--env",
        "EMPTY=",
        "-e",
        "X=a=b",
        "run",
        "status",
    ])
    .unwrap();

    let pairs: Vec<(&str, &str)> = cli
        .global
        .env
        .iter()
        .map(|a| (a.key(), a.value()))
        .collect();
    assert_eq!(
        pairs,
        [("GIT_AUTHOR_NAME", "Jane Doe"), ("EMPTY", ""), ("X", "a=b")]
    );
}

#[test]
fn test_parse_malformed_env_rejected() {
    assert!(Cli::try_parse_from(["gitcall", "-e", "NOVALUE", "run", "status"]).is_err());
    assert!(Cli::try_parse_from(["gitcall", "-e", "=value", "run", "status"]).is_err());
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "gitcall",
        "-i",
        "a.toml",
        "--ini",
        "b.toml",
        "-C",
        "/srv/repo",
        "-l",
        "4",
        "--log-file",
        "gitcall.log",
        "-s",
        "global.file_log_level=2",
        "--no-default-inis",
        "options",
        "--json",
    ])
    .unwrap();

    assert_eq!(
        cli.global.inis,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(cli.global.no_default_inis);
    assert!(matches!(cli.command, Some(Command::Options(ref o)) if o.json));

    assert_eq!(
        cli.global.to_config_overrides(),
        [
            "global.file_log_level=2",
            "global.output_log_level=4",
            "global.file_log_level=4",
            "global.log_file=gitcall.log",
            "git.cwd=/srv/repo",
        ]
    );
}

#[test]
fn test_parse_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["gitcall", "-l", "7", "version"]).is_err());
}

#[test]
fn test_file_log_level_kept_when_given() {
    let cli = Cli::try_parse_from(["gitcall", "-l", "1", "--file-log-level", "5", "inis"]).unwrap();
    assert_eq!(
        cli.global.to_config_overrides(),
        ["global.output_log_level=1", "global.file_log_level=5"]
    );
}
