// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation for gitcall.

use std::io::Write as _;
use tracing::trace;

use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::core::env::container::Env;
use crate::core::env::types::Assignment;
use crate::core::process::builder::ProcessFlags;
use crate::error::CallResult;
use crate::git::GitClient;

/// Runs the requested subcommand and returns its output.
///
/// `env` holds the `--env` assignments; they win over `git.env`.
///
/// # Errors
///
/// Returns a `CallError` if `git.env` is malformed or the git call fails.
pub fn execute_run(args: &RunArgs, config: &Config, env: &[Assignment]) -> CallResult<String> {
    let client = GitClient::from_config(&config.git)?;
    let overrides = Env::from_assignments(env);

    let mut flags = ProcessFlags::empty();
    flags.set(ProcessFlags::MERGE_STDERR, args.merge_stderr);
    flags.set(ProcessFlags::ALLOW_FAILURE, args.allow_failure);

    let mut subcommand = client
        .subcommand(&args.name())
        .args(args.git_args())
        .envs(&overrides)
        .flag(flags);
    if let Some(stdin) = &args.stdin {
        subcommand = subcommand.stdin(stdin.as_str());
    }

    trace!(subcommand = subcommand.name(), cwd = %client.cwd().display(), "run");
    Ok(subcommand.call()?)
}

/// Main handler for run command.
///
/// Prints git's output exactly as received.
///
/// # Errors
///
/// Returns a `CallError` if the git call fails or stdout cannot be written.
pub fn run_git_command(args: &RunArgs, config: &Config, env: &[Assignment]) -> CallResult<()> {
    let output = execute_run(args, config, env)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
