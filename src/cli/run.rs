// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `run` command.

use clap::Args;
use std::ffi::OsString;

/// Runs one git subcommand and prints its output.
///
/// Options of `run` go before `NAME`; everything from `NAME` on is passed
/// to git, including arguments that look like `run` options.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Appends git's stderr to the printed output.
    #[arg(long)]
    pub merge_stderr: bool,

    /// Prints the output and exits successfully even if git fails.
    #[arg(long)]
    pub allow_failure: bool,

    /// Text fed to git's standard input.
    #[arg(long, value_name = "TEXT")]
    pub stdin: Option<String>,

    /// Subcommand to run, then its arguments. Underscores in the subcommand
    /// become hyphens (`rev_parse` runs `git rev-parse`).
    #[arg(
        value_name = "NAME [ARGS]",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

impl RunArgs {
    /// The subcommand name as given.
    #[must_use]
    pub fn name(&self) -> String {
        self.command
            .first()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Arguments after the subcommand name.
    #[must_use]
    pub fn git_args(&self) -> &[OsString] {
        self.command.get(1..).unwrap_or_default()
    }
}
