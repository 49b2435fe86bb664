// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitcall using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitcall [global options] <command>
//! run [--merge-stderr] [--allow-failure] [--stdin TEXT] <NAME> [ARGS]...
//! version
//! options [--json]
//! inis
//! ```

pub mod global;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::RunArgs;
use clap::{Args, Parser, Subcommand};

/// Git Subprocess Execution Layer
///
/// Runs git subcommands with a configured working directory and environment.
#[derive(Debug, Parser)]
#[command(
    name = "gitcall",
    author,
    version,
    about = "Git Subprocess Execution Layer",
    long_about = "gitcall Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs git subcommands with a configured working directory and\n\
                  environment. `gitcall run rev_parse --short HEAD` runs\n\
                  `git rev-parse --short HEAD` and prints its output unchanged.",
    after_help = "CONFIG FILES:\n\n\
                  By default, gitcall loads `gitcall.toml` from the current\n\
                  directory if it exists. Additional files can be specified with\n\
                  --ini, those are loaded after it and override it. GITCALL_*\n\
                  environment variables override files, and --set overrides\n\
                  everything. Use --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs a git subcommand and prints its output.
    Run(RunArgs),

    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options(OptionsArgs),

    /// Lists the configuration files used.
    Inis,
}

/// Arguments of the `options` command.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionsArgs {
    /// Prints the configuration as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
