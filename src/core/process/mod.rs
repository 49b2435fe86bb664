// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .flag() .stdin()
//!   .run() / .run_text()
//!       --> std::process::Command (piped stdout/stderr)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//!        or ExecutionError { args, stderr, stdout, exit_code }
//!
//! execute(command, args, cwd, env, flags) --> stdout text
//! ```

pub mod builder;
mod runner;
#[cfg(test)]
mod tests;

pub use runner::execute;

/// Target of every record the runner emits, including the failure record.
pub const LOG_TARGET: &str = "gitcall::core::process";
