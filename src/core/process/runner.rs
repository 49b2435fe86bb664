// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run() / run_text() / execute()
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!   spawn() + feed stdin + wait_with_output()
//!              |            \
//!              |             spawn error --> warn! --> ExecutionError (no exit code)
//!              v
//!    validate exit_code
//!    (skip if ALLOW_FAILURE)
//!              |            \
//!              |             rejected --> warn! --> ExecutionError { stderr, stdout, code }
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr }
//! ```
//!
//! Every call blocks the calling thread until the child exits. There is no
//! timeout and no cancellation.

use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, trace, warn};

use super::LOG_TARGET;
use super::builder::{ChildEnv, ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::core::env::container::Env;
use crate::error::ExecutionError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full argument vector (program first) as text.
    fn argv(&self) -> Vec<String> {
        std::iter::once(self.program().as_os_str())
            .chain(self.args_slice().iter().map(|a| a.as_os_str()))
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Returns the full command line as a string (for logging).
    fn command_line(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| {
                if arg.contains(' ') {
                    format!("\"{arg}\"")
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Spawns the process and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an `ExecutionError` if:
    /// - The child cannot be spawned (missing executable, invalid working directory).
    /// - Its output cannot be collected.
    /// - It exits with a non-zero status (unless `ALLOW_FAILURE` is set).
    ///   A process killed by a signal never has an accepted status.
    pub fn run(self) -> Result<ProcessOutput, ExecutionError> {
        let name = self.display_name();

        if let Some(cwd) = self.working_dir() {
            debug!(target: LOG_TARGET, cwd = %cwd.display(), "cd");
        }
        debug!(target: LOG_TARGET, cmd = %self.command_line(), "exec");

        let output = match self.spawn_and_wait() {
            Ok(output) => output,
            Err(source) => {
                let err = ExecutionError::spawn_failed(self.argv(), source);
                self.log_failure(&name, &err);
                return Err(err);
            }
        };

        let exit_code = output.status.code();
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        let accepted = exit_code == Some(0);
        if !accepted && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE) {
            let err = ExecutionError::exited(self.argv(), stdout, stderr, exit_code);
            self.log_failure(&name, &err);
            return Err(err);
        }

        trace!(target: LOG_TARGET, process = %name, exit_code = ?exit_code, "completed");
        Ok(ProcessOutput::new(exit_code, stdout, stderr))
    }

    /// Runs the process and returns its text output.
    ///
    /// The text is stdout exactly as emitted, followed by stderr when
    /// `MERGE_STDERR` is set.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessBuilder::run`].
    pub fn run_text(self) -> Result<String, ExecutionError> {
        let merge = self.process_flags().contains(ProcessFlags::MERGE_STDERR);
        self.run().map(|output| output.into_text(merge))
    }

    fn spawn_and_wait(&self) -> std::io::Result<std::process::Output> {
        let mut child = self.build_command().spawn()?;
        let stdin = child.stdin.take();

        std::thread::scope(|scope| {
            if let (Some(mut pipe), Some(content)) = (stdin, self.stdin_content()) {
                // Fed from a separate thread so a child filling its stdout
                // pipe before reading stdin cannot deadlock us. The child may
                // also exit without reading.
                let dispatch = tracing::dispatcher::get_default(Clone::clone);
                scope.spawn(move || {
                    tracing::dispatcher::with_default(&dispatch, || {
                        feed_stdin(&mut pipe, content.as_bytes());
                    });
                });
            }
            child.wait_with_output()
        })
    }

    /// Emits the single diagnostic record for a failed invocation.
    fn log_failure(&self, name: &str, err: &ExecutionError) {
        warn!(
            target: LOG_TARGET,
            process = %name,
            args = ?err.args(),
            cwd = ?self.working_dir(),
            flags = ?self.process_flags(),
            stderr = %err.stderr(),
            exit_code = ?err.exit_code(),
            "command failed"
        );
    }

    /// Builds the std Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        match self.environment() {
            Some(ChildEnv::Replace(env)) => {
                command.env_clear();
                command.envs(env.iter());
            }
            Some(ChildEnv::Overlay(overrides)) => {
                command.envs(overrides.iter());
            }
            None => {}
        }

        if self.stdin_content().is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }

        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        command
    }
}

/// Writes `content` to a child's stdin.
///
/// A broken pipe means the child exited without reading and is not reported.
/// The exit status decides the outcome either way.
pub(super) fn feed_stdin(pipe: &mut impl Write, content: &[u8]) {
    if let Err(e) = pipe.write_all(content)
        && e.kind() != ErrorKind::BrokenPipe
    {
        debug!(target: LOG_TARGET, error = %e, "stdin write failed");
    }
}

/// Executes `command` with `args` in `working_dir` and returns its stdout.
///
/// `env`, when given, fully replaces the inherited environment for this call.
///
/// # Errors
///
/// Returns an `ExecutionError` if the process cannot be started or exits
/// with a non-zero status (unless `ALLOW_FAILURE` is set).
pub fn execute<I, S>(
    command: impl AsRef<Path>,
    args: I,
    working_dir: impl AsRef<Path>,
    env: Option<&Env>,
    flags: ProcessFlags,
) -> Result<String, ExecutionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut builder = ProcessBuilder::new(command)
        .args(args)
        .cwd(working_dir)
        .flags(flags);
    if let Some(env) = env {
        builder = builder.env(env.clone());
    }
    builder.run_text()
}
