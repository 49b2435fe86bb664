// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new
//!  • arg/args/cwd/flags/flag/stdin
//!  • env          (ChildEnv::Replace: env_clear, then the given vars)
//!  • env_overlay  (ChildEnv::Overlay: inherited vars untouched, given vars on top)
//!
//! ProcessFlags: ALLOW_FAILURE, MERGE_STDERR
//! ```

use bitflags::bitflags;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::env::container::Env;

bitflags! {
    /// Extra execution options for a single invocation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// Don't fail if the process exits with an unaccepted status
        const ALLOW_FAILURE = 0x01;
        /// Append captured stderr to the returned text
        const MERGE_STDERR = 0x02;
    }
}

/// How the child's environment is formed from an [`Env`].
#[derive(Debug, Clone)]
pub enum ChildEnv {
    /// The child sees exactly these variables.
    Replace(Env),
    /// The child inherits the parent's environment, these variables win.
    ///
    /// Inherited entries pass through as raw OS strings, so variables that
    /// are not valid UTF-8 still reach the child.
    Overlay(Env),
}

/// Output from a completed process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Returns the process exit code, `None` if it was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Returns captured stdout, exactly as emitted.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns captured stderr, exactly as emitted.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns true if the process exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Consumes the output, returning stdout with stderr appended when `merge_stderr` is set.
    #[must_use]
    pub fn into_text(self, merge_stderr: bool) -> String {
        if merge_stderr {
            let mut text = self.stdout;
            text.push_str(&self.stderr);
            text
        } else {
            self.stdout
        }
    }
}

/// Builder for configuring and running a process.
///
/// Uses the builder pattern to configure process options before spawning.
/// A builder describes exactly one invocation and is consumed by `run()`.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    /// Path or name of the executable
    program: PathBuf,
    /// Command-line arguments, passed verbatim
    args: Vec<OsString>,
    /// Working directory
    cwd: Option<PathBuf>,
    /// Child environment; `None` inherits unchanged
    env: Option<ChildEnv>,
    /// Process flags
    flags: ProcessFlags,
    /// Stdin content (if any)
    stdin: Option<String>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// The program can be an absolute path, relative path, or just the executable name.
    /// A bare name is looked up by the OS in the `PATH` of the effective environment.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: None,
            flags: ProcessFlags::empty(),
            stdin: None,
        }
    }

    /// Adds an argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Adds multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets the working directory for the process.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the environment for the process.
    ///
    /// The given environment fully replaces the inherited one.
    #[must_use]
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(ChildEnv::Replace(env));
        self
    }

    /// Keeps the inherited environment and sets `overrides` on top of it.
    #[must_use]
    pub fn env_overlay(mut self, overrides: Env) -> Self {
        self.env = Some(ChildEnv::Overlay(overrides));
        self
    }

    /// Sets process flags.
    #[must_use]
    pub const fn flags(mut self, flags: ProcessFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Adds a process flag.
    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Sets stdin content.
    #[must_use]
    pub fn stdin(mut self, content: impl Into<String>) -> Self {
        self.stdin = Some(content.into());
        self
    }

    /// Returns a reference to the program path.
    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    pub(super) fn args_slice(&self) -> &[OsString] {
        &self.args
    }

    pub(super) const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub(super) const fn environment(&self) -> Option<&ChildEnv> {
        self.env.as_ref()
    }

    pub(super) const fn process_flags(&self) -> ProcessFlags {
        self.flags
    }

    pub(super) fn stdin_content(&self) -> Option<&str> {
        self.stdin.as_deref()
    }
}
