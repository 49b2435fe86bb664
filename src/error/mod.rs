// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          CallError (16 bytes)
//!                 |
//!       +---------+---------+
//!       v         v         v
//!      Git      Config      Io
//!      Box       Box       Box
//!
//! Causal chain of a failed git call:
//!   GitError --source--> ExecutionError --source--> io::Error
//!   (client)             (runner)                   (spawn only)
//! ```
//!
//! `ExecutionError` is what the process runner produces. `GitError` is the
//! only error the git client lets escape; it always wraps the runner's error.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CallError`].
pub type CallResult<T> = std::result::Result<T, CallError>;

/// Top-level error type for command handlers.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum CallError {
    /// A git invocation failed.
    #[error(transparent)]
    Git(#[from] Box<GitError>),

    /// Configuration or argument error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Writing git's output failed.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl CallError {
    /// Returns the exit code of the failed child process, if any.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Git(err) => err.exit_code(),
            Self::Config(_) | Self::Io(_) => None,
        }
    }
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for CallError {
                fn from(err: $error) -> Self {
                    CallError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Execution Errors ---

/// A child process could not be started or exited unsuccessfully.
///
/// The message is the captured stderr, a single newline, then the captured
/// stdout. Callers that need the streams separately use the accessors.
#[derive(Debug, Error)]
#[error("{stderr}\n{stdout}")]
pub struct ExecutionError {
    args: Vec<String>,
    stderr: String,
    stdout: String,
    exit_code: Option<i32>,
    #[source]
    source: Option<std::io::Error>,
}

impl ExecutionError {
    /// The process ran and exited with an unaccepted status.
    ///
    /// `exit_code` is `None` when the process was terminated by a signal.
    pub(crate) const fn exited(
        args: Vec<String>,
        stdout: String,
        stderr: String,
        exit_code: Option<i32>,
    ) -> Self {
        Self {
            args,
            stderr,
            stdout,
            exit_code,
            source: None,
        }
    }

    /// The process could not be spawned or its output could not be collected.
    pub(crate) fn spawn_failed(args: Vec<String>, source: std::io::Error) -> Self {
        Self {
            args,
            stderr: source.to_string(),
            stdout: String::new(),
            exit_code: None,
            source: Some(source),
        }
    }

    /// Full argument vector, program first.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Captured standard error.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Captured standard output.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Exit code of the child, `None` if it never started or was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Returns true if the process never started.
    #[must_use]
    pub const fn is_spawn_failure(&self) -> bool {
        self.source.is_some()
    }
}

// --- Git Errors ---

/// A git invocation failed.
///
/// Wraps the runner's [`ExecutionError`] as its source and forwards its
/// payload accessors, so it can be handled wherever an execution failure is
/// expected.
#[derive(Debug, Error)]
#[error("git {subcommand} failed")]
pub struct GitError {
    subcommand: String,
    #[source]
    source: ExecutionError,
}

impl GitError {
    pub(crate) const fn new(subcommand: String, source: ExecutionError) -> Self {
        Self { subcommand, source }
    }

    /// The subcommand that was invoked (e.g. `rev-parse`).
    #[must_use]
    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    /// The underlying execution failure.
    #[must_use]
    pub const fn execution(&self) -> &ExecutionError {
        &self.source
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        self.source.stderr()
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        self.source.stdout()
    }

    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.source.exit_code()
    }
}

impl From<GitError> for ExecutionError {
    fn from(err: GitError) -> Self {
        err.source
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `KEY=VALUE` assignment could not be parsed.
    #[error("invalid assignment '{input}': expected KEY=VALUE")]
    InvalidAssignment { input: String },

    /// An override key does not name a `section.key` option.
    #[error("invalid option '{key}': expected SECTION.KEY")]
    InvalidOverrideKey { key: String },
}
