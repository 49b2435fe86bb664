// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git client on top of the process runner.
//!
//! ```text
//! invoke(sub, args)                  overrides = {}
//! invoke_with_env(sub, args, env)    options   = default
//! invoke_with(sub, args, env, opts)
//!        |
//!        v
//!  effective env = base (Inherit: live snapshot | Fixed)
//!                ∪ default_env (from [git] config)
//!                ∪ call overrides           (right wins)
//!        |
//!        v
//!  ProcessBuilder("git" sub args..).cwd(self.cwd)
//!    Inherit: .env_overlay(default_env ∪ overrides)   (inherited vars pass through raw)
//!    Fixed:   .env(effective)                         (full replacement)
//!        |
//!        v
//!  ExecutionError --> GitError { subcommand, source }
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::config::types::GitConfig;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{ConfigError, GitError};

/// Name of the executable every invocation runs, looked up through `PATH`.
pub const GIT_EXECUTABLE: &str = "git";

/// Where a client takes its base environment from.
#[derive(Debug, Clone, Default)]
pub enum BaseEnv {
    /// Snapshot the process environment on every call.
    #[default]
    Inherit,
    /// Use this environment instead of the process one.
    Fixed(Env),
}

impl BaseEnv {
    fn snapshot(&self) -> Env {
        match self {
            Self::Inherit => current_env(),
            Self::Fixed(env) => env.clone(),
        }
    }

    /// Applies `overrides` to `builder` on top of this base.
    fn apply(&self, builder: ProcessBuilder, overrides: Env) -> ProcessBuilder {
        match self {
            Self::Inherit => builder.env_overlay(overrides),
            Self::Fixed(base) => builder.env(base.merged(&overrides)),
        }
    }
}

/// Extra execution options for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    pub flags: ProcessFlags,
    pub stdin: Option<String>,
}

/// Client for running git subcommands.
///
/// Holds no per-call state: the working directory, base environment and
/// default overrides are read fresh on every invocation.
#[derive(Debug, Clone)]
pub struct GitClient {
    cwd: PathBuf,
    base_env: BaseEnv,
    default_env: Env,
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitClient {
    /// Creates a client running in the current directory with the inherited environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cwd: PathBuf::from("."),
            base_env: BaseEnv::Inherit,
            default_env: Env::new(),
        }
    }

    /// Creates a client from the `[git]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if an entry of `git.env` is not `KEY=VALUE`.
    pub fn from_config(config: &GitConfig) -> Result<Self, ConfigError> {
        let mut client = Self::new().with_default_env(config.env_overrides()?);
        if let Some(cwd) = &config.cwd {
            client.set_cwd(cwd);
        }
        Ok(client)
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = dir.into();
        self
    }

    /// Sets the base environment.
    #[must_use]
    pub fn with_base_env(mut self, base: BaseEnv) -> Self {
        self.base_env = base;
        self
    }

    /// Sets overrides applied to every invocation, below per-call overrides.
    #[must_use]
    pub fn with_default_env(mut self, env: Env) -> Self {
        self.default_env = env;
        self
    }

    /// Working directory used by the next invocation.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, dir: impl Into<PathBuf>) {
        self.cwd = dir.into();
    }

    #[must_use]
    pub const fn base_env(&self) -> &BaseEnv {
        &self.base_env
    }

    #[must_use]
    pub const fn default_env(&self) -> &Env {
        &self.default_env
    }

    /// Computes the environment a child would see with `overrides` applied.
    ///
    /// With [`BaseEnv::Inherit`] this is a UTF-8 view: inherited variables
    /// that are not valid UTF-8 are missing here but still reach git.
    #[must_use]
    pub fn effective_env(&self, overrides: &Env) -> Env {
        let mut env = self.base_env.snapshot();
        env.merge(&self.default_env).merge(overrides);
        env
    }

    /// Runs `git <subcommand> <args...>` and returns its stdout.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    pub fn invoke<I, S>(&self, subcommand: &str, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.invoke_with(subcommand, args, &Env::new(), &ExecOptions::default())
    }

    /// Like [`GitClient::invoke`], with environment overrides for this call.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    pub fn invoke_with_env<I, S>(
        &self,
        subcommand: &str,
        args: I,
        overrides: &Env,
    ) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.invoke_with(subcommand, args, overrides, &ExecOptions::default())
    }

    /// Runs a git subcommand with environment overrides and extra options.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` wrapping the runner's `ExecutionError` if git
    /// cannot be started or exits unsuccessfully.
    pub fn invoke_with<I, S>(
        &self,
        subcommand: &str,
        args: I,
        overrides: &Env,
        options: &ExecOptions,
    ) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        trace!(subcommand, cwd = %self.cwd.display(), overrides = overrides.len(), "git");

        let builder = ProcessBuilder::new(GIT_EXECUTABLE)
            .arg(subcommand)
            .args(args)
            .cwd(&self.cwd)
            .flags(options.flags);
        let mut builder = self
            .base_env
            .apply(builder, self.default_env.merged(overrides));
        if let Some(content) = &options.stdin {
            builder = builder.stdin(content.as_str());
        }

        builder
            .run_text()
            .map_err(|source| GitError::new(subcommand.to_string(), source))
    }
}
