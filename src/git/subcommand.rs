// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subcommands as bound callables.
//!
//! ```text
//! client.rev_parse()            client.subcommand("rev_parse")
//!          \                              /
//!           +--> subcommand_name: '_' -> '-'  ("rev-parse")
//!                      |
//!                      v
//!   Subcommand { client, name, args, env, options }
//!     .arg("--short").arg("HEAD").env(k, v)
//!     .call() --> GitClient::invoke_with
//! ```
//!
//! Names are not validated here; git itself rejects unknown subcommands and
//! the failure comes back as a `GitError`. A subcommand containing a literal
//! underscore cannot be expressed through the translation; call
//! [`GitClient::invoke`] directly for those.

use std::ffi::{OsStr, OsString};

use super::client::{ExecOptions, GitClient};
use crate::core::env::container::Env;
use crate::core::process::builder::ProcessFlags;
use crate::error::GitError;

/// Translates a Rust-style member name into a git subcommand name.
///
/// Every `_` becomes `-`: `rev_parse` -> `rev-parse`.
#[must_use]
pub fn subcommand_name(member: &str) -> String {
    member.replace('_', "-")
}

/// One git subcommand bound to a client, collecting arguments until called.
#[derive(Debug, Clone)]
#[must_use = "a subcommand does nothing until `call` is invoked"]
pub struct Subcommand<'a> {
    client: &'a GitClient,
    name: String,
    args: Vec<OsString>,
    env: Env,
    options: ExecOptions,
}

impl<'a> Subcommand<'a> {
    fn new(client: &'a GitClient, member: &str) -> Self {
        Self {
            client,
            name: subcommand_name(member),
            args: Vec::new(),
            env: Env::new(),
            options: ExecOptions::default(),
        }
    }

    /// The translated subcommand name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Overrides one environment variable for this call.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.set(key, value);
        self
    }

    /// Overrides several environment variables for this call.
    pub fn envs(mut self, overrides: &Env) -> Self {
        self.env.merge(overrides);
        self
    }

    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.options.flags |= flag;
        self
    }

    pub fn stdin(mut self, content: impl Into<String>) -> Self {
        self.options.stdin = Some(content.into());
        self
    }

    /// Runs the subcommand and returns its stdout.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    pub fn call(self) -> Result<String, GitError> {
        self.client
            .invoke_with(&self.name, &self.args, &self.env, &self.options)
    }

    /// Appends `args` and runs the subcommand.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    pub fn call_with<I, S>(self, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args(args).call()
    }
}

impl GitClient {
    /// Binds the subcommand named by `member` (underscores become hyphens).
    pub fn subcommand(&self, member: &str) -> Subcommand<'_> {
        Subcommand::new(self, member)
    }
}

/// Generates one named wrapper per member, all going through `subcommand`.
macro_rules! git_subcommands {
    ($($member:ident),+ $(,)?) => {
        impl GitClient {
            $(
                #[doc = concat!("Binds `git ", stringify!($member), "`, underscores translated to hyphens.")]
                pub fn $member(&self) -> Subcommand<'_> {
                    self.subcommand(stringify!($member))
                }
            )+
        }

        /// Member names that have a named wrapper on [`GitClient`].
        pub const WRAPPED_MEMBERS: &[&str] = &[$(stringify!($member)),+];
    };
}

// `clone` is left out: the name belongs to `Clone::clone`. Use
// `subcommand("clone")`.
git_subcommands! {
    add,
    branch,
    checkout,
    commit,
    config,
    diff,
    fetch,
    init,
    log,
    ls_files,
    merge_base,
    pull,
    push,
    remote,
    reset,
    rev_parse,
    show,
    stash,
    status,
    switch,
    symbolic_ref,
    tag,
    worktree,
}
