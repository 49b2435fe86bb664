// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git invocation module.
//!
//! ```text
//!     client.rev_parse().arg("HEAD").call()
//!                  |
//!                  v
//!   ,----------------------------------,
//!   | subcommand: name translation,    |
//!   | argument/env collection          |
//!   '----------------+-----------------'
//!                    v
//!   ,----------------------------------,
//!   | client: cwd, base env, defaults, |
//!   | GitError wrapping                |
//!   '----------------+-----------------'
//!                    v
//!          core::process (runner)
//! ```

pub mod client;
pub mod subcommand;

pub use client::{BaseEnv, ExecOptions, GIT_EXECUTABLE, GitClient};
pub use subcommand::{Subcommand, WRAPPED_MEMBERS, subcommand_name};
