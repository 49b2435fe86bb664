// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   run, config (options/inis)
//!
//! handler error --> exit_status()
//!   GitError with code N  --> N (1..=255)
//!   anything else         --> 1
//! ```

pub mod config;
pub mod run;


use crate::error::CallError;

/// Maps a command error to the process exit status.
///
/// A failed git call reports git's own exit code, clamped to `1..=255`.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CallError>()
        .and_then(CallError::exit_code)
        .map_or(1, |code| u8::try_from(code.clamp(1, 255)).unwrap_or(1))
}
