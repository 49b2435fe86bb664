// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! Env (copy-on-write BTreeMap<String, String>)
//! Sources: current_env(), Env::from_map(), Env::from_assignments()
//! Ops: set/get/remove/merge/merged
//! ```
//!
//! - **Case-insensitive on Windows**
//! - **Copy-on-write**: clones share data until modified
//! - **Never touches the process environment**: `current_env()` only reads

pub mod container;
pub mod types;


/// Captures the current process environment.
///
/// Variables whose name or value is not valid UTF-8 cannot be represented in
/// an [`container::Env`] and are left out of the snapshot. Children started
/// with an overlay environment still inherit them.
#[must_use]
pub fn current_env() -> container::Env {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
