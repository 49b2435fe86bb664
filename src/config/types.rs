// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitcall.
//!
//! # Config Structure
//!
//! ```text
//! Config
//!  ├─ global: GlobalConfig   output_log_level, file_log_level, log_file, log_format
//!  └─ git:    GitConfig      cwd, env ["KEY=VALUE", ...]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::env::container::Env;
use crate::core::env::types::Assignment;
use crate::error::ConfigError;
use crate::logging::{LogFormat, LogLevel};

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Line format of the log file: `text` or `json`.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Settings for the git client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Working directory for git; the current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Environment overrides applied to every call, as `KEY=VALUE`.
    pub env: Vec<String>,
}

impl GitConfig {
    /// Parses every `env` entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAssignment` for the first malformed entry.
    pub fn assignments(&self) -> Result<Vec<Assignment>, ConfigError> {
        self.env.iter().map(|entry| entry.parse()).collect()
    }

    /// Builds the default overrides, later entries winning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAssignment` for the first malformed entry.
    pub fn env_overrides(&self) -> Result<Env, ConfigError> {
        Ok(Env::from_assignments(&self.assignments()?))
    }
}
