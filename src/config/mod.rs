// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitcall.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitcall.toml (cwd, skipped with --no-default-inis)
//! 3. --ini FILE (in order)
//! 4. GITCALL_* env vars
//! 5. --set and dedicated CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITCALL_GLOBAL__OUTPUT_LOG_LEVEL=4  → global.output_log_level = 4
//! GITCALL_GIT__CWD=/path/to/repo      → git.cwd = "/path/to/repo"
//! GITCALL_GIT__ENV="A=1;B=2"          → git.env = ["A=1", "B=2"]
//! ```
//!
//! # Example
//!
//! ```toml
//! [global]
//! output_log_level = 2
//!
//! [git]
//! cwd = "/path/to/repo"
//! env = ["GIT_AUTHOR_NAME=Build Bot", "GIT_TERMINAL_PROMPT=0"]
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "gitcall.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GITCALL";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git client options.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitcall::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitcall.toml")
    ///     .with_env_prefix("GITCALL")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a `git.env` entry is not `KEY=VALUE` or
    /// `global.log_file` is empty.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.git.assignments()?;
        if self
            .global
            .log_file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "log_file".to_string(),
                message: "path must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// One aligned `key = value` line per option, in key order.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    /// Serialize the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.log_format".into(),
            self.global.log_format.as_str().to_string(),
        );
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "git.cwd".into(),
            self.git
                .cwd
                .as_ref()
                .map_or_else(|| ".".to_string(), |p| p.display().to_string()),
        );
        options.insert("git.env".into(), self.git.env.join(";"));
    }
}
