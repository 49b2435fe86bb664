// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable map with copy-on-write sharing.
//!
//! ```text
//! Env { Arc<BTreeMap<EnvKey, String>> }
//! clone shares the map until the first write (Arc::make_mut)
//!
//! base.merged(&overrides)  -->  new Env, overrides win per key
//! ```

use super::types::{Assignment, EnvKey};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A set of environment variables.
///
/// Cloning is cheap: copies share the underlying map until one of them is
/// modified. Keys are unique; setting an existing key replaces its value.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<EnvKey, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        vars.into_iter().collect()
    }

    /// Creates an environment from `KEY=VALUE` assignments, later ones winning.
    #[must_use]
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        assignments
            .into_iter()
            .map(|a| (a.key(), a.value()))
            .collect()
    }

    /// Sets an environment variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.vars).insert(EnvKey::new(key), value.into());
        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(&EnvKey::new(key))
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.contains(key) {
            Arc::make_mut(&mut self.vars).remove(&EnvKey::new(key));
        }
        self
    }

    /// Applies `overrides` on top of this environment; overrides win on collision.
    pub fn merge(&mut self, overrides: &Self) -> &mut Self {
        if overrides.is_empty() {
            return self;
        }
        let vars = Arc::make_mut(&mut self.vars);
        for (key, value) in &*overrides.vars {
            vars.insert(key.clone(), value.clone());
        }
        self
    }

    /// Returns a new environment with `overrides` applied; `self` is unchanged.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut env = self.clone();
        env.merge(overrides);
        env
    }

    /// Returns all environment variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Returns an iterator over environment variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (EnvKey::new(k), v.into()))
            .collect();
        Self {
            vars: Arc::new(vars),
        }
    }
}

impl<K, V> Extend<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}
