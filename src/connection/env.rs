//! Loading connection strings from the environment.

use super::record::ConnectionRecord;
use crate::error::{UrlError, UrlResult};
use std::collections::HashMap;

/// Conventional variable holding the application's connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;

    /// Check if a variable exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Default environment source using std::env.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a HashMap.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create a new map-based environment source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add multiple variables.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars.extend(vars);
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl ConnectionRecord {
    /// Parse the connection string stored in variable `var` of `source`.
    pub fn from_env_source<S: EnvSource + ?Sized>(source: &S, var: &str) -> UrlResult<Self> {
        let url = source
            .get(var)
            .ok_or_else(|| UrlError::EnvNotFound(var.to_string()))?;
        Self::parse(url.trim())
    }

    /// Parse from an environment variable.
    pub fn from_env(var: &str) -> UrlResult<Self> {
        Self::from_env_source(&StdEnvSource, var)
    }

    /// Parse from the `DATABASE_URL` environment variable.
    pub fn from_database_url() -> UrlResult<Self> {
        Self::from_env(DATABASE_URL)
    }
}
