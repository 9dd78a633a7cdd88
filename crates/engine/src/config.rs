// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spy configuration, loaded from TOML with environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What happens to registered targets that a later poll no longer lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryPruning {
    /// A feature's poll replaces the targets registered for it; targets no
    /// feature lists any more are forgotten.
    #[default]
    PerFeature,
    /// Targets stay registered for the life of the process.
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `cieye_engine=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the log file; logs go to stderr when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level(), dir: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpyConfig {
    /// Build farm endpoint this spy speaks for
    pub endpoint: String,
    #[serde(default)]
    pub registry_pruning: RegistryPruning,
    #[serde(default)]
    pub log: LogConfig,
}

impl SpyConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), registry_pruning: RegistryPruning::default(), log: LogConfig::default() }
    }

    /// Read, parse, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)?.apply_env().validated()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from `CIEYE_*` environment variables.
    pub fn apply_env(mut self) -> Self {
        if let Some(endpoint) = env::endpoint() {
            self.endpoint = endpoint;
        }
        if let Some(level) = env::log_level() {
            self.log.level = level;
        }
        self
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        Ok(self)
    }

    /// Whether `endpoint` names the same build farm as this spy.
    pub fn speaks_for(&self, endpoint: &str) -> bool {
        normalize_endpoint(&self.endpoint) == normalize_endpoint(endpoint)
    }
}

fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.trim().trim_end_matches('/')
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
