//! TOML configuration for usercache: score weights and query limits.

mod error;


pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use usercache_core::cache::ScoreWeights;

/// Hard ceiling used when `max_limit` is not configured.
pub const DEFAULT_MAX_LIMIT: u32 = 200;

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub score: ScoreWeights,
    pub query: QueryConfig,
}

impl Config {
    /// Parse and validate configuration text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded usercache config");

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.query.validate()
    }
}

///
/// QueryConfig
///
/// `default_limit` of 0 means unlimited.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: 0,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("query.max_limit must be positive".into()));
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "query.default_limit ({}) exceeds query.max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }

        Ok(())
    }

    /// Limit to pass to the score query for a caller's request.
    ///
    /// 0 falls back to `default_limit`; anything above `max_limit` is
    /// clamped.
    #[must_use]
    pub fn effective_limit(&self, requested: u32) -> u32 {
        let limit = if requested == 0 {
            self.default_limit
        } else {
            requested
        };

        limit.min(self.max_limit)
    }
}
