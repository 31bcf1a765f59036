//! Configuration types for Evaluator

use crate::error::{EvaluateError, Result};
use serde::{Deserialize, Serialize};

/// Default number of compiled programs kept when caching is enabled
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Evaluator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Keep compiled programs keyed by expression text
    pub cache_programs: bool,

    /// Upper bound on cached programs
    pub cache_capacity: usize,

    /// Emit a warning for every failed evaluation
    pub log_failures: bool,
}

impl EvaluatorConfig {
    /// Create a new configuration with defaults: no cache, failures logged
    pub fn new() -> Self {
        Self {
            cache_programs: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            log_failures: true,
        }
    }

    /// Parse a configuration from JSON; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EvaluateError::Environment(format!("invalid evaluator config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Enable or disable the program cache
    pub fn cache_programs(mut self, enable: bool) -> Self {
        self.cache_programs = enable;
        self
    }

    /// Set cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Enable failure logging
    pub fn log_failures(mut self, enable: bool) -> Self {
        self.log_failures = enable;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_programs && self.cache_capacity == 0 {
            return Err(EvaluateError::Environment(
                "cache_capacity must be positive when cache_programs is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
