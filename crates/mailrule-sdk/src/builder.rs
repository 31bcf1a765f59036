//! Builder pattern for Evaluator

use crate::config::EvaluatorConfig;
use crate::error::{EvaluateError, Result};
use crate::evaluator::Evaluator;
use mailrule_core::types::environment::EMAIL_VARIABLE;
use mailrule_core::Environment;
use mailrule_runtime::{CelEngine, ExpressionEngine};

/// Builder for Evaluator
///
/// # Example
///
/// ```rust,ignore
/// use mailrule_sdk::EvaluatorBuilder;
///
/// let evaluator = EvaluatorBuilder::new()
///     .cache_programs(true)
///     .cache_capacity(256)
///     .build()?;
/// ```
pub struct EvaluatorBuilder<E: ExpressionEngine = CelEngine> {
    engine: E,
    environment: Option<Environment>,
    config: EvaluatorConfig,
}

impl EvaluatorBuilder<CelEngine> {
    /// Create a new builder using the CEL engine
    pub fn new() -> Self {
        Self {
            engine: CelEngine::new(),
            environment: None,
            config: EvaluatorConfig::new(),
        }
    }
}

impl Default for EvaluatorBuilder<CelEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ExpressionEngine> EvaluatorBuilder<E> {
    /// Swap in another expression engine
    pub fn with_engine<F: ExpressionEngine>(self, engine: F) -> EvaluatorBuilder<F> {
        EvaluatorBuilder {
            engine,
            environment: self.environment,
            config: self.config,
        }
    }

    /// Compile against a custom environment instead of `Environment::email()`
    ///
    /// The environment must still declare `email`, which is the only variable
    /// the evaluator binds.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable program caching
    pub fn cache_programs(mut self, enable: bool) -> Self {
        self.config.cache_programs = enable;
        self
    }

    /// Set program cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Enable failure logging
    pub fn log_failures(mut self, enable: bool) -> Self {
        self.config.log_failures = enable;
        self
    }

    /// Build the evaluator
    pub fn build(self) -> Result<Evaluator<E>> {
        self.config.validate()?;

        let environment = self.environment.unwrap_or_else(Environment::email);
        if !environment.is_declared(EMAIL_VARIABLE) {
            return Err(EvaluateError::Environment(format!(
                "environment does not declare '{EMAIL_VARIABLE}'"
            )));
        }

        tracing::debug!(
            engine = self.engine.name(),
            cache_programs = self.config.cache_programs,
            "building evaluator"
        );

        Ok(Evaluator::from_parts(self.engine, environment, self.config))
    }
}
