//! Core Evaluator implementation

use super::cache::ProgramCache;
use super::types::{Rule, RuleMatch};
use crate::builder::EvaluatorBuilder;
use crate::config::EvaluatorConfig;
use crate::error::{EvaluateError, Result};
use mailrule_core::types::environment::EMAIL_VARIABLE;
use mailrule_core::{Email, Environment, EvaluationContext};
use mailrule_runtime::{Bindings, CelEngine, ExpressionEngine};
use std::sync::Arc;

/// Evaluates boolean predicates against email records
///
/// An evaluator holds no per-call state. Without the program cache every call
/// compiles its expression afresh; with it, compiled programs are shared
/// read-only between callers.
pub struct Evaluator<E: ExpressionEngine = CelEngine> {
    engine: E,
    environment: Environment,
    config: EvaluatorConfig,
    cache: Option<ProgramCache<E::Program>>,
}

impl Evaluator<CelEngine> {
    /// Evaluator with the CEL engine, the email environment and default config
    pub fn new() -> Self {
        Self::from_parts(CelEngine::new(), Environment::email(), EvaluatorConfig::new())
    }

    pub fn builder() -> EvaluatorBuilder<CelEngine> {
        EvaluatorBuilder::new()
    }
}

impl Default for Evaluator<CelEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ExpressionEngine> Evaluator<E> {
    pub(crate) fn from_parts(engine: E, environment: Environment, config: EvaluatorConfig) -> Self {
        let cache = config
            .cache_programs
            .then(|| ProgramCache::new(config.cache_capacity));
        Self {
            engine,
            environment,
            config,
            cache,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Number of programs currently cached (always 0 with caching off)
    pub fn cached_programs(&self) -> usize {
        self.cache.as_ref().map_or(0, ProgramCache::len)
    }

    /// Drop every cached program
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Decode `email_json` and evaluate `expression` against it
    ///
    /// # Errors
    /// - `Parse` if the JSON is malformed or not an email record
    /// - `Environment` if the bindings do not fit the environment
    /// - `Compile` if the expression does not compile or references an undeclared identifier
    /// - `Eval` if execution fails
    /// - `TypeMismatch` if the result is not a boolean
    pub fn evaluate(&self, email_json: &str, expression: &str) -> Result<bool> {
        let result = Email::from_json(email_json)
            .map_err(EvaluateError::from)
            .and_then(|email| self.evaluate_bindings(&Self::bind(&email), expression));
        self.trace_outcome(expression, &result);
        result
    }

    /// Evaluate `expression` against an already-decoded email
    pub fn evaluate_email(&self, email: &Email, expression: &str) -> Result<bool> {
        let result = self.evaluate_bindings(&Self::bind(email), expression);
        self.trace_outcome(expression, &result);
        result
    }

    /// Compile `expression` without evaluating it
    pub fn check(&self, expression: &str) -> Result<()> {
        let result = self.program(expression).map(|_| ());
        if let Err(e) = &result {
            if self.config.log_failures {
                tracing::warn!(kind = %e.kind(), error = %e, "expression check failed");
            }
        }
        result
    }

    /// Evaluate each rule, in order, against one email
    ///
    /// The email is decoded and projected once. A decode failure fails the
    /// whole call; any other failure is confined to its rule's outcome.
    pub fn match_rules(&self, email_json: &str, rules: &[Rule]) -> Result<Vec<RuleMatch>> {
        let email = match Email::from_json(email_json) {
            Ok(email) => email,
            Err(e) => {
                let err = EvaluateError::from(e);
                if self.config.log_failures {
                    tracing::warn!(kind = %err.kind(), error = %err, "email record rejected");
                }
                return Err(err);
            }
        };
        let bindings = Self::bind(&email);

        let matches = rules
            .iter()
            .map(|rule| {
                let outcome = self.evaluate_bindings(&bindings, &rule.expression);
                self.trace_rule(rule, &outcome);
                RuleMatch {
                    id: rule.id.clone(),
                    outcome,
                }
            })
            .collect();
        Ok(matches)
    }

    fn bind(email: &Email) -> Bindings {
        let mut bindings = Bindings::with_capacity(1);
        bindings.insert(
            EMAIL_VARIABLE.to_string(),
            EvaluationContext::project(email).into_value(),
        );
        bindings
    }

    fn evaluate_bindings(&self, bindings: &Bindings, expression: &str) -> Result<bool> {
        let program = self.program(expression)?;
        let value = self.engine.evaluate(&program, bindings)?;
        value.as_bool().ok_or(EvaluateError::TypeMismatch {
            found: value.type_name(),
        })
    }

    fn program(&self, expression: &str) -> Result<Arc<E::Program>> {
        let compile = || {
            self.engine
                .compile(expression, &self.environment)
                .map_err(EvaluateError::from)
        };
        match &self.cache {
            Some(cache) => cache.get_or_compile(expression, compile),
            None => compile().map(Arc::new),
        }
    }

    fn trace_outcome(&self, expression: &str, result: &Result<bool>) {
        match result {
            Ok(matched) => {
                tracing::debug!(engine = self.engine.name(), expression = %expression, matched, "expression evaluated");
            }
            Err(e) if self.config.log_failures => {
                tracing::warn!(
                    engine = self.engine.name(),
                    expression = %expression,
                    kind = %e.kind(),
                    error = %e,
                    "expression evaluation failed"
                );
            }
            Err(_) => {}
        }
    }

    fn trace_rule(&self, rule: &Rule, result: &Result<bool>) {
        match result {
            Ok(matched) => tracing::debug!(rule = %rule.id, matched, "rule evaluated"),
            Err(e) if self.config.log_failures => {
                tracing::warn!(rule = %rule.id, kind = %e.kind(), error = %e, "rule evaluation failed");
            }
            Err(_) => {}
        }
    }
}

/// Evaluate one predicate with a freshly built default evaluator
pub fn evaluate(email_json: &str, expression: &str) -> Result<bool> {
    Evaluator::new().evaluate(email_json, expression)
}
