//! SDK error types

use mailrule_core::CoreError;
use mailrule_runtime::RuntimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure of one evaluation call
///
/// Every variant is terminal: the evaluator never retries and never reports
/// a failure as "no match".
#[derive(Error, Debug)]
pub enum EvaluateError {
    /// Email JSON was malformed or did not decode into the record shape
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Expression environment or evaluator configuration could not be set up
    #[error("Environment error: {0}")]
    Environment(String),

    /// Expression failed to compile or referenced an undeclared identifier
    #[error("Compile error: {0}")]
    Compile(String),

    /// Expression compiled but failed while executing
    #[error("Evaluation error: {0}")]
    Eval(String),

    /// Expression evaluated to something other than a boolean
    #[error("Type mismatch: expression did not return a boolean (got {found})")]
    TypeMismatch { found: &'static str },
}

/// Stage an evaluation failed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Parse,
    Environment,
    Compile,
    Eval,
    TypeMismatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Environment => "environment",
            ErrorKind::Compile => "compile",
            ErrorKind::Eval => "eval",
            ErrorKind::TypeMismatch => "type_mismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EvaluateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluateError::Parse(_) => ErrorKind::Parse,
            EvaluateError::Environment(_) => ErrorKind::Environment,
            EvaluateError::Compile(_) => ErrorKind::Compile,
            EvaluateError::Eval(_) => ErrorKind::Eval,
            EvaluateError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }
}

impl From<CoreError> for EvaluateError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode(e) => EvaluateError::Parse(e),
            CoreError::Environment(msg) => EvaluateError::Environment(msg),
        }
    }
}

impl From<RuntimeError> for EvaluateError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Compile(msg) => EvaluateError::Compile(msg),
            e @ RuntimeError::UndeclaredReference(_) => EvaluateError::Compile(e.to_string()),
            e @ RuntimeError::Binding(_) => EvaluateError::Environment(e.to_string()),
            RuntimeError::Execution(msg) => EvaluateError::Eval(msg),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, EvaluateError>;
