//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Expression failed to parse or type-check
    #[error("Compile error: {0}")]
    Compile(String),

    /// Expression referenced an identifier the environment does not declare
    #[error("Undeclared reference to '{0}'")]
    UndeclaredReference(String),

    /// Bindings do not satisfy the environment declarations
    #[error("Binding error: {0}")]
    Binding(String),

    /// Compiled expression failed while executing
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
