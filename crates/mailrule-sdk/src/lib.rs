//! mailrule SDK
//!
//! High-level API for evaluating rule predicates against email records.
//!
//! ```rust,ignore
//! use mailrule_sdk::Evaluator;
//!
//! let evaluator = Evaluator::new();
//! let matched = evaluator.evaluate(r#"{"sender":"a@x.com"}"#, r#"email.sender == "a@x.com""#)?;
//! assert!(matched);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod evaluator;

// Re-export main types
pub use builder::EvaluatorBuilder;
pub use config::EvaluatorConfig;
pub use error::{ErrorKind, EvaluateError, Result};
pub use evaluator::{evaluate, Evaluator, Rule, RuleMatch};

// Re-export commonly used types from dependencies
pub use mailrule_core::{Attachment, Email, Environment, EvaluationContext, Value, VarType};
pub use mailrule_runtime::{CelEngine, ExpressionEngine};
