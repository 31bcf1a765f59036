//! mailrule Core - Core types for the mailrule predicate evaluator
//!
//! This crate provides the fundamental types shared by the other mailrule crates:
//! - The `Email` / `Attachment` record decoded from JSON
//! - `Value`, the engine-independent dynamic value
//! - `EvaluationContext`, the projection of an email into a string-keyed map
//! - `Environment`, the variable declarations a predicate is compiled against
//! - Error types

pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use context::{fields, EvaluationContext};
pub use error::{CoreError, Result};
pub use types::{Attachment, Email, Environment, EnvironmentBuilder, Value, VarType, VariableDecl};
