//! mailrule Runtime - Expression engines for mailrule predicates
//!
//! The evaluator treats the expression language as a pluggable capability:
//! anything implementing `ExpressionEngine` can compile a predicate against an
//! `Environment` and execute it with bound values. `CelEngine` is the
//! implementation backed by `cel-interpreter`.

pub mod engine;
pub mod error;

// Re-export main types
pub use engine::{Bindings, CelEngine, CelProgram, ExpressionEngine};
pub use error::{Result, RuntimeError};
