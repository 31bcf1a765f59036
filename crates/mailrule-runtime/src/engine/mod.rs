//! Expression engine abstraction
//!
//! - `ExpressionEngine`: compile / evaluate seam the evaluator depends on
//! - `cel`: the CEL implementation

mod cel;
mod references;

pub use cel::{CelEngine, CelProgram};

use crate::error::Result;
use mailrule_core::{Environment, Value};
use std::collections::HashMap;

/// Values bound to declared variables for one evaluation
pub type Bindings = HashMap<String, Value>;

/// An embeddable predicate language
///
/// Implementations must be usable from several threads at once; a compiled
/// program is immutable and may be shared between evaluations.
pub trait ExpressionEngine: Send + Sync {
    /// Compiled form of one expression
    type Program: Send + Sync;

    /// Short engine name for diagnostics
    fn name(&self) -> &'static str;

    /// Compile `expression` against the variables declared in `env`
    fn compile(&self, expression: &str, env: &Environment) -> Result<Self::Program>;

    /// Execute a compiled program with `bindings`
    fn evaluate(&self, program: &Self::Program, bindings: &Bindings) -> Result<Value>;
}
