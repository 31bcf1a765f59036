//! Evaluator - Main API for matching rule predicates against emails
//!
//! The module is organized into:
//! - `types`: Rule and RuleMatch
//! - `engine`: Core Evaluator implementation
//! - `cache`: Optional compiled-program cache
//! - `tests`: Unit tests (test-only)

mod cache;
mod engine;
mod types;

pub use engine::{evaluate, Evaluator};
pub use types::{Rule, RuleMatch};

#[cfg(test)]
mod tests;
