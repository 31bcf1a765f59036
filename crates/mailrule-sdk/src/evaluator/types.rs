//! Rule input and per-rule outcome types

use crate::error::EvaluateError;
use serde::{Deserialize, Serialize};

/// A named predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub expression: String,
}

impl Rule {
    pub fn new(id: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            expression: expression.into(),
        }
    }
}

/// Outcome of one rule against one email
#[derive(Debug)]
pub struct RuleMatch {
    pub id: String,
    pub outcome: Result<bool, EvaluateError>,
}

impl RuleMatch {
    /// True only when the predicate evaluated to `true`
    pub fn matched(&self) -> bool {
        matches!(self.outcome, Ok(true))
    }

    pub fn error(&self) -> Option<&EvaluateError> {
        self.outcome.as_ref().err()
    }
}
