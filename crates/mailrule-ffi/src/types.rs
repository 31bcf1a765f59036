//! FFI type definitions

use mailrule_sdk::{EvaluateError, Evaluator, RuleMatch};
use serde::Serialize;

/// Opaque type representing a configured evaluator
pub struct MailruleEngine {
    pub(crate) evaluator: Evaluator,
}

/// Tagged result returned as JSON by the structured entry points
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EvaluationResponse {
    Matched { success: bool, matched: bool },
    Rules { success: bool, rules: Vec<RuleResponse> },
    Failed { success: bool, error: ErrorBody },
}

impl EvaluationResponse {
    pub fn matched(matched: bool) -> Self {
        Self::Matched {
            success: true,
            matched,
        }
    }

    pub fn rules(matches: Vec<RuleMatch>) -> Self {
        Self::Rules {
            success: true,
            rules: matches.into_iter().map(RuleResponse::from).collect(),
        }
    }

    pub fn failed(error: ErrorBody) -> Self {
        Self::Failed {
            success: false,
            error,
        }
    }
}

impl From<Result<bool, EvaluateError>> for EvaluationResponse {
    fn from(result: Result<bool, EvaluateError>) -> Self {
        match result {
            Ok(matched) => Self::matched(matched),
            Err(e) => Self::failed(ErrorBody::from(&e)),
        }
    }
}

/// Error payload: the failure kind plus the diagnostic
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl ErrorBody {
    /// Failure at the boundary itself, before evaluation started
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: "invalid_argument",
            message: message.into(),
        }
    }
}

impl From<&EvaluateError> for ErrorBody {
    fn from(err: &EvaluateError) -> Self {
        Self {
            kind: err.kind().as_str(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one rule in a `mailrule_engine_match` response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RuleResponse {
    Matched { id: String, matched: bool },
    Failed { id: String, error: ErrorBody },
}

impl From<RuleMatch> for RuleResponse {
    fn from(m: RuleMatch) -> Self {
        match m.outcome {
            Ok(matched) => Self::Matched { id: m.id, matched },
            Err(e) => Self::Failed {
                id: m.id,
                error: ErrorBody::from(&e),
            },
        }
    }
}
