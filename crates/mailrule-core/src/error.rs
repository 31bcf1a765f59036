//! Error types for mailrule Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// The email JSON was malformed or did not match the record shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An environment declaration was rejected
    #[error("Environment error: {0}")]
    Environment(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(err.to_string().starts_with("Decode error:"));
    }

    #[test]
    fn test_environment_error_display() {
        let err = CoreError::Environment("no variables declared".to_string());
        assert_eq!(err.to_string(), "Environment error: no variables declared");
    }
}
