//! FFI utility functions

use crate::types::{ErrorBody, EvaluationResponse};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Prefix of every failure returned by the legacy string entry point
pub const ERROR_PREFIX: &str = "Error evaluating CEL expression: ";

/// Helper to convert Rust string to C string
///
/// Interior NUL bytes cannot cross the boundary, so they are replaced.
pub fn to_c_string(s: &str) -> *mut c_char {
    let sanitized;
    let s = if s.contains('\0') {
        sanitized = s.replace('\0', "\u{FFFD}");
        sanitized.as_str()
    } else {
        s
    };
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Helper to borrow a C string argument as UTF-8
///
/// # Safety
/// - `s` must be null or a valid null-terminated C string that outlives the returned borrow
pub unsafe fn c_str_arg<'a>(s: *const c_char, name: &str) -> Result<&'a str, String> {
    if s.is_null() {
        return Err(format!("{name} is null"));
    }
    CStr::from_ptr(s)
        .to_str()
        .map_err(|e| format!("{name} is not valid UTF-8: {e}"))
}

/// Serialize a response and hand it across the boundary
pub fn response_to_c_string(response: &EvaluationResponse) -> *mut c_char {
    match serde_json::to_string(response) {
        Ok(json) => to_c_string(&json),
        Err(e) => {
            log::error!("failed to serialize response: {}", e);
            std::ptr::null_mut()
        }
    }
}

pub fn invalid_argument(message: String) -> *mut c_char {
    log::warn!("rejected call: {}", message);
    response_to_c_string(&EvaluationResponse::failed(ErrorBody::invalid_argument(message)))
}

/// Legacy encoding: `"true"`, `"false"` or the error prefix plus diagnostic
pub fn legacy_result(result: Result<bool, String>) -> String {
    match result {
        Ok(true) => "true".to_string(),
        Ok(false) => "false".to_string(),
        Err(message) => format!("{ERROR_PREFIX}{message}"),
    }
}
