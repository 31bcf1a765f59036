//! mailrule FFI
//!
//! C-compatible bindings for evaluating rule predicates from a host process.
//! Only strings cross the boundary. Every string this library returns is
//! owned by the caller and must be released with `mailrule_string_free`;
//! engines must be released with `mailrule_engine_free`.

use std::os::raw::c_char;
use std::ptr;

use mailrule_sdk::{Evaluator, EvaluatorConfig, Rule};

mod types;
mod utils;

pub use types::*;
pub use utils::*;

/// Initialize the logging system
///
/// Uses `RUST_LOG` for filtering. Calling it more than once is harmless.
#[no_mangle]
pub extern "C" fn mailrule_init_logging() {
    let _ = env_logger::try_init();
}

/// Evaluate a predicate against an email record (legacy string contract)
///
/// Returns `"true"`, `"false"`, or a string starting with
/// `"Error evaluating CEL expression: "` followed by the diagnostic. Callers
/// detect failure by that prefix. Null is returned only if the result could
/// not be allocated.
///
/// # Safety
/// - email_json and expression must be null or valid null-terminated C strings
/// - The returned string must be freed with mailrule_string_free
#[no_mangle]
pub unsafe extern "C" fn mailrule_evaluate(
    email_json: *const c_char,
    expression: *const c_char,
) -> *mut c_char {
    let result = c_str_arg(email_json, "email_json")
        .and_then(|email| Ok((email, c_str_arg(expression, "expression")?)))
        .and_then(|(email, expr)| {
            mailrule_sdk::evaluate(email, expr).map_err(|e| e.to_string())
        });

    if let Err(message) = &result {
        log::debug!("legacy evaluation failed: {}", message);
    }
    to_c_string(&legacy_result(result))
}

/// Evaluate a predicate against an email record (tagged JSON result)
///
/// Returns `{"success":true,"matched":<bool>}` or
/// `{"success":false,"error":{"kind":"…","message":"…"}}`.
///
/// # Safety
/// - email_json and expression must be null or valid null-terminated C strings
/// - The returned string must be freed with mailrule_string_free
#[no_mangle]
pub unsafe extern "C" fn mailrule_evaluate_json(
    email_json: *const c_char,
    expression: *const c_char,
) -> *mut c_char {
    let email = match c_str_arg(email_json, "email_json") {
        Ok(s) => s,
        Err(message) => return invalid_argument(message),
    };
    let expr = match c_str_arg(expression, "expression") {
        Ok(s) => s,
        Err(message) => return invalid_argument(message),
    };

    let response = EvaluationResponse::from(mailrule_sdk::evaluate(email, expr));
    response_to_c_string(&response)
}

/// Create a new engine
///
/// `config_json` may be null for the default configuration, or a JSON object
/// such as `{"cache_programs": true, "cache_capacity": 512}`.
///
/// # Safety
/// - config_json must be null or a valid null-terminated C string
/// - The returned pointer must be freed with mailrule_engine_free
#[no_mangle]
pub unsafe extern "C" fn mailrule_engine_new(config_json: *const c_char) -> *mut MailruleEngine {
    let config = if config_json.is_null() {
        EvaluatorConfig::default()
    } else {
        let json = match c_str_arg(config_json, "config_json") {
            Ok(s) => s,
            Err(message) => {
                log::warn!("{}", message);
                return ptr::null_mut();
            }
        };
        match EvaluatorConfig::from_json(json) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}", e);
                return ptr::null_mut();
            }
        }
    };

    let evaluator = match Evaluator::builder().with_config(config).build() {
        Ok(e) => e,
        Err(e) => {
            log::warn!("{}", e);
            return ptr::null_mut();
        }
    };

    Box::into_raw(Box::new(MailruleEngine { evaluator }))
}

/// Evaluate a predicate using an engine (tagged JSON result)
///
/// # Safety
/// - engine must be a valid pointer created by mailrule_engine_new
/// - email_json and expression must be null or valid null-terminated C strings
/// - The returned string must be freed with mailrule_string_free
#[no_mangle]
pub unsafe extern "C" fn mailrule_engine_evaluate(
    engine: *const MailruleEngine,
    email_json: *const c_char,
    expression: *const c_char,
) -> *mut c_char {
    if engine.is_null() {
        return invalid_argument("engine is null".to_string());
    }
    let engine_ref = &*engine;

    let email = match c_str_arg(email_json, "email_json") {
        Ok(s) => s,
        Err(message) => return invalid_argument(message),
    };
    let expr = match c_str_arg(expression, "expression") {
        Ok(s) => s,
        Err(message) => return invalid_argument(message),
    };

    let response = EvaluationResponse::from(engine_ref.evaluator.evaluate(email, expr));
    response_to_c_string(&response)
}

/// Match a list of rules against one email using an engine
///
/// `rules_json` is an array of `{"id": "…", "expression": "…"}`. On success
/// the result is `{"success":true,"rules":[…]}` with one entry per rule, in
/// order, each carrying either `matched` or its own `error`.
///
/// # Safety
/// - engine must be a valid pointer created by mailrule_engine_new
/// - email_json and rules_json must be null or valid null-terminated C strings
/// - The returned string must be freed with mailrule_string_free
#[no_mangle]
pub unsafe extern "C" fn mailrule_engine_match(
    engine: *const MailruleEngine,
    email_json: *const c_char,
    rules_json: *const c_char,
) -> *mut c_char {
    if engine.is_null() {
        return invalid_argument("engine is null".to_string());
    }
    let engine_ref = &*engine;

    let email = match c_str_arg(email_json, "email_json") {
        Ok(s) => s,
        Err(message) => return invalid_argument(message),
    };
    let rules_str = match c_str_arg(rules_json, "rules_json") {
        Ok(s) => s,
        Err(message) => return invalid_argument(message),
    };
    let rules: Vec<Rule> = match serde_json::from_str(rules_str) {
        Ok(r) => r,
        Err(e) => return invalid_argument(format!("rules_json is invalid: {e}")),
    };

    let response = match engine_ref.evaluator.match_rules(email, &rules) {
        Ok(matches) => EvaluationResponse::rules(matches),
        Err(e) => EvaluationResponse::failed(ErrorBody::from(&e)),
    };
    response_to_c_string(&response)
}

/// Free an engine
///
/// # Safety
/// - engine must be null or a valid pointer created by mailrule_engine_new
/// - After calling this function, the pointer is invalid and must not be used
#[no_mangle]
pub unsafe extern "C" fn mailrule_engine_free(engine: *mut MailruleEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Free a string returned by the FFI
///
/// Passing null is a no-op. Freeing the same pointer twice is undefined
/// behaviour; avoiding it is the caller's obligation.
///
/// # Safety
/// - s must be null or a pointer returned by a mailrule_* function
/// - After calling this function, the pointer is invalid and must not be used
#[no_mangle]
pub unsafe extern "C" fn mailrule_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(std::ffi::CString::from_raw(s));
    }
}

/// Get the version of the mailrule library
///
/// # Safety
/// - The returned string must be freed with mailrule_string_free
#[no_mangle]
pub extern "C" fn mailrule_version() -> *mut c_char {
    to_c_string(env!("CARGO_PKG_VERSION"))
}
