//! Unit tests for Evaluator

use super::*;
use crate::error::{ErrorKind, EvaluateError};
use mailrule_core::{Environment, Value};
use mailrule_runtime::{Bindings, ExpressionEngine, RuntimeError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Engine that returns a fixed value and counts compilations
struct FixedEngine {
    result: Value,
    compiles: Arc<AtomicUsize>,
}

impl ExpressionEngine for FixedEngine {
    type Program = String;

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn compile(&self, expression: &str, _env: &Environment) -> mailrule_runtime::Result<String> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        if expression.is_empty() {
            return Err(RuntimeError::Compile("empty expression".to_string()));
        }
        Ok(expression.to_string())
    }

    fn evaluate(&self, _program: &String, bindings: &Bindings) -> mailrule_runtime::Result<Value> {
        if !bindings.contains_key("email") {
            return Err(RuntimeError::Binding("email not bound".to_string()));
        }
        Ok(self.result.clone())
    }
}

fn fixed(result: Value) -> (Evaluator<FixedEngine>, Arc<AtomicUsize>) {
    let compiles = Arc::new(AtomicUsize::new(0));
    let engine = FixedEngine {
        result,
        compiles: Arc::clone(&compiles),
    };
    let evaluator = crate::EvaluatorBuilder::new()
        .with_engine(engine)
        .cache_programs(true)
        .build()
        .unwrap();
    (evaluator, compiles)
}

#[test]
fn test_evaluate_sender_match() {
    let evaluator = Evaluator::new();
    let matched = evaluator
        .evaluate(r#"{"sender":"a@x.com"}"#, r#"email.sender == "a@x.com""#)
        .unwrap();
    assert!(matched);
}

#[test]
fn test_free_function() {
    assert!(!evaluate(r#"{"sender":"a@x.com"}"#, r#"email.sender == "b@x.com""#).unwrap());
}

#[test]
fn test_evaluate_email_directly() {
    let email = mailrule_core::Email::builder().subject("Weekly report").build();
    let evaluator = Evaluator::new();
    assert!(evaluator
        .evaluate_email(&email, r#"email.subject.startsWith("Weekly")"#)
        .unwrap());
}

#[test]
fn test_check() {
    let evaluator = Evaluator::new();
    assert!(evaluator.check(r#"email.sender == "a@x.com""#).is_ok());

    let err = evaluator.check("email.sender ==").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Compile);

    let err = evaluator.check("sender == \"a\"").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Compile);
}

#[test]
fn test_pluggable_engine_bool() {
    let (evaluator, _) = fixed(Value::Bool(true));
    assert!(evaluator.evaluate("{}", "anything").unwrap());
}

#[test]
fn test_pluggable_engine_non_bool_is_type_mismatch() {
    let (evaluator, _) = fixed(Value::Int(1));
    let err = evaluator.evaluate("{}", "anything").unwrap_err();
    assert!(matches!(err, EvaluateError::TypeMismatch { found: "int" }));
}

#[test]
fn test_parse_error_precedes_compile() {
    let (evaluator, compiles) = fixed(Value::Bool(true));
    let err = evaluator.evaluate("not json", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(compiles.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cache_reuses_programs() {
    let (evaluator, compiles) = fixed(Value::Bool(false));
    for _ in 0..5 {
        assert!(!evaluator.evaluate("{}", "same expression").unwrap());
    }
    assert_eq!(compiles.load(Ordering::SeqCst), 1);
    assert_eq!(evaluator.cached_programs(), 1);

    evaluator.clear_cache();
    assert_eq!(evaluator.cached_programs(), 0);
    assert!(!evaluator.evaluate("{}", "same expression").unwrap());
    assert_eq!(compiles.load(Ordering::SeqCst), 2);
}

#[test]
fn test_compile_errors_not_cached() {
    let (evaluator, compiles) = fixed(Value::Bool(true));
    for _ in 0..3 {
        let err = evaluator.evaluate("{}", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Compile);
    }
    assert_eq!(compiles.load(Ordering::SeqCst), 3);
    assert_eq!(evaluator.cached_programs(), 0);
}

#[test]
fn test_no_cache_by_default() {
    let evaluator = Evaluator::new();
    evaluator.evaluate("{}", "email.sender == \"\"").unwrap();
    assert_eq!(evaluator.cached_programs(), 0);
}

#[test]
fn test_match_rules_isolates_failures() {
    let evaluator = Evaluator::new();
    let rules = vec![
        Rule::new("from_alice", r#"email.sender == "alice@x.com""#),
        Rule::new("broken", "email.sender =="),
        Rule::new("not_bool", "email.subject"),
        Rule::new("has_cc", "size(email.cc) > 0"),
    ];

    let matches = evaluator
        .match_rules(r#"{"sender": "alice@x.com", "subject": "hi"}"#, &rules)
        .unwrap();

    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0].id, "from_alice");
    assert!(matches[0].matched());
    assert_eq!(matches[1].error().map(|e| e.kind()), Some(ErrorKind::Compile));
    assert_eq!(matches[2].error().map(|e| e.kind()), Some(ErrorKind::TypeMismatch));
    assert!(!matches[3].matched());
    assert!(matches[3].error().is_none());
}

#[test]
fn test_match_rules_parse_error_is_terminal() {
    let evaluator = Evaluator::new();
    let rules = vec![Rule::new("any", "true")];
    let err = evaluator.match_rules("[1, 2]", &rules).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}
