//! Integration tests for the CEL engine over projected emails

use mailrule_core::{Email, Environment, EvaluationContext, Value};
use mailrule_runtime::{Bindings, CelEngine, ExpressionEngine, RuntimeError};

fn bindings_for(json: &str) -> Bindings {
    let email = Email::from_json(json).unwrap();
    let mut bindings = Bindings::new();
    bindings.insert(
        "email".to_string(),
        EvaluationContext::project(&email).into_value(),
    );
    bindings
}

fn eval(json: &str, expression: &str) -> Result<Value, RuntimeError> {
    let engine = CelEngine::new();
    let program = engine.compile(expression, &Environment::email())?;
    engine.evaluate(&program, &bindings_for(json))
}

// ============================================================================
// Field access
// ============================================================================

#[test]
fn test_every_field_reachable() {
    let json = r#"{
        "sender": "s", "receiver": "r", "header": "h", "subject": "t", "body": "b",
        "cc": ["c"], "bcc": ["d"], "attachments": [{"filename": "f"}]
    }"#;

    for expression in [
        r#"email.sender == "s""#,
        r#"email.receiver == "r""#,
        r#"email.header == "h""#,
        r#"email.subject == "t""#,
        r#"email.body == "b""#,
        r#"email.cc == ["c"]"#,
        r#"email.bcc == ["d"]"#,
        r#"email.attachments[0].filename == "f""#,
    ] {
        assert_eq!(eval(json, expression), Ok(Value::Bool(true)), "{expression}");
    }
}

#[test]
fn test_absent_fields_are_empty() {
    assert_eq!(eval("{}", r#"email.sender == """#), Ok(Value::Bool(true)));
    assert_eq!(eval("{}", "size(email.attachments) == 0"), Ok(Value::Bool(true)));
    assert_eq!(eval("{}", "size(email.cc) == 0"), Ok(Value::Bool(true)));
}

// ============================================================================
// Attachments
// ============================================================================

#[test]
fn test_attachment_predicates() {
    let json = r#"{"attachments": [
        {"filetype": "pdf", "filename": "invoice.pdf", "file_bytes": "JVBERi0x"},
        {"filetype": "exe", "filename": "setup.exe", "file_bytes": "TVqQ"}
    ]}"#;

    assert_eq!(
        eval(json, r#"email.attachments.exists(a, a.filetype == "exe")"#),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        eval(json, r#"email.attachments.all(a, a.filename.endsWith(".pdf"))"#),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        eval(json, r#"email.attachments[1].filename"#),
        Ok(Value::from("setup.exe"))
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_comparing_incompatible_types_fails_at_runtime() {
    let err = eval(r#"{"sender": "a@x.com"}"#, "email.sender > 5").unwrap_err();
    assert!(matches!(err, RuntimeError::Execution(_)), "{err:?}");
}

#[test]
fn test_index_out_of_range_fails_at_runtime() {
    let err = eval("{}", "email.attachments[0].filename == \"\"").unwrap_err();
    assert!(matches!(err, RuntimeError::Execution(_)), "{err:?}");
}

#[test]
fn test_unknown_function_is_undeclared_reference() {
    let err = eval("{}", "is_spam(email.body)").unwrap_err();
    assert!(matches!(err, RuntimeError::UndeclaredReference(_)), "{err:?}");
}
