//! Unit tests for decoding and projecting email records
//!
//! Covers the path from raw JSON to the `email` map a predicate sees.

use mailrule_core::{fields, Email, EvaluationContext, Value};

fn project(json: &str) -> Value {
    let email = Email::from_json(json).unwrap();
    EvaluationContext::project(&email).into_value()
}

// =============================================================================
// Shape
// =============================================================================

#[test]
fn test_projection_is_an_object_with_eight_keys() {
    let value = project(r#"{"sender": "a@x.com"}"#);
    let map = value.as_object().unwrap();

    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = fields::ALL.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

#[test]
fn test_unknown_json_fields_do_not_leak_into_projection() {
    let value = project(r#"{"sender": "a@x.com", "spam_score": 9.5}"#);
    assert!(value.as_object().unwrap().get("spam_score").is_none());
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn test_cc_and_bcc_order_preserved() {
    let value = project(r#"{"cc": ["z@z.com", "a@a.com"], "bcc": ["m@m.com", "b@b.com", "y@y.com"]}"#);
    let map = value.as_object().unwrap();

    assert_eq!(
        map.get("cc"),
        Some(&Value::from(vec!["z@z.com".to_string(), "a@a.com".to_string()]))
    );
    assert_eq!(
        map.get("bcc"),
        Some(&Value::from(vec![
            "m@m.com".to_string(),
            "b@b.com".to_string(),
            "y@y.com".to_string()
        ]))
    );
}

#[test]
fn test_absent_and_empty_attachments_project_the_same() {
    let absent = project(r#"{}"#);
    let empty = project(r#"{"attachments": []}"#);
    assert_eq!(absent, empty);
    assert_eq!(
        absent.as_object().unwrap().get("attachments"),
        Some(&Value::Array(vec![]))
    );
}

#[test]
fn test_attachments_in_json_order() {
    let value = project(
        r#"{"attachments": [
            {"filename": "3.bin", "filetype": "bin", "file_bytes": "AAA="},
            {"filename": "1.txt", "filetype": "txt", "file_bytes": "plain text"},
            {"filename": "2.csv", "filetype": "csv", "file_bytes": "a,b\n1,2"}
        ]}"#,
    );

    let attachments = value.as_object().unwrap().get("attachments").unwrap();
    let items = attachments.as_array().unwrap();
    let names: Vec<&str> = items
        .iter()
        .map(|a| a.as_object().unwrap()["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["3.bin", "1.txt", "2.csv"]);

    let bytes = items[2].as_object().unwrap()["file_bytes"].as_str().unwrap();
    assert_eq!(bytes, "a,b\n1,2");
}

// =============================================================================
// Escapes
// =============================================================================

#[test]
fn test_json_escapes_decoded_once() {
    let value = project(r#"{"subject": "café \"quoted\" \\ done"}"#);
    assert_eq!(
        value.as_object().unwrap()["subject"].as_str(),
        Some("café \"quoted\" \\ done")
    );
}
