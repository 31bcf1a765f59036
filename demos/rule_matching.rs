//! Rule matching example
//!
//! Evaluates a small rule set against one email and prints which rules fire.

use mailrule_sdk::{Evaluator, Rule};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Rule Matching Example ===\n");

    let rules: Vec<Rule> = serde_json::from_str(
        r#"[
            {"id": "from_boss", "expression": "email.sender == \"boss@corp.com\""},
            {"id": "urgent", "expression": "email.subject.startsWith(\"URGENT\")"},
            {"id": "copied_team", "expression": "\"team@corp.com\" in email.cc"},
            {"id": "typo", "expression": "email.subjct == \"x\""}
        ]"#,
    )?;

    let email = r#"{
        "sender": "boss@corp.com",
        "receiver": "me@corp.com",
        "subject": "URGENT: numbers for tomorrow",
        "cc": ["team@corp.com"],
        "body": "Need them by 9am."
    }"#;

    let evaluator = Evaluator::new();
    for m in evaluator.match_rules(email, &rules)? {
        match &m.outcome {
            Ok(matched) => println!("  {:<12} matched={}", m.id, matched),
            Err(e) => println!("  {:<12} error[{}]: {}", m.id, e.kind(), e),
        }
    }

    Ok(())
}
