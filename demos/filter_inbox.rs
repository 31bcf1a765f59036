//! Inbox filter example
//!
//! This example demonstrates:
//! - Evaluating one predicate against a few emails
//! - Telling the failure kinds apart
//!
//! Run with `RUST_LOG=debug` to see the evaluator's own logging.

use mailrule_sdk::{Attachment, Email, Evaluator};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Inbox Filter Example ===\n");

    let evaluator = Evaluator::builder().cache_programs(true).build()?;
    let filter = r#"email.sender.endsWith("@vendor.com") && email.attachments.exists(a, a.filetype == "pdf")"#;
    println!("Filter: {filter}\n");

    let inbox = vec![
        Email::builder()
            .sender("billing@vendor.com")
            .subject("Invoice 2024-03")
            .attachment(Attachment::new("pdf", "invoice.pdf", "JVBERi0x"))
            .build(),
        Email::builder()
            .sender("billing@vendor.com")
            .subject("Reminder")
            .build(),
        Email::builder()
            .sender("friend@example.com")
            .attachment(Attachment::new("pdf", "photos.pdf", "JVBERi0x"))
            .build(),
    ];

    for email in &inbox {
        let json = serde_json::to_string(email)?;
        let matched = evaluator.evaluate(&json, filter)?;
        println!("  {:<22} {:<18} -> {}", email.sender, email.subject, matched);
    }

    println!("\nFailures:");
    for (email, expression) in [
        ("not json", filter),
        ("{}", "email.sender"),
        ("{}", "sender == \"x\""),
        ("{}", "email.sender > 3"),
    ] {
        match evaluator.evaluate(email, expression) {
            Ok(matched) => println!("  unexpected success: {matched}"),
            Err(e) => println!("  [{}] {}", e.kind(), e),
        }
    }

    println!("\nCached programs: {}", evaluator.cached_programs());
    Ok(())
}
