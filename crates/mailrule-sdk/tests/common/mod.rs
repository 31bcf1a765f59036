//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use mailrule_sdk::{ErrorKind, EvaluateError};
use serde_json::json;

/// Assertions over an evaluation outcome
pub trait OutcomeAssertions {
    fn assert_matched(&self);
    fn assert_not_matched(&self);
    fn assert_kind(&self, kind: ErrorKind);
}

impl OutcomeAssertions for Result<bool, EvaluateError> {
    fn assert_matched(&self) {
        match self {
            Ok(true) => {}
            other => panic!("expected match, got {other:?}"),
        }
    }

    fn assert_not_matched(&self) {
        match self {
            Ok(false) => {}
            other => panic!("expected no match, got {other:?}"),
        }
    }

    fn assert_kind(&self, kind: ErrorKind) {
        match self {
            Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
            Ok(b) => panic!("expected {kind} error, got Ok({b})"),
        }
    }
}

/// Plain description of an email used to compute expected results directly
#[derive(Debug, Clone)]
pub struct Fixture {
    pub sender: &'static str,
    pub subject: &'static str,
    pub cc: Vec<&'static str>,
    pub attachments: Vec<(&'static str, &'static str)>,
}

impl Fixture {
    pub fn to_json(&self) -> String {
        let attachments: Vec<_> = self
            .attachments
            .iter()
            .map(|(filetype, filename)| {
                json!({"filetype": filetype, "filename": filename, "file_bytes": ""})
            })
            .collect();
        json!({
            "sender": self.sender,
            "subject": self.subject,
            "cc": self.cc,
            "attachments": attachments,
        })
        .to_string()
    }
}

/// A deterministic spread of emails covering the predicate corner cases
pub fn fixtures() -> Vec<Fixture> {
    let senders = ["alice@corp.com", "mallory@evil.net", ""];
    let subjects = ["Invoice 42", "hello", "URGENT: invoice"];
    let ccs: [Vec<&'static str>; 3] = [vec![], vec!["boss@corp.com"], vec!["x@x.com", "y@y.com"]];
    let attachment_sets: [Vec<(&'static str, &'static str)>; 3] = [
        vec![],
        vec![("pdf", "invoice.pdf")],
        vec![("txt", "readme.txt"), ("exe", "setup.exe")],
    ];

    let mut out = Vec::new();
    for sender in senders {
        for subject in subjects {
            for cc in &ccs {
                for attachments in &attachment_sets {
                    out.push(Fixture {
                        sender,
                        subject,
                        cc: cc.clone(),
                        attachments: attachments.clone(),
                    });
                }
            }
        }
    }
    out
}
