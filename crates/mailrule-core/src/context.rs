//! Evaluation context
//!
//! Projects an `Email` into the string-keyed map a predicate sees as `email`.
//! The projection copies every value; the context holds no reference back to
//! the record it was built from.

use crate::types::{Attachment, Email, Value};
use std::collections::HashMap;

/// Keys of the projected map
pub mod fields {
    pub const SENDER: &str = "sender";
    pub const RECEIVER: &str = "receiver";
    pub const HEADER: &str = "header";
    pub const ATTACHMENTS: &str = "attachments";
    pub const SUBJECT: &str = "subject";
    pub const BCC: &str = "bcc";
    pub const CC: &str = "cc";
    pub const BODY: &str = "body";

    /// Every top-level key, in declaration order
    pub const ALL: [&str; 8] = [SENDER, RECEIVER, HEADER, ATTACHMENTS, SUBJECT, BCC, CC, BODY];

    pub const FILETYPE: &str = "filetype";
    pub const FILE_BYTES: &str = "file_bytes";
    pub const FILENAME: &str = "filename";

    /// Every key of a projected attachment
    pub const ATTACHMENT: [&str; 3] = [FILETYPE, FILE_BYTES, FILENAME];
}

/// Per-call mapping from field name to value
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    fields: HashMap<String, Value>,
}

impl EvaluationContext {
    /// Build the context for one email
    pub fn project(email: &Email) -> Self {
        let mut map = HashMap::with_capacity(fields::ALL.len());
        map.insert(fields::SENDER.to_string(), Value::from(email.sender.clone()));
        map.insert(fields::RECEIVER.to_string(), Value::from(email.receiver.clone()));
        map.insert(fields::HEADER.to_string(), Value::from(email.header.clone()));
        map.insert(
            fields::ATTACHMENTS.to_string(),
            Value::Array(email.attachments.iter().map(project_attachment).collect()),
        );
        map.insert(fields::SUBJECT.to_string(), Value::from(email.subject.clone()));
        map.insert(fields::BCC.to_string(), Value::from(email.bcc.clone()));
        map.insert(fields::CC.to_string(), Value::from(email.cc.clone()));
        map.insert(fields::BODY.to_string(), Value::from(email.body.clone()));

        Self { fields: map }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The context as a single `Value::Object`
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<&Email> for EvaluationContext {
    fn from(email: &Email) -> Self {
        Self::project(email)
    }
}

fn project_attachment(attachment: &Attachment) -> Value {
    let mut map = HashMap::with_capacity(fields::ATTACHMENT.len());
    map.insert(fields::FILETYPE.to_string(), Value::from(attachment.filetype.clone()));
    map.insert(fields::FILE_BYTES.to_string(), Value::from(attachment.file_bytes.clone()));
    map.insert(fields::FILENAME.to_string(), Value::from(attachment.filename.clone()));
    Value::Object(map)
}
