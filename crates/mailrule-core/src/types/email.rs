//! Email record model
//!
//! The record a predicate is evaluated against. Every field is optional in the
//! JSON source: absent keys and explicit `null`s both decode to the empty value.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// One message under evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    /// Sender address, not validated
    #[serde(deserialize_with = "null_as_default")]
    pub sender: String,

    #[serde(deserialize_with = "null_as_default")]
    pub receiver: String,

    /// Raw, unparsed header block
    #[serde(deserialize_with = "null_as_default")]
    pub header: String,

    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,

    #[serde(deserialize_with = "null_as_default")]
    pub body: String,

    #[serde(deserialize_with = "null_as_default")]
    pub cc: Vec<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub bcc: Vec<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
}

/// One file attached to an email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(deserialize_with = "null_as_default")]
    pub filetype: String,

    #[serde(deserialize_with = "null_as_default")]
    pub filename: String,

    /// Attachment content as opaque text, exactly as it appeared in the JSON
    /// string. No base64 or other decoding is applied.
    #[serde(deserialize_with = "null_as_default")]
    pub file_bytes: String,
}

impl Email {
    /// Decode an email record from JSON
    ///
    /// The document must be a JSON object; unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        // Decoding through a map first rejects arrays, which serde would
        // otherwise accept as the positional form of the struct.
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Email::deserialize(serde_json::Value::Object(object))?)
    }

    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }
}

impl Attachment {
    pub fn new(
        filetype: impl Into<String>,
        filename: impl Into<String>,
        file_bytes: impl Into<String>,
    ) -> Self {
        Self {
            filetype: filetype.into(),
            filename: filename.into(),
            file_bytes: file_bytes.into(),
        }
    }
}

/// Builder for `Email`, mostly for hosts and tests that construct records in code
#[derive(Debug, Default)]
pub struct EmailBuilder {
    email: Email,
}

impl EmailBuilder {
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.email.sender = sender.into();
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.email.receiver = receiver.into();
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.email.header = header.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.email.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.email.body = body.into();
        self
    }

    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.email.cc.push(address.into());
        self
    }

    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.email.bcc.push(address.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.email.attachments.push(attachment);
        self
    }

    pub fn build(self) -> Email {
        self.email
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
