use nutype::nutype;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A contact form submission as received on the wire, with every field
/// coerced to a string and trimmed.
///
/// Missing fields and `null` become empty strings; they are only rejected
/// later by [`ContactFormSubmission::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormSubmission {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub message: String,
    /// Honeypot field. Real users never see it, so bots are the only ones
    /// filling it in.
    pub bot_field: String,
}

#[derive(Debug, Error)]
#[error("Failed to parse contact form body: {0}")]
pub struct ContactFormParseError(#[from] serde_json::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Missing required contact fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

impl ContactFormSubmission {
    /// Parses a JSON object body.
    ///
    /// Anything other than a JSON object (including `null`, arrays and
    /// scalars) is rejected.
    pub fn parse(body: &[u8]) -> Result<Self, ContactFormParseError> {
        let mut fields = serde_json::from_slice::<Map<String, Value>>(body)?;
        let mut take = |key: &str| normalize(fields.remove(key));

        Ok(Self {
            name: take("name"),
            email: take("email"),
            organization: take("organization"),
            message: take("message"),
            bot_field: take("botField"),
        })
    }

    /// Whether the honeypot field has been filled in.
    pub fn is_spam(&self) -> bool {
        !self.bot_field.is_empty()
    }

    /// Checks that all required fields are present and that the email
    /// address has a plausible shape.
    pub fn validate(self) -> Result<ContactMessage, ContactValidationError> {
        let (Ok(name), Ok(organization), Ok(message)) = (
            ContactMessageAuthorName::try_new(self.name),
            ContactMessageOrganization::try_new(self.organization),
            ContactMessageContent::try_new(self.message),
        ) else {
            return Err(ContactValidationError::MissingFields);
        };

        if self.email.is_empty() {
            return Err(ContactValidationError::MissingFields);
        }

        let email = self
            .email
            .parse()
            .map_err(|_| ContactValidationError::InvalidEmail)?;

        Ok(ContactMessage {
            author: ContactMessageAuthor { name, email },
            organization,
            content: message,
        })
    }
}

fn normalize(value: Option<Value>) -> String {
    value.as_ref().map(coerce).unwrap_or_default().trim().to_owned()
}

/// String form of a JSON value as a browser form script would produce it:
/// arrays are joined with `,` and objects collapse to `[object Object]`.
fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".into(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub organization: ContactMessageOrganization,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageOrganization(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageContent(String);
