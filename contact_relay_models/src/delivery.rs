use std::fmt;

/// Where and how contact messages are delivered.
///
/// Resolved from the environment on every request, never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    /// Credential for the email provider.
    pub api_key: String,
    /// Mailbox receiving contact messages.
    pub to: String,
    /// Sender shown on delivered messages, e.g. `Name <address@example.com>`.
    pub from: String,
}

impl fmt::Debug for DeliveryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryConfig")
            .field("api_key", &"[redacted]")
            .field("to", &self.to)
            .field("from", &self.from)
            .finish()
    }
}
