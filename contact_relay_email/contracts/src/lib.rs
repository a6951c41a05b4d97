use std::future::Future;

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Hands `email` over to the email provider, authenticating with
    /// `api_key`.
    fn send(
        &self,
        api_key: &str,
        email: Email,
    ) -> impl Future<Output = Result<(), EmailSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Sender, either a bare address or `Name <address>`.
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    /// The provider answered with a non-success status code.
    #[error("Email provider responded with status {status}: {details}")]
    Rejected { status: u16, details: String },
    /// The provider could not be reached or its response could not be read.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmailSendError {
    /// Diagnostic text suitable for passing back to the caller.
    pub fn details(&self) -> String {
        match self {
            Self::Rejected { details, .. } => details.clone(),
            Self::Other(err) => format!("{err:#}"),
        }
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(
        mut self,
        api_key: String,
        email: Email,
        result: Result<(), EmailSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(api_key),
                mockall::predicate::eq(email),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
