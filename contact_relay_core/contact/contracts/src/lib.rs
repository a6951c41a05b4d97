use std::future::Future;

use contact_relay_email_contracts::EmailSendError;
use contact_relay_models::contact::{ContactFormSubmission, ContactValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates a contact form submission and forwards it to the configured
    /// mailbox.
    ///
    /// Submissions with a filled honeypot field are silently discarded and
    /// reported as successful.
    fn submit(
        &self,
        submission: ContactFormSubmission,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Invalid(#[from] ContactValidationError),
    #[error("Missing environment variables. Configure RESEND_API_KEY and CONTACT_TO_EMAIL.")]
    MissingConfig,
    #[error("Resend request failed")]
    Send(#[source] EmailSendError),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactFormSubmission,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
