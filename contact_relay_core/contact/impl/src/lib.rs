use contact_relay_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use contact_relay_email_contracts::EmailService;
use contact_relay_models::contact::ContactFormSubmission;
use contact_relay_shared_contracts::env::EnvService;
use tracing::{debug, error, info, warn};

pub mod compose;
pub mod delivery;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Env, Email> {
    env: Env,
    email: Email,
}

impl<Env, Email> ContactFeatureServiceImpl<Env, Email> {
    pub fn new(env: Env, email: Email) -> Self {
        Self { env, email }
    }
}

impl<Env, EmailS> ContactFeatureService for ContactFeatureServiceImpl<Env, EmailS>
where
    Env: EnvService,
    EmailS: EmailService,
{
    async fn submit(&self, submission: ContactFormSubmission) -> Result<(), ContactSubmitError> {
        if submission.is_spam() {
            debug!("discarding contact form submission with filled honeypot field");
            return Ok(());
        }

        let message = submission
            .validate()
            .inspect_err(|err| debug!("rejecting contact form submission: {err}"))?;

        let Some(config) = delivery::resolve(&self.env) else {
            error!(
                "delivery is not configured, set {} and {} (or {})",
                delivery::API_KEY_VAR,
                delivery::TO_VAR,
                delivery::TO_FALLBACK_VAR
            );
            return Err(ContactSubmitError::MissingConfig);
        };

        let email = compose::email(&config, &message);

        self.email
            .send(&config.api_key, email)
            .await
            .inspect_err(|err| warn!("Failed to send contact message: {err}"))
            .map_err(ContactSubmitError::Send)?;

        info!(organization = %message.organization.as_str(), "contact message sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use contact_relay_email_contracts::{Email, EmailSendError, MockEmailService};
    use contact_relay_models::contact::ContactValidationError;
    use contact_relay_shared_contracts::env::MockEnvService;
    use contact_relay_utils::assert_matches;

    use super::*;
    use crate::delivery::{API_KEY_VAR, DEFAULT_FROM, FROM_VAR, TO_FALLBACK_VAR, TO_VAR};

    fn submission() -> ContactFormSubmission {
        ContactFormSubmission {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            organization: "ONG X".into(),
            message: "Hola".into(),
            bot_field: "".into(),
        }
    }

    fn env() -> MockEnvService {
        MockEnvService::new()
            .with_vars(&[(API_KEY_VAR, "re_key"), (TO_VAR, "contact@example.com")])
    }

    fn expected_email() -> Email {
        Email {
            from: DEFAULT_FROM.into(),
            to: vec!["contact@example.com".into()],
            reply_to: Some("ana@x.com".into()),
            subject: "Nuevo contacto de ONG X".into(),
            text: "Nuevo mensaje desde el formulario de contacto\nNombre: Ana\nEmail: \
                   ana@x.com\nOrganización: ONG X\n\nMensaje:\nHola"
                .into(),
            html: "<h2>Nuevo mensaje desde el formulario de contacto</h2>\n<p><strong>Nombre:\
                   </strong> Ana</p>\n<p><strong>Email:</strong> ana@x.com</p>\n<p><strong>\
                   Organización:</strong> ONG X</p>\n<p><strong>Mensaje:</strong></p>\n\
                   <p>Hola</p>"
                .into(),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email =
            MockEmailService::new().with_send("re_key".into(), expected_email(), Ok(()));

        let sut = ContactFeatureServiceImpl::new(env(), email);

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn configured_sender_and_fallback_recipient() {
        // Arrange
        let env = MockEnvService::new().with_vars(&[
            (API_KEY_VAR, "re_key"),
            (TO_FALLBACK_VAR, "fallback@example.com"),
            (FROM_VAR, "Web <web@example.com>"),
        ]);

        let email = MockEmailService::new().with_send(
            "re_key".into(),
            Email {
                from: "Web <web@example.com>".into(),
                to: vec!["fallback@example.com".into()],
                ..expected_email()
            },
            Ok(()),
        );

        let sut = ContactFeatureServiceImpl::new(env, email);

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn honeypot() {
        // Arrange
        let env = MockEnvService::new();
        let email = MockEmailService::new();

        let sut = ContactFeatureServiceImpl::new(env, email);

        // Act
        let result = sut
            .submit(ContactFormSubmission {
                bot_field: "spam".into(),
                ..Default::default()
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn missing_fields() {
        // Arrange
        let env = MockEnvService::new();
        let email = MockEmailService::new();

        let sut = ContactFeatureServiceImpl::new(env, email);

        // Act
        let result = sut
            .submit(ContactFormSubmission {
                name: "".into(),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Invalid(ContactValidationError::MissingFields))
        );
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let env = MockEnvService::new();
        let email = MockEmailService::new();

        let sut = ContactFeatureServiceImpl::new(env, email);

        // Act
        let result = sut
            .submit(ContactFormSubmission {
                email: "not-an-email".into(),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Invalid(ContactValidationError::InvalidEmail))
        );
    }

    #[tokio::test]
    async fn missing_config() {
        // Arrange
        let env = MockEnvService::new().with_vars(&[(TO_VAR, "contact@example.com")]);
        let email = MockEmailService::new();

        let sut = ContactFeatureServiceImpl::new(env, email);

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        let err = result.unwrap_err();
        assert_matches!(&err, ContactSubmitError::MissingConfig);
        assert_eq!(
            err.to_string(),
            "Missing environment variables. Configure RESEND_API_KEY and CONTACT_TO_EMAIL."
        );
    }

    #[tokio::test]
    async fn provider_rejected() {
        // Arrange
        let email = MockEmailService::new().with_send(
            "re_key".into(),
            expected_email(),
            Err(EmailSendError::Rejected {
                status: 500,
                details: "rate limited".into(),
            }),
        );

        let sut = ContactFeatureServiceImpl::new(env(), email);

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Send(err)) if err.details() == "rate limited"
        );
    }

    #[tokio::test]
    async fn provider_unreachable() {
        // Arrange
        let email = MockEmailService::new().with_send(
            "re_key".into(),
            expected_email(),
            Err(anyhow!("connection refused").into()),
        );

        let sut = ContactFeatureServiceImpl::new(env(), email);

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send(EmailSendError::Other(_))));
    }

    #[tokio::test]
    async fn not_deduplicated() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .times(2)
            .returning(|_, _| Box::pin(std::future::ready(Ok(()))));

        let sut = ContactFeatureServiceImpl::new(env(), email);

        // Act
        let first = sut.submit(submission()).await;
        let second = sut.submit(submission()).await;

        // Assert
        first.unwrap();
        second.unwrap();
    }
}
