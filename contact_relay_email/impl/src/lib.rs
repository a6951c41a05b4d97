use std::sync::Arc;

use anyhow::Context;
use contact_relay_email_contracts::{Email, EmailSendError, EmailService};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

mod http;

/// https://resend.com/docs/api-reference/emails/send-email
const SEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sends emails through the Resend REST API.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailServiceConfig {
    pub fn new(send_endpoint_override: Option<Url>) -> Self {
        Self {
            send_endpoint: send_endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            http: HttpClient::new()?,
        })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, api_key: &str, email: Email) -> Result<(), EmailSendError> {
        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .bearer_auth(api_key)
            .json(&SendEmailRequest::from(&email))
            .send()
            .await
            .context("Failed to send email request")?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .text()
                .await
                .context("Failed to read email provider error response")?;
            return Err(EmailSendError::Rejected {
                status: status.as_u16(),
                details,
            });
        }

        let id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .map(|response| response.id);
        debug!(?id, "email accepted by provider");

        Ok(())
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl<'a> From<&'a Email> for SendEmailRequest<'a> {
    fn from(value: &'a Email) -> Self {
        Self {
            from: &value.from,
            to: &value.to,
            reply_to: value.reply_to.as_deref(),
            subject: &value.subject,
            text: &value.text,
            html: &value.html,
        }
    }
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}
