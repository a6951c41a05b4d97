use anyhow::Context;
use clap::Subcommand;
use contact_relay_config::Config;
use contact_relay_core_contact_impl::delivery::{API_KEY_VAR, DEFAULT_FROM, FROM_VAR};
use contact_relay_email_contracts::{Email, EmailService};
use contact_relay_models::email_address::EmailAddress;
use contact_relay_shared_contracts::env::EnvService;
use contact_relay_shared_impl::env::EnvServiceImpl;
use tracing::info;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let env = EnvServiceImpl;
    let api_key = env
        .var(API_KEY_VAR)
        .with_context(|| format!("{API_KEY_VAR} is not set"))?;
    let from = env.var(FROM_VAR).unwrap_or_else(|| DEFAULT_FROM.into());

    let email_service = environment::email_service(&config)?;

    email_service
        .send(
            &api_key,
            Email {
                from,
                to: vec![recipient.to_string()],
                reply_to: None,
                subject: "Email Deliverability Test".into(),
                text: "Email deliverability seems to be working!".into(),
                html: "<p>Email deliverability seems to be working!</p>".into(),
            },
        )
        .await
        .context("Failed to send email")?;

    info!(%recipient, "Test email has been sent");

    Ok(())
}
