use contact_relay_config::Config;
use contact_relay_email_impl::{EmailServiceConfig, EmailServiceImpl};
use contact_relay_shared_impl::env::EnvServiceImpl;
use types::{ContactFeature, Email, RestServer};

pub mod types;

pub fn email_service(config: &Config) -> anyhow::Result<Email> {
    let email_config = EmailServiceConfig::new(config.resend.endpoint_override.clone());
    EmailServiceImpl::new(email_config)
}

/// Wires up the rest server with the real services.
///
/// Delivery settings are read from the process environment on every request,
/// so they are not validated here.
pub fn rest_server(config: &Config) -> anyhow::Result<RestServer> {
    let contact = ContactFeature::new(EnvServiceImpl, email_service(config)?);
    Ok(RestServer::new(contact))
}
