use contact_relay_core_contact_impl::ContactFeatureServiceImpl;
use contact_relay_email_impl::EmailServiceImpl;
use contact_relay_shared_impl::env::EnvServiceImpl;

pub type RestServer = contact_relay_api_rest::RestServer<ContactFeature>;

pub type ContactFeature = ContactFeatureServiceImpl<Env, Email>;

pub type Env = EnvServiceImpl;
pub type Email = EmailServiceImpl;
