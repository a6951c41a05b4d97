use contact_relay_models::delivery::DeliveryConfig;
use contact_relay_shared_contracts::env::EnvService;

pub const API_KEY_VAR: &str = "RESEND_API_KEY";
pub const TO_VAR: &str = "CONTACT_TO_EMAIL";
pub const TO_FALLBACK_VAR: &str = "CONTACT_EMAIL";
pub const FROM_VAR: &str = "CONTACT_FROM_EMAIL";

pub const DEFAULT_FROM: &str = "Formulario de contacto <onboarding@resend.dev>";

/// Reads the delivery configuration, or `None` if the api key or the
/// destination address is missing.
pub fn resolve(env: &impl EnvService) -> Option<DeliveryConfig> {
    let api_key = env.var(API_KEY_VAR);
    let to = env.var(TO_VAR).or_else(|| env.var(TO_FALLBACK_VAR));
    let from = env.var(FROM_VAR).unwrap_or_else(|| DEFAULT_FROM.into());

    Some(DeliveryConfig {
        api_key: api_key?,
        to: to?,
        from,
    })
}
