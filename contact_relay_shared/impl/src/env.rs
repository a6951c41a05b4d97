use contact_relay_shared_contracts::env::EnvService;
use tracing::warn;

/// Reads variables from the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvServiceImpl;

impl EnvService for EnvServiceImpl {
    fn var(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) if value.is_empty() => None,
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                warn!(key, "ignoring environment variable with non-unicode value");
                None
            }
        }
    }
}
