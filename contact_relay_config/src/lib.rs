use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

/// Colon separated list of additional config files, applied in order on top
/// of the default config.
pub const CONFIG_PATH_ENV: &str = "CONTACT_RELAY_CONFIG";

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV).unwrap_or_default();
    let paths = paths
        .split(':')
        .filter(|path| !path.is_empty())
        .collect::<Vec<_>>();
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Loads the default config, the files at `paths` and finally the TOML
/// snippets in `overrides`, each layer taking precedence over the previous
/// ones.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    overrides
        .iter()
        .fold(builder, |builder, &snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    #[serde(default)]
    pub resend: ResendConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResendConfig {
    pub endpoint_override: Option<Url>,
}
