use anyhow::anyhow;
use contact_relay_config::Config;
use tracing::info;

use crate::environment;

/// Serves requests delivered by the AWS Lambda runtime instead of binding a
/// socket.
pub async fn lambda(config: Config) -> anyhow::Result<()> {
    let router = environment::rest_server(&config)?.router();
    info!("Starting lambda runtime");
    lambda_http::run(router).await.map_err(|err| anyhow!(err))
}
