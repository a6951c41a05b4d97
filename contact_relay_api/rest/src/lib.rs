use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use contact_relay_core_contact_contracts::ContactFeatureService;
use tokio::net::TcpListener;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    contact: Contact,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(contact: Contact) -> Self {
        Self { contact }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        axum::serve(listener, router)
            .await
            .context("Failed to start HTTP server")
    }

    /// Builds the complete router, including all middlewares.
    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .fallback(routes::not_found);

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
