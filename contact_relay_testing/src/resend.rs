//! In-process stand-in for the Resend email API.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use url::Url;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// Emails addressed to this domain are rejected with `500 rate limited`.
pub const FAILING_DOMAIN: &str = "fail.invalid";

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{EMAILS_ROUTE}");
    info!("API key: {api_key:?}");
    info!("Emails sent to any address at {FAILING_DOMAIN} are rejected");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(StateInner::new(api_key).into()))
        .await
        .context("Failed to start HTTP server")
}

/// Handle to a fake resend server running in the background.
#[derive(Debug, Clone)]
pub struct FakeResend {
    endpoint: Url,
    state: Arc<StateInner>,
}

impl FakeResend {
    /// Starts a server on an ephemeral localhost port.
    pub async fn spawn(api_key: impl Into<String>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind to localhost")?;
        let addr = listener.local_addr()?;
        let endpoint = endpoint(addr)?;
        let state = Arc::new(StateInner::new(api_key.into()));

        let router = router(Arc::clone(&state));
        tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self { endpoint, state })
    }

    pub fn endpoint(&self) -> Url {
        self.endpoint.clone()
    }

    /// Returns all emails accepted so far, oldest first.
    pub async fn received(&self) -> Vec<ReceivedEmail> {
        self.state.received.lock().await.clone()
    }
}

fn endpoint(addr: SocketAddr) -> anyhow::Result<Url> {
    format!("http://{addr}{EMAILS_ROUTE}")
        .parse()
        .with_context(|| format!("Failed to build send endpoint for {addr}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug)]
struct StateInner {
    api_key: String,
    received: Mutex<Vec<ReceivedEmail>>,
}

impl StateInner {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            received: Default::default(),
        }
    }
}

fn router(state: Arc<StateInner>) -> Router<()> {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send_email))
        .with_state(state)
}

async fn send_email(
    State(state): State<Arc<StateInner>>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    Json(email): Json<ReceivedEmail>,
) -> Response {
    let authorized = authorization.is_some_and(|TypedHeader(Authorization(bearer))| {
        bearer.token() == state.api_key
    });
    if !authorized {
        let body = json!({
            "statusCode": 401,
            "name": "validation_error",
            "message": "API key is invalid",
        });
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    if email
        .to
        .iter()
        .any(|to| to.ends_with(&format!("@{FAILING_DOMAIN}")))
    {
        return (StatusCode::INTERNAL_SERVER_ERROR, "rate limited").into_response();
    }

    info!(to = ?email.to, subject = %email.subject, "accepted email");
    state.received.lock().await.push(email);

    Json(json!({ "id": Uuid::new_v4() })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> serde_json::Value {
        json!({
            "from": "Web <web@example.com>",
            "to": [to],
            "reply_to": "ana@x.com",
            "subject": "Subject",
            "text": "Text",
            "html": "<p>Html</p>",
        })
    }

    #[test]
    fn endpoint_from_address() {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 8003));
        assert_eq!(
            endpoint(addr).unwrap().as_str(),
            "http://127.0.0.1:8003/emails"
        );
    }

    #[tokio::test]
    async fn accepts_authorized_email() {
        let server = FakeResend::spawn("re_key").await.unwrap();

        let response = reqwest::Client::new()
            .post(server.endpoint())
            .bearer_auth("re_key")
            .json(&email("contact@example.com"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.json::<serde_json::Value>().await.unwrap();
        assert!(body["id"].is_string());

        let received = server.received().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].to, ["contact@example.com"]);
        assert_eq!(received[0].reply_to.as_deref(), Some("ana@x.com"));
    }

    #[tokio::test]
    async fn rejects_wrong_api_key() {
        let server = FakeResend::spawn("re_key").await.unwrap();

        let response = reqwest::Client::new()
            .post(server.endpoint())
            .bearer_auth("re_other")
            .json(&email("contact@example.com"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(server.received().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_failing_domain() {
        let server = FakeResend::spawn("re_key").await.unwrap();

        let response = reqwest::Client::new()
            .post(server.endpoint())
            .bearer_auth("re_key")
            .json(&email("contact@fail.invalid"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text().await.unwrap(), "rate limited");
        assert!(server.received().await.is_empty());
    }
}
