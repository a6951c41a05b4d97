//! Tag every request with an `X-Request-Id`, keeping one supplied by a proxy.

use axum::{
    http::{HeaderName, HeaderValue, Request},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::STANDARD_NO_PAD};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(PropagateRequestIdLayer::new(header.clone()))
        .layer(SetRequestIdLayer::new(header, MakeRequestIdV7))
}

/// Generates time ordered ids, rendered as unpadded base64.
#[derive(Debug, Clone, Copy)]
struct MakeRequestIdV7;

impl MakeRequestId for MakeRequestIdV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Base64Display::new(Uuid::now_v7().as_bytes(), &STANDARD_NO_PAD).to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
