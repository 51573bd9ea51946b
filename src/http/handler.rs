//! Request handler shared by every verb of a route.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};

use crate::http::request::X_REQUEST_ID;
use crate::http::response::ResponseDescriptor;

/// Serve the route's precompiled response and log the exchange.
///
/// There is no error path: the descriptor was validated when it was compiled.
pub async fn handle_request(
    State(descriptor): State<Arc<ResponseDescriptor>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let response = descriptor.render(&method);

    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        query = uri.query().unwrap_or(""),
        "Inbound request"
    );

    response
}
