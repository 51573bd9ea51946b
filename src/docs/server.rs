//! Documentation server lifecycle.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::docs::handlers::{get_document, ApiDocument};
use crate::http::server::RegisteredRoute;
use crate::lifecycle::shutdown::StopSignal;

/// Auxiliary HTTP server describing the mock API.
pub struct DocsServer {
    router: Router,
}

impl DocsServer {
    pub fn new(routes: &[RegisteredRoute], api_url: impl Into<String>) -> Self {
        let document = Arc::new(ApiDocument::new(routes, api_url));
        let router = Router::new()
            .route("/", get(get_document))
            .route("/openapi.json", get(get_document))
            .with_state(document)
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `stop` fires, then finish in-flight requests and return.
    pub fn spawn(self, listener: TcpListener, stop: StopSignal) -> JoinHandle<()> {
        let address = listener.local_addr().ok();

        tokio::spawn(async move {
            tracing::info!(address = ?address, "Docs server starting");

            let result = axum::serve(listener, self.router)
                .with_graceful_shutdown(async move {
                    let triggered = stop.wait().await;
                    tracing::debug!(triggered, "Docs server stop signal observed");
                })
                .await;

            match result {
                Ok(()) => tracing::info!("Docs server stopped"),
                Err(e) => tracing::error!(address = ?address, error = %e, "Docs server failed"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::builder::build_definition;
    use crate::http::ApiServer;
    use crate::lifecycle::shutdown::stop_signal;
    use axum::{body::Body, http::Request};
    use std::time::Duration;
    use tower::ServiceExt;

    fn docs() -> DocsServer {
        let def = build_definition(Some("/user/new"), vec![("resp", "{}")]);
        let api = ApiServer::new(&[def]);
        DocsServer::new(api.routes(), "http://localhost:8080")
    }

    #[tokio::test]
    async fn test_serves_document_at_both_paths() {
        let server = docs();
        for uri in ["/", "/openapi.json"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = server.router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), 200);

            let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert!(json["paths"]["/user/new"]["get"].is_object());
        }
    }

    #[tokio::test]
    async fn test_stops_when_signalled() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (trigger, signal) = stop_signal();
        let handle = docs().spawn(listener, signal);

        trigger.trigger();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("docs server did not stop")
            .unwrap();
    }
}
