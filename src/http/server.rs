//! Route registration and the primary listener.
//!
//! # Responsibilities
//! - Compile one ResponseDescriptor per definition
//! - Bind GET, POST, PUT and DELETE of each path to the shared handler
//! - Wire up middleware (tracing, request ID)
//! - Serve the router on an already-bound listener
//!
//! # Design Decisions
//! - Routes are registered once at startup, read-only afterwards
//! - Duplicate paths: last registration wins
//! - Serving is fire-and-forget; serve errors are logged

use std::sync::Arc;

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::api::ApiDefinition;
use crate::http::handler::handle_request;
use crate::http::request::MakeRequestUuidV4;
use crate::http::response::ResponseDescriptor;

/// A route that made it into the router.
#[derive(Debug, Clone)]
pub struct RegisteredRoute {
    pub definition: ApiDefinition,
    pub descriptor: Arc<ResponseDescriptor>,
}

/// HTTP server for the mock API.
pub struct ApiServer {
    router: Router,
    routes: Vec<RegisteredRoute>,
}

impl ApiServer {
    /// Compile and register every definition.
    pub fn new(definitions: &[ApiDefinition]) -> Self {
        let routes = register_routes(definitions);
        let router = Self::build_router(&routes);
        Self { router, routes }
    }

    fn build_router(routes: &[RegisteredRoute]) -> Router {
        let router = routes.iter().fold(Router::new(), |router, route| {
            router.route(&route.definition.path, verb_routes(route.descriptor.clone()))
        });

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[RegisteredRoute] {
        &self.routes
    }

    /// A clone of the router, for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Start serving on `listener` in a background task.
    pub fn spawn(self, listener: TcpListener) -> JoinHandle<()> {
        let address = listener.local_addr().ok();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, self.router).await {
                tracing::error!(address = ?address, error = %e, "API listener failed");
            }
        })
    }
}

fn verb_routes(descriptor: Arc<ResponseDescriptor>) -> MethodRouter {
    get(handle_request)
        .post(handle_request)
        .put(handle_request)
        .delete(handle_request)
        .with_state(descriptor)
}

/// Compile definitions into routes, dropping unroutable paths and
/// replacing earlier registrations of the same path.
fn register_routes(definitions: &[ApiDefinition]) -> Vec<RegisteredRoute> {
    let mut routes: Vec<RegisteredRoute> = Vec::with_capacity(definitions.len());

    for definition in definitions {
        if !is_routable(&definition.path) {
            tracing::warn!(path = %definition.path, "Skipping path with reserved route syntax");
            continue;
        }

        let route = RegisteredRoute {
            definition: definition.clone(),
            descriptor: Arc::new(ResponseDescriptor::compile(definition)),
        };

        match routes.iter_mut().find(|r| r.definition.path == definition.path) {
            Some(existing) => {
                tracing::warn!(path = %definition.path, "Duplicate path, last definition wins");
                *existing = route;
            }
            None => routes.push(route),
        }
    }

    routes
}

// axum treats `{..}` as captures and rejects segments starting with `:` or `*`.
fn is_routable(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}'])
        && !path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
}
