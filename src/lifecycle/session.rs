//! Session supervision.
//!
//! # Phases
//! ```text
//! Setup:    compile + register routes → bind API listener → spawn serve → print summary
//! Running:  bind + spawn docs server → print docs address → wait for one byte of operator input
//! Teardown: fire docs stop signal once → wait for docs server → print termination
//! ```
//!
//! # Design Decisions
//! - API bind failure is fatal: it is the only listener that matters
//! - Docs bind failure is logged and the session runs without docs
//! - In-flight API requests are not drained at teardown

use std::net::SocketAddr;
use std::time::Duration;

use std::future::Future;

use tokio::io::AsyncRead;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::SessionContext;
use crate::docs::DocsServer;
use crate::http::server::{ApiServer, RegisteredRoute};
use crate::lifecycle::shutdown::{stop_signal, StopTrigger};
use crate::lifecycle::signals::{operator_termination, wait_for_input, Termination};

/// How long teardown waits for the docs server to finish.
const DOCS_STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Error type for session startup.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to bind API listener on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

struct DocsHandle {
    address: SocketAddr,
    stop: StopTrigger,
    task: JoinHandle<()>,
}

/// A session whose API listener is accepting traffic.
pub struct RunningSession {
    context: SessionContext,
    api_address: SocketAddr,
    routes: Vec<RegisteredRoute>,
    api_task: JoinHandle<()>,
    docs: Option<DocsHandle>,
    docs_error: Option<String>,
}

impl RunningSession {
    /// Setup phase: register every route and start the API listener.
    pub async fn setup(context: SessionContext) -> Result<Self, SessionError> {
        let server = ApiServer::new(&context.definitions);
        let routes = server.routes().to_vec();

        let address = context.listen_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| SessionError::Bind {
                address: address.clone(),
                source,
            })?;
        let api_address = listener.local_addr()?;

        tracing::info!(
            address = %api_address,
            routes = routes.len(),
            "API listener bound"
        );

        let api_task = server.spawn(listener);

        Ok(Self {
            context,
            api_address,
            routes,
            api_task,
            docs: None,
            docs_error: None,
        })
    }

    /// Start the documentation server. A bind failure is logged, not returned.
    pub async fn start_docs(&mut self) {
        if self.docs.is_some() {
            return;
        }

        let address = self.context.docs_address();
        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(address = %address, error = %e, "Failed to bind docs server");
                self.docs_error = Some(format!("failed to bind {}: {}", address, e));
                return;
            }
        };
        let docs_address = match listener.local_addr() {
            Ok(addr) => addr,
            Err(e) => {
                tracing::error!(address = %address, error = %e, "Failed to read docs address");
                self.docs_error = Some(format!("failed to read address {}: {}", address, e));
                return;
            }
        };

        let (stop, signal) = stop_signal();
        let task = DocsServer::new(&self.routes, self.api_url()).spawn(listener, signal);

        self.docs_error = None;
        self.docs = Some(DocsHandle {
            address: docs_address,
            stop,
            task,
        });
    }

    /// Teardown phase. Returns true if the docs server received its stop signal.
    pub async fn teardown(self) -> bool {
        let delivered = match self.docs {
            Some(DocsHandle { stop, task, .. }) => {
                let delivered = stop.trigger();
                match tokio::time::timeout(DOCS_STOP_TIMEOUT, task).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!(error = %e, "Docs server task failed"),
                    Err(_) => tracing::warn!("Docs server did not stop in time"),
                }
                delivered
            }
            None => false,
        };

        self.api_task.abort();
        delivered
    }

    pub fn api_address(&self) -> SocketAddr {
        self.api_address
    }

    pub fn docs_address(&self) -> Option<SocketAddr> {
        self.docs.as_ref().map(|d| d.address)
    }

    pub fn routes(&self) -> &[RegisteredRoute] {
        &self.routes
    }

    /// Base URL of the mock API as reachable from this host.
    pub fn api_url(&self) -> String {
        format!("http://{}:{}", display_host(&self.context.bind_host), self.api_address.port())
    }

    /// Human-readable listing of every registered path and port.
    pub fn summary(&self) -> String {
        let mut out = String::new();

        if let Some(path) = &self.context.config_path {
            out.push_str(&format!("config: {}\n", path.display()));
        }
        out.push_str(&format!("API listening on {}\n", self.api_url()));

        if self.routes.is_empty() {
            out.push_str("  (no endpoints defined)\n");
        }
        for route in &self.routes {
            let def = &route.definition;
            out.push_str(&format!(
                "  GET|POST|PUT|DELETE {}{}\n",
                self.api_url(),
                def.display_target()
            ));
            if !def.header_spec.is_empty() {
                out.push_str(&format!("    headers: {}\n", def.header_spec));
            }
            if !def.cookie_spec.is_empty() {
                out.push_str(&format!("    cookies: {}\n", def.cookie_spec));
            }
        }

        out.push_str(&format!("API docs requested on port {}", self.context.docs_port));
        out
    }

    /// Where the docs server actually listens, or why it does not.
    pub fn docs_status(&self) -> String {
        match (self.docs_address(), &self.docs_error) {
            (Some(addr), _) => format!(
                "API docs on http://{}:{}",
                display_host(&self.context.bind_host),
                addr.port()
            ),
            (None, Some(e)) => format!("API docs unavailable ({})", e),
            (None, None) => "API docs not started".to_string(),
        }
    }
}

/// Run a full session, ending on one byte read from `input`.
pub async fn run<R>(context: SessionContext, input: R) -> Result<Termination, SessionError>
where
    R: AsyncRead + Unpin,
{
    run_until(context, wait_for_input(input)).await
}

/// Run a full session: setup, wait for `input` or Ctrl+C, teardown.
pub async fn run_until<F>(context: SessionContext, input: F) -> Result<Termination, SessionError>
where
    F: Future<Output = std::io::Result<Termination>>,
{
    let mut session = RunningSession::setup(context).await?;
    println!("{}", session.summary());

    session.start_docs().await;
    println!("{}", session.docs_status());
    println!("Press any key to terminate...");

    let termination = operator_termination(input).await;
    tracing::info!(reason = ?termination, "Operator requested termination");

    session.teardown().await;
    println!("apic terminating...");

    Ok(termination)
}

fn display_host(bind_host: &str) -> &str {
    match bind_host {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DefinitionSource;

    fn context(flags: Vec<(&'static str, String)>) -> SessionContext {
        let mut ctx = SessionContext::new(Some("0"), Some("0"));
        ctx.bind_host = "127.0.0.1".to_string();
        ctx.with_source(&DefinitionSource::Flags {
            path: Some("user/new".into()),
            flags,
        })
    }

    #[tokio::test]
    async fn test_summary_lists_routes() {
        let session = RunningSession::setup(context(vec![
            ("querystr", "id=110".into()),
            ("header", "x-a=1".into()),
            ("cookie", "session=abc".into()),
        ]))
        .await
        .unwrap();

        let summary = session.summary();
        let port = session.api_address().port();
        assert!(summary.contains(&format!("API listening on http://127.0.0.1:{}", port)));
        assert!(summary.contains(&format!(
            "GET|POST|PUT|DELETE http://127.0.0.1:{}/user/new?id%3D110",
            port
        )));
        assert!(summary.contains("headers: x-a=1"));
        assert!(summary.contains("cookies: session=abc"));

        session.teardown().await;
    }

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut ctx = context(vec![]);
        ctx.listen_port = taken.local_addr().unwrap().port().to_string();

        let result = RunningSession::setup(ctx).await;
        assert!(matches!(result, Err(SessionError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_docs_bind_failure_is_not_fatal() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut ctx = context(vec![]);
        ctx.docs_port = taken.local_addr().unwrap().port().to_string();

        let mut session = RunningSession::setup(ctx).await.unwrap();
        session.start_docs().await;
        assert!(session.docs_address().is_none());
        assert!(session.docs_status().starts_with("API docs unavailable (failed to bind"));
        assert!(!session.teardown().await);
    }

    #[tokio::test]
    async fn test_teardown_signals_docs_exactly_once() {
        let mut session = RunningSession::setup(context(vec![])).await.unwrap();
        assert_eq!(session.docs_status(), "API docs not started");
        session.start_docs().await;
        let bound = session.docs_address().unwrap();
        assert_eq!(
            session.docs_status(),
            format!("API docs on http://127.0.0.1:{}", bound.port())
        );

        // A second start must not spawn another docs server.
        let first = session.docs_address();
        session.start_docs().await;
        assert_eq!(session.docs_address(), first);

        assert!(session.teardown().await);
    }

    #[test]
    fn test_display_host() {
        assert_eq!(display_host("0.0.0.0"), "localhost");
        assert_eq!(display_host("127.0.0.1"), "127.0.0.1");
    }
}
