//! Shared utilities for session integration tests.

use apic::api::DefinitionSource;
use apic::config::SessionContext;
use apic::RunningSession;

/// Build a loopback context on ephemeral ports from definition flags.
pub fn context(path: &str, flags: &[(&'static str, &str)]) -> SessionContext {
    let mut ctx = SessionContext::new(Some("0"), Some("0"));
    ctx.bind_host = "127.0.0.1".to_string();
    ctx.with_source(&DefinitionSource::Flags {
        path: Some(path.to_string()),
        flags: flags.iter().map(|(k, v)| (*k, v.to_string())).collect(),
    })
}

/// Start a session with its docs server.
pub async fn start(ctx: SessionContext) -> RunningSession {
    let mut session = RunningSession::setup(ctx).await.expect("session setup failed");
    session.start_docs().await;
    session
}

/// A client that never reuses connections, so teardown is observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
