//! Session context definitions.

use std::path::PathBuf;

use crate::api::{build_definitions, ApiDefinition, DefinitionSource};

/// Default listening port for the mock API.
pub const DEFAULT_PORT: &str = "8080";

/// Default port for the documentation server.
pub const DEFAULT_DOCS_PORT: &str = "8090";

/// Default interface both listeners bind to.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Configuration for one `apic rest` run.
///
/// Built once in the command entry point and handed to the session by value.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Port the mock API listens on.
    pub listen_port: String,

    /// Port the documentation server listens on.
    pub docs_port: String,

    /// Config file the definitions were loaded from, if any.
    pub config_path: Option<PathBuf>,

    /// Endpoints to serve, in registration order.
    pub definitions: Vec<ApiDefinition>,
}

impl SessionContext {
    /// Create a context with no definitions. Blank ports fall back to defaults.
    pub fn new(listen_port: Option<&str>, docs_port: Option<&str>) -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            listen_port: port_or_default(listen_port, DEFAULT_PORT),
            docs_port: port_or_default(docs_port, DEFAULT_DOCS_PORT),
            config_path: None,
            definitions: Vec::new(),
        }
    }

    /// Load definitions from exactly one source.
    ///
    /// A config file that cannot be read or parsed is logged and leaves the
    /// session with zero endpoints.
    pub fn with_source(mut self, source: &DefinitionSource) -> Self {
        if let DefinitionSource::ConfigFile(path) = source {
            self.config_path = Some(path.clone());
        }

        self.definitions = match build_definitions(source) {
            Ok(definitions) => definitions,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load API definitions, serving no endpoints");
                Vec::new()
            }
        };

        tracing::debug!(
            definitions = self.definitions.len(),
            from_config = self.config_path.is_some(),
            "API definitions built"
        );

        self
    }

    /// Address for the mock API listener.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.listen_port)
    }

    /// Address for the documentation listener.
    pub fn docs_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.docs_port)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn port_or_default(port: Option<&str>, default: &str) -> String {
    match port.map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => default.to_string(),
    }
}
