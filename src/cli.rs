//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::DefinitionSource;
use crate::config::SessionContext;

#[derive(Debug, Parser)]
#[command(name = "apic", version, about = "Host mock APIs from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Creates a REST API
    ///
    /// Hosts a single path from flags, or many paths with --config.
    /// Run several sessions on different ports for multiple APIs.
    ///
    /// Example: apic rest /user/new -p 8071 --swaggerport 8072 -q 'userid=110&tag=name' -r '{"userName":"John Nash"}'
    Rest(RestArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct RestArgs {
    /// Path to host, default /api/new
    pub path: Option<String>,

    /// Config file to host a series of APIs; CLI definition flags are ignored
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Swagger docs serving port, default 8090
    #[arg(long)]
    pub swaggerport: Option<String>,

    /// Query string, i.e. id=110&name='john dane'
    #[arg(short = 'q', long)]
    pub querystr: Option<String>,

    /// Listening port, default 8080
    #[arg(short = 'p', long)]
    pub port: Option<String>,

    /// Response headers, i.e. content-type=application/json custom-key=customvalue
    #[arg(short = 'd', long)]
    pub header: Option<String>,

    /// Response cookies, i.e. cookie1=value1 cookie2=value2
    #[arg(short = 'k', long)]
    pub cookie: Option<String>,

    /// Response body (always json)
    #[arg(short = 'r', long)]
    pub resp: Option<String>,
}

impl RestArgs {
    /// Definition flags the operator supplied, by flag name.
    pub fn visited_flags(&self) -> Vec<(&'static str, String)> {
        [
            ("querystr", &self.querystr),
            ("resp", &self.resp),
            ("header", &self.header),
            ("cookie", &self.cookie),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }

    /// The single source definitions are built from. A config file wins.
    pub fn definition_source(&self) -> DefinitionSource {
        match &self.config {
            Some(path) => {
                if self.path.is_some() || !self.visited_flags().is_empty() {
                    tracing::warn!(
                        config = ?path,
                        "Config file given, ignoring path argument and definition flags"
                    );
                }
                DefinitionSource::ConfigFile(path.clone())
            }
            None => DefinitionSource::Flags {
                path: self.path.clone(),
                flags: self.visited_flags(),
            },
        }
    }

    /// Build the session context for this invocation.
    pub fn session_context(&self) -> SessionContext {
        SessionContext::new(self.port.as_deref(), self.swaggerport.as_deref())
            .with_source(&self.definition_source())
    }
}
