//! Session configuration subsystem.
//!
//! # Data Flow
//! ```text
//! CLI args (ports, path, definition flags, --config)
//!     → schema.rs (SessionContext with defaults)
//!     → loader.rs (config file → ApiDefinition[], when --config is set)
//!     → SessionContext (immutable, passed explicitly to every subsystem)
//! ```
//!
//! # Design Decisions
//! - Config file and CLI definition flags are mutually exclusive; config wins
//! - A config file with no content is a valid, empty server
//! - Loader failures are reported and degrade to zero endpoints

pub mod loader;
pub mod schema;

pub use loader::{load_definitions, ConfigError};
pub use schema::{SessionContext, DEFAULT_BIND_HOST, DEFAULT_DOCS_PORT, DEFAULT_PORT};
