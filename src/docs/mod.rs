//! Documentation server subsystem.
//!
//! # Data Flow
//! ```text
//! RegisteredRoute[] (from the API server)
//!     → handlers.rs (build OpenAPI document once)
//!     → server.rs (serve on docs port until the stop signal fires)
//! ```

pub mod handlers;
pub mod server;

pub use handlers::ApiDocument;
pub use server::DocsServer;
