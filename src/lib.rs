//! apic: host mock REST APIs from the command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags / config file
//!        │
//!        ▼
//!   ┌─────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │   api   │───▶│ http/response│───▶│ http/server  │───▶│ http/handler │──▶ client
//!   │ builder │    │   compiler   │    │  registrar   │    │ per request  │
//!   └─────────┘    └──────────────┘    └──────┬───────┘    └──────────────┘
//!                                             │ routes
//!                                             ▼
//!                                       ┌───────────┐
//!                                       │   docs    │ (OpenAPI on docs port)
//!                                       └───────────┘
//!
//!   lifecycle/session: Setup → Running (wait for one byte) → Teardown (stop docs)
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod docs;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use api::{ApiDefinition, DefinitionSource};
pub use config::SessionContext;
pub use http::{ApiServer, ResponseDescriptor};
pub use lifecycle::{RunningSession, SessionError};
