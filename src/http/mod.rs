//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! ApiDefinition[]
//!     → response.rs (compile one ResponseDescriptor per definition, once)
//!     → server.rs (bind GET/POST/PUT/DELETE per path, add layers)
//!     → request.rs (request ID on every exchange)
//!     → handler.rs (write headers, cookies, "<METHOD>\n<body>")
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ResponseDescriptor;
pub use server::ApiServer;
