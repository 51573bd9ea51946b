//! API definition subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (path argument + visited flags)      config file ([[api]] entries)
//!     → builder.rs (flag lookup table)  ◀────────────┘
//!     → format.rs (path, query string, key=value pairs)
//!     → ApiDefinition (normalized, immutable)
//! ```
//!
//! # Design Decisions
//! - Exactly one source per session: config file XOR CLI flags
//! - Malformed input degrades gracefully, never fails the build
//! - Definitions are built once at startup and never mutated afterwards

pub mod builder;
pub mod definition;
pub mod format;

pub use builder::{build_definitions, DefinitionSource, FLAG_PARSERS};
pub use definition::{ApiDefinition, KeyValue, DEFAULT_PATH};
