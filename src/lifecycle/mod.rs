//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Session (session.rs):
//!     Setup → Running → Teardown, no loops back
//!
//! Termination (signals.rs):
//!     one byte on stdin / EOF / Ctrl+C → end Running phase
//!
//! Stop signal (shutdown.rs):
//!     Teardown fires StopTrigger once → docs server drains and exits
//! ```

pub mod session;
pub mod shutdown;
pub mod signals;

pub use session::{run, run_until, RunningSession, SessionError};
pub use shutdown::{stop_signal, StopSignal, StopTrigger};
pub use signals::Termination;
