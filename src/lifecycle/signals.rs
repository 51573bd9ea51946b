//! Operator termination triggers.
//!
//! # Responsibilities
//! - Wait for a single byte of operator input
//! - Treat Ctrl+C the same as input when run interactively
//!
//! # Design Decisions
//! - EOF on input also ends the session
//! - Read errors end the session rather than leaving it unkillable
//! - Process stdin is read on a detached OS thread, never on the runtime's
//!   blocking pool, so runtime shutdown cannot wait on a pending read

use std::future::Future;
use std::io::Read;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::oneshot;

/// Why the session is ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Input,
    EndOfInput,
    CtrlC,
}

/// Read exactly one byte from `input`.
pub async fn wait_for_input<R>(mut input: R) -> std::io::Result<Termination>
where
    R: AsyncRead + Unpin,
{
    let mut byte = [0u8; 1];
    match input.read(&mut byte).await? {
        0 => Ok(Termination::EndOfInput),
        _ => Ok(Termination::Input),
    }
}

/// Read one byte of process stdin on a detached thread.
pub async fn wait_for_stdin() -> std::io::Result<Termination> {
    let (tx, rx) = oneshot::channel();

    std::thread::Builder::new()
        .name("apic-stdin".to_string())
        .spawn(move || {
            let _ = tx.send(read_one_byte(std::io::stdin().lock()));
        })?;

    match rx.await {
        Ok(result) => result,
        Err(_) => Ok(Termination::EndOfInput),
    }
}

fn read_one_byte<R: Read>(mut input: R) -> std::io::Result<Termination> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(Termination::EndOfInput),
            Ok(_) => return Ok(Termination::Input),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Wait for `input` to complete or Ctrl+C, whichever comes first.
pub async fn operator_termination<F>(input: F) -> Termination
where
    F: Future<Output = std::io::Result<Termination>>,
{
    tokio::select! {
        result = input => match result {
            Ok(termination) => termination,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read operator input");
                Termination::EndOfInput
            }
        },
        _ = ctrl_c() => Termination::CtrlC,
    }
}

// Never completes if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
