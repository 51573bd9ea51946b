use clap::Parser;

use apic::cli::{Cli, Command};
use apic::lifecycle::{self, signals};
use apic::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    tracing::debug!("apic v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Rest(args) => {
            let context = args.session_context();

            tracing::info!(
                port = %context.listen_port,
                docs_port = %context.docs_port,
                definitions = context.definitions.len(),
                "Session configured"
            );

            lifecycle::run_until(context, signals::wait_for_stdin()).await?;
        }
    }

    Ok(())
}
