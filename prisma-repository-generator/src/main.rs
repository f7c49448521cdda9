//! prisma-repository-generator
//!
//! Spawned by the Prisma CLI for a schema block such as:
//!
//!   generator repository {
//!     provider = "prisma-repository-generator"
//!     output   = "../src/generated"
//!   }
//!
//! Requests are read from stdin and answered on stderr. Logs go to stdout.

use std::io;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stdout))
        .init();

    let stdin = io::stdin();
    prisma_repository_generator::rpc::serve(stdin.lock(), io::stderr())?;

    Ok(())
}
