//! repository-gen: run the repository generator outside of `prisma generate`
//!
//! Reads a DMMF document (as printed by `prisma` tooling, or a captured
//! generator options payload with a `dmmf` key) and writes one repository
//! file per model into the output directory.

use clap::Parser;
use prisma_repository_generator::dmmf::Document;
use prisma_repository_generator::generate_models;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "repository-gen")]
#[command(about = "Generate TypeScript repositories from a Prisma DMMF document")]
struct Args {
    /// DMMF JSON file, or generator options containing a `dmmf` key
    input: PathBuf,

    /// Output directory (its previous contents are removed)
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let content = std::fs::read_to_string(&args.input)?;
    let mut value: serde_json::Value = serde_json::from_str(&content)?;

    // Accept a captured options payload as well as a bare document
    if let Some(dmmf) = value.get_mut("dmmf").map(serde_json::Value::take) {
        value = dmmf;
    }
    let document = Document::from_json(value)?;

    if document.datamodel.models.is_empty() {
        eprintln!("No models found in {}", args.input.display());
        return Ok(());
    }

    let summary = generate_models(&document.datamodel.models, &args.output)?;

    eprintln!(
        "Generated {} repositories in {}",
        summary.files.len(),
        args.output.display()
    );

    Ok(())
}
