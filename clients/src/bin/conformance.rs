//! `waterframe-conformance`: validates generated documentation against the
//! ontology it was generated from.
//!
//! Runs the complete conformance suite:
//! - Links (every anchor resolves, headings and links agree)
//! - Coverage (every documented entity has a section)
//! - Inventory (published counts match the store)
//!
//! **Usage:**
//! ```text
//! waterframe-conformance [--config <toml>] [--ontology <ttl>] [--docs <dir>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waterframe_conformance::{run_all, DocsPaths, Severity};
use waterframe_docs::config::{Config, Mode};

/// Run the waterFRAME documentation conformance suite.
#[derive(Parser)]
#[command(
    name = "waterframe-conformance",
    version,
    about = "Validate generated waterFRAME documentation against the ontology"
)]
struct Args {
    /// TOML configuration file (default: ./waterframe.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Turtle file the documentation was generated from.
    #[arg(long)]
    ontology: Option<PathBuf>,

    /// Generated documentation directory.
    #[arg(long)]
    docs: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(args.config.as_deref())?;
    let paths = DocsPaths {
        ontology: args.ontology.unwrap_or(config.ontology),
        docs: args.docs.unwrap_or(config.output_dir),
        fallback_namespace: config.fallback_namespace,
        modules: (config.mode == Mode::Categorized).then_some(config.modules_dir),
    };

    info!(
        ontology = %paths.ontology.display(),
        docs = %paths.docs.display(),
        "starting conformance run"
    );
    let report = run_all(&paths)?;

    println!("waterFRAME Documentation Conformance Report");
    println!("===========================================");
    println!();

    let mut passed = 0usize;
    for result in &report.results {
        if result.severity == Severity::Pass {
            passed += 1;
        }
        println!("{result}");
    }

    let failed = report.failure_count();
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed,
        report.warning_count(),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
