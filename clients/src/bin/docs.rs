//! `waterframe-docs`: generates markdown documentation from the ontology.
//!
//! **Outputs:**
//! - `<out>/entities.md`: every documented entity, with a table of contents
//! - `<out>/index.md`: ontology overview and statistics
//! - `<out>/index.json`: the same summary, read by `waterframe-conformance`
//! - `<out>/modules/**.md`: one document per module file (categorized mode)
//!
//! **Usage:**
//! ```text
//! waterframe-docs [--config <toml>] [--ontology <ttl>] [--out <dir>]
//!                 [--modules <dir>] [--mode flat|categorized] [--no-discover]
//! ```
//!
//! Command-line flags override the configuration file. Log verbosity follows
//! `RUST_LOG` (default `info`).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waterframe_docs::config::{Config, Mode};
use waterframe_docs::generate;

/// Document layout selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// A single entities.md.
    Flat,
    /// entities.md plus one document per module.
    Categorized,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Flat => Mode::Flat,
            ModeArg::Categorized => Mode::Categorized,
        }
    }
}

/// Generate waterFRAME ontology documentation.
#[derive(Parser)]
#[command(
    name = "waterframe-docs",
    version,
    about = "Generate markdown documentation from the waterFRAME ontology"
)]
struct Args {
    /// TOML configuration file (default: ./waterframe.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Turtle file to document.
    #[arg(long)]
    ontology: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory of per-module Turtle files.
    #[arg(long)]
    modules: Option<PathBuf>,

    /// Document layout.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Only document declared entities, not IRIs found in object position.
    #[arg(long)]
    no_discover: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(ontology) = self.ontology {
            config.ontology = ontology;
        }
        if let Some(out) = self.out {
            config.output_dir = out;
        }
        if let Some(modules) = self.modules {
            config.modules_dir = modules;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if self.no_discover {
            config.discover_objects = false;
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(args.config.as_deref())?;
    let config = args.apply(config);
    config.validate()?;
    info!(
        ontology = %config.ontology.display(),
        out = %config.output_dir.display(),
        mode = ?config.mode,
        "starting documentation run"
    );

    let summary = generate(&config)?;

    println!("Documentation generated successfully.");
    println!("  Namespace: {}", summary.namespace);
    println!(
        "  Entities: {} documented, {} skipped, {} failed",
        summary.documented, summary.skipped, summary.failed
    );
    for file in &summary.files {
        println!("  Wrote: {}", file.display());
    }

    Ok(())
}
