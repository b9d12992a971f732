//! waterFRAME documentation generator.
//!
//! Turns the triples of an OWL ontology into cross-linked markdown: one
//! section per documented entity, a table of contents, an index summary
//! and (in categorized mode) one document per ontology module. Every
//! internal link is produced by [`linker::anchor_id`], the same function
//! that produces section anchors.
//!
//! # Entry Points
//!
//! ```no_run
//! use waterframe_docs::{config::Config, generate};
//!
//! let config = Config::load(None).expect("config should load");
//! let summary = generate(&config).expect("documentation generation failed");
//! println!("{} entities documented", summary.documented);
//! ```
//!
//! # Structure
//!
//! ```text
//! docs/
//!   index.md              ← Ontology overview and statistics
//!   index.json            ← Same summary, machine-readable
//!   entities.md           ← Every documented entity, sorted by name
//!   modules/              ← Categorized mode only
//!     index.md
//!     core/material_entities.md
//!     ...
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod assembler;
pub mod config;
pub mod extractor;
pub mod index;
pub mod linker;
pub mod modular;
pub mod namespace;
pub mod renderer;
pub mod writer;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use waterframe_graph::load_or_empty;

use assembler::{AssembleOptions, Assembler};
use config::{Config, Mode};
use index::IndexSummary;
use namespace::OntologyNamespace;

/// File name of the flat entity document.
pub const ENTITIES_FILE: &str = "entities.md";
/// File name of the human-readable index.
pub const INDEX_MD_FILE: &str = "index.md";
/// File name of the machine-readable index.
pub const INDEX_JSON_FILE: &str = "index.json";

/// What a generation run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// The namespace entities were linked against.
    pub namespace: String,
    /// Sections written to `entities.md`.
    pub documented: usize,
    /// Candidates left out for lack of labels and descriptions.
    pub skipped: usize,
    /// Candidates whose extraction failed.
    pub failed: usize,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

/// Generates the full documentation set described by `config`.
///
/// A missing or unparsable ontology is not an error: generation continues
/// with an empty store and the fallback namespace.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or any file
/// cannot be written.
pub fn generate(config: &Config) -> Result<GenerationSummary> {
    let store = load_or_empty(&config.ontology);
    let namespace = OntologyNamespace::detect(&store, &config.fallback_namespace);

    let options = AssembleOptions {
        title: config.title.clone(),
        discover_objects: config.discover_objects,
        undocumented: config.undocumented_policy(),
    };
    let document = Assembler::new(&store, &namespace, options).assemble();

    let out = &config.output_dir;
    let mut summary = GenerationSummary {
        namespace: namespace.namespace.clone(),
        documented: document.entities.len(),
        skipped: document.skipped.len(),
        failed: document.failed.len(),
        files: Vec::new(),
    };

    let entities_path = out.join(ENTITIES_FILE);
    writer::write_markdown(&entities_path, &document.markdown)?;
    summary.files.push(entities_path);

    let mut index = IndexSummary::from_store(&store, &namespace.namespace, summary.documented);
    if config.mode == Mode::Categorized {
        let modules = modular::generate_modules(&config.modules_dir, out, &namespace)?;
        for module in &modules {
            summary.files.push(out.join(&module.output));
        }
        if !modules.is_empty() {
            summary
                .files
                .push(out.join(modular::MODULES_SUBDIR).join(INDEX_MD_FILE));
        }
        index.modules = modules
            .iter()
            .map(|m| m.output.to_string_lossy().replace('\\', "/"))
            .collect();
    }

    let index_md = out.join(INDEX_MD_FILE);
    writer::write_markdown(&index_md, &index.to_markdown())?;
    summary.files.push(index_md);

    let index_json = out.join(INDEX_JSON_FILE);
    writer::write_json(&index_json, &index)?;
    summary.files.push(index_json);

    info!(
        out = %out.display(),
        documented = summary.documented,
        files = summary.files.len(),
        "documentation generated"
    );
    Ok(summary)
}
