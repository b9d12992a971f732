//! waterFRAME documentation conformance suite.
//!
//! Validates a generated documentation directory against the ontology it
//! was generated from. The checks are the guarantees the generator makes
//! about its output.
//!
//! # Conformance Scope
//!
//! | Check | Guarantee |
//! |-------|-----------|
//! | `docs/links` | Every `#anchor` link resolves to an entity inside the namespace |
//! | `docs/coverage` | Every typed entity with a label or description has a section |
//! | `docs/inventory` | Published entity counts equal the store's `rdf:type` counts |
//!
//! `docs/links` also requires headings and links to use the same anchor
//! rule, and rejects anchors that encode a full URI.
//!
//! # Entry Point
//!
//! ```no_run
//! use waterframe_conformance::{DocsPaths, run_all};
//! use std::path::PathBuf;
//!
//! let paths = DocsPaths {
//!     ontology: PathBuf::from("data/ontology/waterframe.ttl"),
//!     docs: PathBuf::from("docs"),
//!     fallback_namespace: "http://example.org/waterFRAME#".to_string(),
//!     modules: Some(PathBuf::from("data/ontology/modules")),
//! };
//! let report = run_all(&paths).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod outline;
pub mod report;
pub mod validators;

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use waterframe_docs::modular::{discover_modules, module_namespace, MODULES_SUBDIR};
use waterframe_docs::namespace::OntologyNamespace;
use waterframe_graph::{load_turtle, Graph, TripleStore};

pub use report::{CheckResult, ConformanceReport, Severity};
pub use validators::links::DocNamespaces;

/// Paths required by the conformance runner.
#[derive(Debug, Clone)]
pub struct DocsPaths {
    /// The Turtle file the documentation was generated from.
    pub ontology: PathBuf,
    /// The generated documentation directory.
    pub docs: PathBuf,
    /// Namespace used when the ontology declares none; must match the
    /// generator's setting.
    pub fallback_namespace: String,
    /// Module sources of a categorized run. Their entities count towards
    /// coverage and their documents are linked against their own namespace.
    pub modules: Option<PathBuf>,
}

/// Runs all validators and returns the aggregated report.
///
/// Validators run in this order:
/// 1. Ontology load (a store is required for the remaining checks)
/// 2. Module load, for categorized output
/// 3. Links and anchors
/// 4. Entity counts, against the ontology alone
/// 5. Entity coverage, against the ontology merged with its modules
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(paths: &DocsPaths) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    // 1. Unlike generation, checking needs a real store.
    let mut store = match load_turtle(&paths.ontology) {
        Ok(store) => {
            report.push(CheckResult::pass(
                "ontology/load",
                format!("Loaded {} triples", store.len()),
            ));
            store
        }
        Err(e) => {
            report.push(CheckResult::fail("ontology/load", e.to_string()));
            return Ok(report);
        }
    };
    let namespace = OntologyNamespace::detect(&store, &paths.fallback_namespace);

    // 2. Modules
    let modules = match &paths.modules {
        Some(dir) => load_modules(dir, &mut report),
        None => Vec::new(),
    };
    let namespaces = modules
        .iter()
        .fold(DocNamespaces::new(namespace.clone()), |acc, (doc, graph)| {
            acc.with_file(doc.clone(), module_namespace(graph, &namespace))
        });

    // 3. Links
    report.extend(validators::links::validate(&paths.docs, &namespaces)?);

    // 4. Inventory
    report.extend(validators::inventory::validate(&store, &paths.docs)?);

    // 5. Coverage
    for (doc, graph) in modules {
        if let Err(e) = store.merge(graph) {
            report.push(CheckResult::fail("modules/load", format!("{doc}: {e}")));
            return Ok(report);
        }
    }
    report.extend(validators::coverage::validate(&store, &paths.docs)?);

    info!(
        checks = report.results.len(),
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "conformance run complete"
    );
    Ok(report)
}

/// Loads every module below `dir`, keyed by the path of its generated
/// document relative to the docs directory.
fn load_modules(dir: &Path, report: &mut ConformanceReport) -> Vec<(String, Graph)> {
    let mut loaded = Vec::new();
    let mut failed = Vec::new();
    for path in discover_modules(dir) {
        let relative = path.strip_prefix(dir).unwrap_or(&path);
        let doc = Path::new(MODULES_SUBDIR)
            .join(relative.with_extension("md"))
            .to_string_lossy()
            .replace('\\', "/");
        match load_turtle(&path) {
            Ok(graph) => loaded.push((doc, graph)),
            Err(e) => {
                warn!(error = %e, "module not checked");
                failed.push(e.to_string());
            }
        }
    }

    if failed.is_empty() {
        report.push(CheckResult::pass(
            "modules/load",
            format!("Loaded {} module(s)", loaded.len()),
        ));
    } else {
        // The generator skips these too, so there is nothing to compare.
        report.push(CheckResult::warn_with_details(
            "modules/load",
            format!("{} module(s) failed to load", failed.len()),
            failed,
        ));
    }
    loaded
}
