//! Per-module documentation.
//!
//! Each `*.ttl` file under the modules directory is loaded into its own
//! store and documented on its own, so a module document only links to
//! entities that module declares. Output mirrors the source tree under
//! `<output>/modules/`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;
use waterframe_graph::{load_turtle, TripleStore};

use crate::assembler::{AssembleOptions, Assembler, Undocumented};
use crate::index::OntologyMetadata;
use crate::namespace::{NamespaceSource, OntologyNamespace};
use crate::writer::write_markdown;

/// Directory, relative to the output root, holding module documents.
pub const MODULES_SUBDIR: &str = "modules";

/// One generated module document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDoc {
    /// Source file, relative to the modules directory.
    pub source: PathBuf,
    /// Generated file, relative to the output root.
    pub output: PathBuf,
    /// Number of sections in the document.
    pub entities: usize,
}

/// Returns every `*.ttl` file below `modules_dir`, in sorted order.
pub fn discover_modules(modules_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(modules_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable module path");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "ttl").unwrap_or(false))
        .map(|e| e.into_path())
        .collect()
}

/// Documents every module below `modules_dir` into `out_dir/modules/`.
///
/// Modules that fail to load are logged and skipped. A module without its
/// own namespace declaration is linked against `parent`.
///
/// # Errors
///
/// Returns an error only if an output file cannot be written.
pub fn generate_modules(
    modules_dir: &Path,
    out_dir: &Path,
    parent: &OntologyNamespace,
) -> Result<Vec<ModuleDoc>> {
    if !modules_dir.is_dir() {
        warn!(
            path = %modules_dir.display(),
            "modules directory not found, no module documents generated"
        );
        return Ok(Vec::new());
    }

    let mut docs = Vec::new();
    for path in discover_modules(modules_dir) {
        let graph = match load_turtle(&path) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(error = %e, "skipping module");
                continue;
            }
        };

        let namespace = module_namespace(&graph, parent);

        let relative = path.strip_prefix(modules_dir).unwrap_or(&path).to_path_buf();
        let metadata = OntologyMetadata::from_store(&graph);
        let title = if metadata.uri.is_empty() {
            module_title(&relative)
        } else {
            metadata.title
        };

        let options = AssembleOptions {
            title,
            discover_objects: false,
            undocumented: Undocumented::Placeholder,
        };
        let document = Assembler::new(&graph, &namespace, options).assemble();

        let output = Path::new(MODULES_SUBDIR).join(relative.with_extension("md"));
        write_markdown(&out_dir.join(&output), &document.markdown)?;
        info!(
            module = %relative.display(),
            entities = document.entities.len(),
            "generated module document"
        );
        docs.push(ModuleDoc {
            source: relative,
            output,
            entities: document.entities.len(),
        });
    }

    if !docs.is_empty() {
        write_markdown(
            &out_dir.join(MODULES_SUBDIR).join("index.md"),
            &render_module_index(&docs),
        )?;
    }
    Ok(docs)
}

/// The namespace a module document links against: the module's own
/// declaration if it has one, otherwise `parent`.
pub fn module_namespace(module: &dyn TripleStore, parent: &OntologyNamespace) -> OntologyNamespace {
    let detected = OntologyNamespace::detect(module, &parent.namespace);
    if detected.source == NamespaceSource::Fallback {
        parent.clone()
    } else {
        detected
    }
}

/// Renders `modules/index.md`. Links are relative to the modules directory.
pub fn render_module_index(docs: &[ModuleDoc]) -> String {
    let mut out = String::from("# Ontology Modules\n\n");
    for doc in docs {
        let target = doc.output.strip_prefix(MODULES_SUBDIR).unwrap_or(&doc.output);
        let _ = writeln!(
            out,
            "- [{}]({}) ({} entities)",
            module_title(&doc.source),
            link_path(target),
            doc.entities
        );
    }
    out.push('\n');
    out
}

/// `core/material_entities.ttl` becomes `core/material_entities`.
fn module_title(relative: &Path) -> String {
    link_path(&relative.with_extension(""))
}

/// Joins path components with `/` regardless of platform.
fn link_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
