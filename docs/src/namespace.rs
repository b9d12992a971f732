//! Ontology namespace detection.
//!
//! Precedence: the default (empty) prefix binding, then the IRI of the first
//! `owl:Ontology` declaration, then the configured fallback. Detection never
//! fails.

use tracing::{info, warn};
use waterframe_graph::{vocab, Term, TripleStore};

/// Namespace used when the store gives no usable hint.
pub const DEFAULT_FALLBACK_NAMESPACE: &str = "http://example.org/waterFRAME#";

/// Which precedence rule produced the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceSource {
    /// The default (`:`) prefix binding.
    DefaultPrefix,
    /// The IRI of the `owl:Ontology` declaration.
    OntologyDeclaration,
    /// The configured fallback value.
    Fallback,
}

/// The namespace entities are qualified with, and the base used to decide
/// whether an IRI belongs to the ontology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyNamespace {
    /// Namespace IRI, e.g. `"https://ugentbiomath.github.io/waterframe#"`.
    pub namespace: String,
    /// Namespace without its trailing `#`.
    pub base: String,
    /// The rule that produced this namespace.
    pub source: NamespaceSource,
}

impl OntologyNamespace {
    /// Uses `namespace` verbatim; the base drops a trailing `#`.
    pub fn from_namespace(namespace: impl Into<String>, source: NamespaceSource) -> Self {
        let namespace = namespace.into();
        let base = namespace.trim_end_matches('#').to_string();
        Self {
            namespace,
            base,
            source,
        }
    }

    /// Derives a `#`-terminated namespace from a base IRI.
    pub fn from_base(base: &str, source: NamespaceSource) -> Self {
        let base = base.trim_end_matches('#').to_string();
        Self {
            namespace: format!("{base}#"),
            base,
            source,
        }
    }

    /// Detects the namespace of `store`, using `fallback` as last resort.
    pub fn detect(store: &dyn TripleStore, fallback: &str) -> Self {
        if let Some(binding) = store.namespaces().iter().find(|b| b.is_default()) {
            let ns = Self::from_namespace(binding.iri.clone(), NamespaceSource::DefaultPrefix);
            info!(namespace = %ns.namespace, "using namespace from default prefix");
            return ns;
        }

        let ontology = Term::iri(vocab::OWL_ONTOLOGY);
        let declared = store
            .subjects(vocab::RDF_TYPE, &ontology)
            .find_map(|s| s.as_iri().map(str::to_string));
        if let Some(iri) = declared {
            let ns = Self::from_base(&iri, NamespaceSource::OntologyDeclaration);
            info!(namespace = %ns.namespace, "using namespace from ontology declaration");
            return ns;
        }

        let ns = Self::from_base(fallback, NamespaceSource::Fallback);
        warn!(
            namespace = %ns.namespace,
            "could not detect ontology namespace, using fallback"
        );
        ns
    }
}
