//! The index summary: ontology metadata and per-type entity counts, written
//! as `index.md` for readers and `index.json` for the conformance suite.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use waterframe_graph::{vocab, Term, TripleStore};

use crate::extractor::EntityKind;

/// Title used when the ontology declaration has no label.
pub const DEFAULT_INDEX_TITLE: &str = "Ontology Documentation";

/// Metadata read from the first `owl:Ontology` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyMetadata {
    /// `rdfs:label`, or [`DEFAULT_INDEX_TITLE`].
    pub title: String,
    /// `rdfs:comment`.
    pub description: String,
    /// `owl:versionInfo`.
    pub version: String,
    /// `skos:definition`.
    pub definition: String,
    /// `dc:creator`.
    pub creator: String,
    /// Every `dc:contributor`.
    pub contributors: Vec<String>,
    /// `dc:rights`.
    pub license: String,
    /// The ontology IRI, empty if there is no declaration.
    pub uri: String,
}

impl Default for OntologyMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_INDEX_TITLE.to_string(),
            description: String::new(),
            version: String::new(),
            definition: String::new(),
            creator: String::new(),
            contributors: Vec::new(),
            license: String::new(),
            uri: String::new(),
        }
    }
}

impl OntologyMetadata {
    /// Reads metadata from the first ontology declaration in `store`. Only
    /// the first value of each single-valued field is used.
    pub fn from_store(store: &dyn TripleStore) -> Self {
        let mut meta = Self::default();
        let ontology = Term::iri(vocab::OWL_ONTOLOGY);
        let Some(subject) = store
            .subjects(vocab::RDF_TYPE, &ontology)
            .find(Term::is_iri)
        else {
            return meta;
        };

        let first = |predicate: &str| {
            store
                .objects(&subject, predicate)
                .next()
                .map(|o| o.value().to_string())
        };

        meta.uri = subject.value().to_string();
        if let Some(title) = first(vocab::RDFS_LABEL) {
            meta.title = title;
        }
        meta.description = first(vocab::RDFS_COMMENT).unwrap_or_default();
        meta.version = first(vocab::OWL_VERSION_INFO).unwrap_or_default();
        meta.definition = first(vocab::SKOS_DEFINITION).unwrap_or_default();
        meta.creator = first(vocab::DC_CREATOR).unwrap_or_default();
        meta.license = first(vocab::DC_RIGHTS).unwrap_or_default();
        meta.contributors = store
            .objects(&subject, vocab::DC_CONTRIBUTOR)
            .map(|o| o.value().to_string())
            .collect();
        meta
    }
}

/// Number of distinct subjects declared with each OWL type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    /// `owl:Class` subjects.
    pub classes: usize,
    /// `owl:ObjectProperty` subjects.
    pub object_properties: usize,
    /// `owl:DatatypeProperty` subjects.
    pub datatype_properties: usize,
    /// `owl:NamedIndividual` subjects.
    pub named_individuals: usize,
    /// Sum of the four counts above.
    pub total: usize,
}

impl EntityCounts {
    /// Counts direct `rdf:type` declarations; no inference.
    pub fn from_store(store: &dyn TripleStore) -> Self {
        let count = |kind: EntityKind| {
            kind.type_iri().map_or(0, |iri| {
                store.subjects(vocab::RDF_TYPE, &Term::iri(iri)).count()
            })
        };
        let classes = count(EntityKind::Class);
        let object_properties = count(EntityKind::ObjectProperty);
        let datatype_properties = count(EntityKind::DatatypeProperty);
        let named_individuals = count(EntityKind::Individual);
        Self {
            classes,
            object_properties,
            datatype_properties,
            named_individuals,
            total: classes + object_properties + datatype_properties + named_individuals,
        }
    }
}

/// Everything `index.md` and `index.json` report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Ontology declaration metadata.
    pub metadata: OntologyMetadata,
    /// The namespace entities were linked against.
    pub namespace: String,
    /// Declared entity counts.
    pub counts: EntityCounts,
    /// Number of sections in `entities.md`.
    pub documented: usize,
    /// Relative paths of the per-module documents, if any.
    #[serde(default)]
    pub modules: Vec<String>,
}

impl IndexSummary {
    /// Collects metadata and counts from `store`.
    pub fn from_store(store: &dyn TripleStore, namespace: &str, documented: usize) -> Self {
        Self {
            metadata: OntologyMetadata::from_store(store),
            namespace: namespace.to_string(),
            counts: EntityCounts::from_store(store),
            documented,
            modules: Vec::new(),
        }
    }

    /// Renders the human-readable `index.md`.
    pub fn to_markdown(&self) -> String {
        let meta = &self.metadata;
        let counts = &self.counts;
        let mut out = format!("# {}\n\n", meta.title);

        if !meta.version.is_empty() {
            let _ = write!(out, "**Version:** {}\n\n", meta.version);
        }
        if !meta.description.is_empty() {
            let _ = write!(out, "{}\n\n", meta.description);
        }
        if !meta.definition.is_empty() {
            let _ = write!(out, "## Overview\n\n{}\n\n", meta.definition);
        }

        out.push_str("## Statistics\n\n");
        let _ = writeln!(out, "- **Classes:** {}", counts.classes);
        let _ = writeln!(out, "- **Object Properties:** {}", counts.object_properties);
        let _ = writeln!(out, "- **Datatype Properties:** {}", counts.datatype_properties);
        let _ = writeln!(out, "- **Named Individuals:** {}", counts.named_individuals);
        let _ = write!(out, "- **Total Entities:** {}\n\n", counts.total);

        out.push_str("## Navigation\n\n");
        out.push_str(
            "- **[Browse All Entities](entities.md)** - \
             Complete documentation of all classes, properties, and individuals\n",
        );
        if !self.modules.is_empty() {
            let _ = writeln!(
                out,
                "- **[Browse Modules](modules/index.md)** - {} module documents",
                self.modules.len()
            );
        }
        out.push('\n');

        if !meta.uri.is_empty() {
            out.push_str("## Ontology Information\n\n");
            let _ = write!(out, "**Ontology URI:** `{}`\n\n", meta.uri);
            let _ = write!(out, "**Namespace:** `{}`\n\n", self.namespace);
        }

        if !meta.creator.is_empty() || !meta.contributors.is_empty() {
            out.push_str("## Authors\n\n");
            if !meta.creator.is_empty() {
                let _ = write!(out, "**Creator:** {}\n\n", meta.creator);
            }
            if !meta.contributors.is_empty() {
                out.push_str("**Contributors:**\n\n");
                for contributor in &meta.contributors {
                    let _ = writeln!(out, "- {contributor}");
                }
                out.push('\n');
            }
        }

        if !meta.license.is_empty() {
            let _ = write!(out, "## License\n\n{}\n\n", meta.license);
        }
        out
    }
}
