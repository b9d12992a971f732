//! Assembles the entity document: candidate discovery, undocumented-entity
//! policy, sorting, table of contents and section concatenation.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use waterframe_graph::{vocab, Term, TripleStore};

use crate::extractor::{extract_term, EntityKind, EntityRecord};
use crate::linker::Linker;
use crate::namespace::OntologyNamespace;
use crate::renderer::{render_section, RenderOptions};

/// Title of the flat entity document.
pub const DEFAULT_TITLE: &str = "Ontology Entities";

/// What to do with entities that have neither labels nor descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undocumented {
    /// Leave them out of the document.
    Skip,
    /// Render them with placeholder text.
    Placeholder,
}

/// Assembly switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Level-one heading of the document.
    pub title: String,
    /// Also consider `http(s)` IRIs of the ontology that only appear in
    /// object position. Applies only when undocumented entities are skipped,
    /// so discovered names never turn into placeholder sections.
    pub discover_objects: bool,
    /// Policy for entities without labels or descriptions.
    pub undocumented: Undocumented,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            discover_objects: true,
            undocumented: Undocumented::Skip,
        }
    }
}

/// An assembled markdown document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The rendered markdown.
    pub markdown: String,
    /// Records of the documented entities, in section order.
    pub entities: Vec<EntityRecord>,
    /// IRIs left out because they carry no documentation.
    pub skipped: Vec<String>,
    /// IRIs whose extraction failed, with the error message.
    pub failed: Vec<(String, String)>,
}

/// Builds one document from one store.
pub struct Assembler<'a> {
    store: &'a dyn TripleStore,
    namespace: &'a OntologyNamespace,
    options: AssembleOptions,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler over `store`, linking within `namespace`.
    pub fn new(
        store: &'a dyn TripleStore,
        namespace: &'a OntologyNamespace,
        options: AssembleOptions,
    ) -> Self {
        Self {
            store,
            namespace,
            options,
        }
    }

    /// The IRIs that will be considered for documentation.
    ///
    /// Every IRI subject declared as a class, object property, datatype
    /// property or named individual. With `discover_objects` under the skip
    /// policy, also every `http://` or `https://` IRI inside the ontology
    /// namespace that appears as an object. Vocabulary terms such as
    /// `owl:Class` or `xsd:decimal` are never discovered.
    pub fn candidates(&self) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let kinds = [
            EntityKind::Class,
            EntityKind::ObjectProperty,
            EntityKind::DatatypeProperty,
            EntityKind::Individual,
        ];
        for type_iri in kinds.iter().filter_map(|k| k.type_iri()) {
            let type_term = Term::iri(type_iri);
            found.extend(
                self.store
                    .subjects(vocab::RDF_TYPE, &type_term)
                    .filter_map(|s| s.as_iri().map(str::to_string)),
            );
        }

        if self.options.discover_objects && self.options.undocumented == Undocumented::Skip {
            let linker = self.plain_linker();
            found.extend(
                self.store
                    .triples()
                    .filter_map(|t| match t.object {
                        Term::Iri(iri) => Some(iri),
                        _ => None,
                    })
                    .filter(|iri| iri.starts_with("http://") || iri.starts_with("https://"))
                    .filter(|iri| linker.is_internal(iri)),
            );
        }
        found
    }

    /// Extracts, filters, sorts and renders every candidate.
    ///
    /// A candidate whose extraction fails is logged and left out; the rest of
    /// the document is still produced.
    pub fn assemble(&self) -> Document {
        let candidates = self.candidates();
        info!(count = candidates.len(), "found entities to document");

        let mut doc = Document::default();
        for iri in candidates {
            match extract_term(self.store, &Term::iri(iri.as_str())) {
                Ok(record) => {
                    if record.local_name.is_empty() {
                        // e.g. `https://host/path/`: nothing to title a section with.
                        debug!(entity = %iri, "skipping entity without a local name");
                        doc.skipped.push(iri);
                    } else if record.is_undocumented()
                        && self.options.undocumented == Undocumented::Skip
                    {
                        debug!(entity = %iri, "skipping entity without labels or descriptions");
                        doc.skipped.push(iri);
                    } else {
                        doc.entities.push(record);
                    }
                }
                Err(e) => {
                    warn!(entity = %iri, error = %e, "failed to extract entity");
                    doc.failed.push((iri, e.to_string()));
                }
            }
        }

        doc.entities.sort_by(|a, b| {
            a.local_name
                .to_lowercase()
                .cmp(&b.local_name.to_lowercase())
                .then_with(|| a.uri.cmp(&b.uri))
        });

        let linker = self
            .plain_linker()
            .with_targets(doc.entities.iter().map(|r| r.uri.as_str()));

        doc.markdown = self.render(&doc.entities, &linker);
        info!(
            documented = doc.entities.len(),
            skipped = doc.skipped.len(),
            failed = doc.failed.len(),
            "assembled entity document"
        );
        doc
    }

    fn plain_linker(&self) -> Linker {
        Linker::new(&self.namespace.namespace, &self.namespace.base)
    }

    fn render(&self, entities: &[EntityRecord], linker: &Linker) -> String {
        let render_options = RenderOptions {
            placeholders: self.options.undocumented == Undocumented::Placeholder,
        };

        let mut out = format!(
            "# {}\n\nThis document contains all entities defined in the ontology.\n\n",
            self.options.title
        );

        if !entities.is_empty() {
            out.push_str("## Table of Contents\n\n");
            for record in entities {
                let _ = writeln!(out, "- {}", linker.link(&record.local_name));
            }
            out.push_str("\n---\n\n");
        }

        for record in entities {
            out.push_str(&render_section(record, linker, render_options));
            out.push_str("\n---\n\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceSource;
    use waterframe_graph::{parse_turtle, Graph};

    const SRC: &str = r#"
@prefix : <http://test.example.org/onto#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

:zeta a owl:Class ; rdfs:label "zeta" .
:Alpha a owl:Class ; rdfs:label "Alpha" ; rdfs:subClassOf :Hidden ; :partOf :Orphan .
:Hidden a owl:Class .
:Orphan rdfs:label "orphan" .
:beta a owl:ObjectProperty ; rdfs:comment "b" ;
    rdfs:range <http://purl.obolibrary.org/obo/BFO_1> .
<http://purl.obolibrary.org/obo/BFO_1> rdfs:label "upper" .
"#;

    const ORPHAN: &str = "http://test.example.org/onto#Orphan";
    const UPPER: &str = "http://purl.obolibrary.org/obo/BFO_1";

    fn graph() -> Graph {
        match parse_turtle(SRC) {
            Ok(g) => g,
            Err(e) => panic!("fixture should parse: {e}"),
        }
    }

    fn ns() -> OntologyNamespace {
        OntologyNamespace::from_namespace(
            "http://test.example.org/onto#",
            NamespaceSource::DefaultPrefix,
        )
    }

    fn placeholders() -> AssembleOptions {
        AssembleOptions {
            undocumented: Undocumented::Placeholder,
            ..AssembleOptions::default()
        }
    }

    #[test]
    fn discovery_only_admits_internal_objects() {
        let g = graph();
        let ns = ns();
        let with = Assembler::new(&g, &ns, AssembleOptions::default()).candidates();
        assert!(with.contains(ORPHAN));
        assert!(!with.contains(UPPER));
        assert!(!with.contains("http://www.w3.org/2002/07/owl#Class"));
        let without = Assembler::new(
            &g,
            &ns,
            AssembleOptions {
                discover_objects: false,
                ..AssembleOptions::default()
            },
        )
        .candidates();
        assert!(!without.contains(ORPHAN));
        assert_eq!(without.len(), 4);
    }

    #[test]
    fn placeholder_policy_disables_discovery() {
        let g = graph();
        let ns = ns();
        let candidates = Assembler::new(&g, &ns, placeholders()).candidates();
        assert!(!candidates.contains(ORPHAN));
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn sections_are_sorted_case_insensitively() {
        let g = graph();
        let ns = ns();
        let doc = Assembler::new(&g, &ns, AssembleOptions::default()).assemble();
        let names: Vec<_> = doc.entities.iter().map(|r| r.local_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Orphan", "zeta"]);
        let alpha = doc.markdown.find("## Alpha {#alpha}");
        let zeta = doc.markdown.find("## zeta {#zeta}");
        assert!(alpha < zeta);
    }

    #[test]
    fn external_iris_are_never_linked() {
        let g = graph();
        let ns = ns();
        let doc = Assembler::new(&g, &ns, AssembleOptions::default()).assemble();
        assert!(!doc.markdown.contains("(#bfo_1)"));
        assert!(!doc.markdown.contains("{#bfo_1}"));
        assert!(doc.markdown.contains("- [Orphan](#orphan)\n"));
    }

    #[test]
    fn undocumented_entities_follow_the_policy() {
        let g = graph();
        let ns = ns();
        let skipped = Assembler::new(&g, &ns, AssembleOptions::default()).assemble();
        assert!(skipped.skipped.contains(&"http://test.example.org/onto#Hidden".to_string()));
        assert!(!skipped.markdown.contains("{#hidden}"));
        // No heading, so the superclass degrades to inline code.
        assert!(skipped.markdown.contains("- `Hidden`"));

        let placeholder = Assembler::new(&g, &ns, placeholders()).assemble();
        assert!(placeholder.markdown.contains("## Hidden {#hidden}"));
        assert!(placeholder.markdown.contains("- [Hidden](#hidden)"));
    }

    #[test]
    fn table_of_contents_precedes_sections() {
        let g = graph();
        let ns = ns();
        let doc = Assembler::new(&g, &ns, AssembleOptions::default()).assemble();
        assert!(doc.markdown.starts_with("# Ontology Entities\n"));
        let toc = doc.markdown.find("## Table of Contents").unwrap_or(usize::MAX);
        let first = doc.markdown.find("## Alpha").unwrap_or(0);
        assert!(toc < first);
        assert!(doc.markdown.contains("- [beta](#beta)\n"));
        assert_eq!(doc.markdown.matches("\n---\n").count(), 5);
    }

    #[test]
    fn empty_store_yields_title_only() {
        let g = Graph::new();
        let ns = ns();
        let doc = Assembler::new(&g, &ns, AssembleOptions::default()).assemble();
        assert!(doc.entities.is_empty());
        assert!(!doc.markdown.contains("Table of Contents"));
    }
}
