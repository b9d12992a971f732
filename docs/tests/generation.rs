//! End-to-end checks on the documentation generated for the test fixtures:
//! anchor/link consistency, coverage, classification and index counts.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use waterframe_docs::assembler::Undocumented;
use waterframe_docs::config::{Config, Mode};
use waterframe_docs::extractor::{extract, EntityKind};
use waterframe_docs::index::IndexSummary;
use waterframe_docs::linker::anchor_id;
use waterframe_docs::namespace::{
    NamespaceSource, OntologyNamespace, DEFAULT_FALLBACK_NAMESPACE,
};
use waterframe_docs::{generate, GenerationSummary};
use waterframe_graph::{load_turtle, vocab, Term, TripleStore};

const NS: &str = "http://test.example.org/onto#";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(config: Config) -> (tempfile::TempDir, GenerationSummary, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        output_dir: dir.path().join("docs"),
        ..config
    };
    let summary = generate(&config).expect("generation should succeed");
    let markdown =
        fs::read_to_string(dir.path().join("docs/entities.md")).expect("entities.md is written");
    (dir, summary, markdown)
}

fn run_minimal() -> (tempfile::TempDir, GenerationSummary, String) {
    run(Config {
        ontology: fixture("minimal_ontology.ttl"),
        ..Config::default()
    })
}

/// `(name, anchor)` for every `## name {#anchor}` heading.
fn headings(markdown: &str) -> Vec<(String, String)> {
    let re = Regex::new(r"(?m)^## (\S+) \{#([^}]+)\}$").expect("heading regex");
    re.captures_iter(markdown)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// `(text, anchor)` for every in-document link.
fn links(markdown: &str) -> Vec<(String, String)> {
    let re = Regex::new(r"\[([^\]]+)\]\(#([^)]+)\)").expect("link regex");
    re.captures_iter(markdown)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// `anchor -> URI` for every entity section.
fn section_uris(markdown: &str) -> BTreeMap<String, String> {
    let re = Regex::new(concat!(
        r"(?m)^## \S+ \{#([^}]+)\}\n\n",
        r"\*\*Type:\*\* [^\n]+\n\n",
        r"\*\*URI:\*\* `([^`]+)`",
    ))
    .expect("section regex");
    re.captures_iter(markdown)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// Heading anchors equal `anchor_id(namespace + local_name)`, and every link
/// to an entity uses that same anchor.
#[test]
fn headings_and_links_agree() {
    let (_dir, _, md) = run_minimal();
    let heads = headings(&md);
    assert_eq!(heads.len(), 7, "unexpected sections: {heads:?}");
    for (name, anchor) in &heads {
        assert_eq!(anchor, &anchor_id(&format!("{NS}{name}")));
    }
    for (text, anchor) in links(&md) {
        assert_eq!(anchor, anchor_id(&format!("{NS}{text}")), "link text {text}");
    }
}

/// Every `#anchor` link resolves to a heading in the same document.
#[test]
fn no_dangling_links() {
    let (_dir, _, md) = run_minimal();
    let anchors: BTreeSet<String> = headings(&md).into_iter().map(|(_, a)| a).collect();
    let all = links(&md);
    assert!(!all.is_empty());
    for (text, anchor) in all {
        assert!(anchors.contains(&anchor), "dangling link [{text}](#{anchor})");
    }
}

/// External IRIs never become internal links.
#[test]
fn external_iris_are_not_linked() {
    let (_dir, _, md) = run_minimal();
    assert!(!md.contains("](#http"));
    assert!(!md.contains("(#bfo_0000040)"));
    assert!(md.contains("- `BFO_0000040`"));
    assert!(md.contains("- **seeAlso**: `https://www.w3.org/TR/owl2-overview/`"));
    assert!(md.contains("- **testProperty**: [subIndividual](#subindividual)"));
    assert!(md.contains("- **testDataProperty**: 7.2"));
}

/// The fixture's classes, property and individual are classified and
/// related the way they are declared.
#[test]
fn fixture_round_trip_classification() {
    let store = load_turtle(&fixture("minimal_ontology.ttl")).expect("fixture loads");

    let class = extract(&store, &format!("{NS}TestClass")).expect("TestClass");
    assert_eq!(class.kind(), EntityKind::Class);
    assert!(class.labels.contains(&"Test Class".to_string()));
    assert!(class.subclasses.contains(&"SubClass".to_string()));

    let sub = extract(&store, &format!("{NS}SubClass")).expect("SubClass");
    assert!(sub.superclasses.contains(&"TestClass".to_string()));

    let prop = extract(&store, &format!("{NS}testProperty")).expect("testProperty");
    assert_eq!(prop.kind(), EntityKind::ObjectProperty);
    assert_eq!(prop.domains, vec!["TestClass"]);
    assert_eq!(prop.ranges, vec!["SubClass"]);

    let individual = extract(&store, &format!("{NS}testIndividual")).expect("testIndividual");
    assert_eq!(individual.kind(), EntityKind::Individual);
    assert_eq!(individual.instance_of, vec!["TestClass"]);
    assert!(individual
        .property_values
        .iter()
        .any(|pv| pv.property == "testProperty" && pv.is_uri));
}

/// Every typed entity with a label or description has a section.
#[test]
fn documented_entities_are_covered() {
    let (_dir, summary, md) = run_minimal();
    let store = load_turtle(&fixture("minimal_ontology.ttl")).expect("fixture loads");
    let names: BTreeSet<String> = headings(&md).into_iter().map(|(n, _)| n).collect();

    let mut expected = 0;
    for kind in [
        EntityKind::Class,
        EntityKind::ObjectProperty,
        EntityKind::DatatypeProperty,
        EntityKind::Individual,
    ] {
        let type_iri = Term::iri(kind.type_iri().expect("declared kinds have a type IRI"));
        for subject in store.subjects(vocab::RDF_TYPE, &type_iri) {
            let record = extract(&store, subject.value()).expect("typed subject");
            if !record.is_undocumented() {
                expected += 1;
                assert!(names.contains(&record.local_name), "{} missing", record.local_name);
            }
        }
    }
    assert_eq!(expected, 7);
    assert_eq!(summary.documented, 7);
    assert!(!names.contains("UndocumentedClass"));
}

/// `index.json` counts equal the direct rdf:type counts of the store.
#[test]
fn index_counts_match_the_store() {
    let (dir, _, _) = run_minimal();
    let json = fs::read_to_string(dir.path().join("docs/index.json")).expect("index.json");
    let summary: IndexSummary = serde_json::from_str(&json).expect("index.json parses");

    assert_eq!(summary.counts.classes, 3);
    assert_eq!(summary.counts.object_properties, 2);
    assert_eq!(summary.counts.datatype_properties, 1);
    assert_eq!(summary.counts.named_individuals, 2);
    assert_eq!(summary.counts.total, 8);
    assert_eq!(summary.metadata.title, "Test Ontology");
    assert_eq!(summary.namespace, NS);

    let index = fs::read_to_string(dir.path().join("docs/index.md")).expect("index.md");
    assert!(index.contains("Classes:** 3"));
    assert!(index.contains("Object Properties:** 2"));
    assert!(index.contains("Total Entities:** 8"));
}

/// Sections follow the case-insensitive order of their names, as does the
/// table of contents.
#[test]
fn sections_are_alphabetical() {
    let (_dir, _, md) = run_minimal();
    let names: Vec<String> = headings(&md).into_iter().map(|(n, _)| n).collect();
    let mut sorted = names.clone();
    sorted.sort_by_key(|n| n.to_lowercase());
    assert_eq!(names, sorted);
    assert_eq!(names.first().map(String::as_str), Some("inverseTestProperty"));

    let toc_end = md.find("\n---\n").expect("table of contents separator");
    let toc: Vec<String> = links(&md[..toc_end]).into_iter().map(|(t, _)| t).collect();
    assert_eq!(toc, names);
}

/// The default prefix wins over a differing ontology declaration, and
/// case-variant names share an anchor.
#[test]
fn namespace_edge_cases() {
    let store = load_turtle(&fixture("namespace_edge_cases.ttl")).expect("fixture loads");
    let ns = OntologyNamespace::detect(&store, DEFAULT_FALLBACK_NAMESPACE);
    assert_eq!(ns.namespace, "http://mismatch.example.org/test#");
    assert_eq!(ns.source, NamespaceSource::DefaultPrefix);

    let (_dir, _, md) = run(Config {
        ontology: fixture("namespace_edge_cases.ttl"),
        ..Config::default()
    });
    let anchors: Vec<String> = headings(&md).into_iter().map(|(_, a)| a).collect();
    assert_eq!(anchors.iter().filter(|a| a.as_str() == "pump").count(), 2);
    assert!(anchors.contains(&"pump.v2".to_string()));
}

/// Placeholder mode documents entities that have no text.
#[test]
fn placeholder_mode_keeps_undocumented_entities() {
    let (_dir, summary, md) = run(Config {
        ontology: fixture("minimal_ontology.ttl"),
        discover_objects: false,
        undocumented: Some(Undocumented::Placeholder),
        ..Config::default()
    });
    assert_eq!(summary.documented, 8);
    assert!(md.contains("## UndocumentedClass {#undocumentedclass}"));
    assert!(md.contains("*No description available.*"));
}

/// Categorized mode writes one document per module plus a module index.
#[test]
fn categorized_mode_writes_module_documents() {
    let (dir, summary, _) = run(Config {
        ontology: fixture("minimal_ontology.ttl"),
        modules_dir: fixture("modules"),
        mode: Mode::Categorized,
        ..Config::default()
    });
    let out = dir.path().join("docs");
    let material = fs::read_to_string(out.join("modules/core/material_entities.md"))
        .expect("core module document");
    assert!(material.starts_with("# Material Entities\n"));
    assert!(material.contains("## Clarifier {#clarifier}"));
    assert!(material.contains("- [Tank](#tank)"));
    assert!(material.contains("*No label defined.*"));

    let bridge = fs::read_to_string(out.join("modules/bridges/tank_properties.md"))
        .expect("bridge module document");
    assert!(bridge.contains("## hasVolume {#hasvolume}"));
    // Tank is declared in another module, so there is nothing to link to.
    assert!(bridge.contains("- `Tank`"));

    let index = fs::read_to_string(out.join("modules/index.md")).expect("module index");
    assert!(index.contains("(core/material_entities.md)"));
    let top = fs::read_to_string(out.join("index.md")).expect("index.md");
    assert!(top.contains("(modules/index.md)"));

    // In categorized mode entities.md also uses placeholders by default.
    assert_eq!(summary.documented, 8);
    assert!(summary
        .files
        .iter()
        .any(|f| f.ends_with("modules/bridges/tank_properties.md")));
}

/// With placeholders and object discovery both on, entities.md still only
/// documents the ontology's own typed entities, and every link lands on a
/// section inside the namespace.
#[test]
fn categorized_entities_stay_inside_the_namespace() {
    let (_dir, summary, md) = run(Config {
        ontology: fixture("minimal_ontology.ttl"),
        modules_dir: fixture("modules"),
        mode: Mode::Categorized,
        discover_objects: true,
        ..Config::default()
    });
    assert_eq!(summary.documented, 8);

    let anchors: BTreeSet<String> = headings(&md).into_iter().map(|(_, a)| a).collect();
    for vocabulary in ["class", "decimal", "ontology", "bfo_0000040", "owl2-overview"] {
        assert!(!anchors.contains(vocabulary), "unexpected section #{vocabulary}");
    }

    let uris = section_uris(&md);
    assert_eq!(uris.len(), 8);
    assert!(uris.values().all(|uri| uri.starts_with(NS)));
    for (text, anchor) in links(&md) {
        let target = uris.get(&anchor).unwrap_or_else(|| panic!("dangling [{text}](#{anchor})"));
        assert!(target.starts_with(NS), "[{text}](#{anchor}) targets {target}");
    }
    assert!(md.contains("- `BFO_0000040`"));
}

/// An ontology that exists but does not parse is reported and replaced by
/// an empty store; the documentation set is still written.
#[test]
fn malformed_ontology_still_writes_the_documentation_set() {
    let (dir, summary, md) = run(Config {
        ontology: fixture("malformed_ontology.ttl"),
        ..Config::default()
    });
    assert_eq!(summary.namespace, DEFAULT_FALLBACK_NAMESPACE);
    assert_eq!(summary.documented, 0);
    assert!(md.starts_with("# Ontology Entities\n"));
    assert!(!md.contains("Table of Contents"));

    let out = dir.path().join("docs");
    assert!(out.join("index.md").is_file());
    let json = fs::read_to_string(out.join("index.json")).expect("index.json");
    let index: IndexSummary = serde_json::from_str(&json).expect("index.json parses");
    assert_eq!(index.counts.total, 0);
    assert_eq!(index.namespace, DEFAULT_FALLBACK_NAMESPACE);
}
