//! Ontology inventory validator.
//!
//! Verifies that the counts published in `index.json` equal the number of
//! distinct subjects declared with each OWL type in the store, and that
//! `index.md` reports the same total.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use waterframe_docs::index::IndexSummary;
use waterframe_docs::{INDEX_JSON_FILE, INDEX_MD_FILE};
use waterframe_graph::{vocab, TripleStore};

use crate::report::{CheckResult, ConformanceReport};

const VALIDATOR: &str = "docs/inventory";

/// Compares the published index against `store`.
///
/// # Errors
///
/// Returns an error if `index.json` exists but cannot be read or parsed.
pub fn validate(store: &dyn TripleStore, docs_dir: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let json_path = docs_dir.join(INDEX_JSON_FILE);
    if !json_path.is_file() {
        report.push(CheckResult::fail(
            VALIDATOR,
            format!("{} not found, run waterframe-docs first", json_path.display()),
        ));
        return Ok(report);
    }
    let content = std::fs::read_to_string(&json_path)
        .with_context(|| format!("Failed to read {}", json_path.display()))?;
    let summary: IndexSummary = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as an index summary", json_path.display()))?;

    let declared = declared_subjects(store);
    let actual = |type_iri: &str| declared.get(type_iri).map_or(0, BTreeSet::len);

    let counts = &summary.counts;
    let checks = [
        ("classes", counts.classes, actual(vocab::OWL_CLASS)),
        (
            "object properties",
            counts.object_properties,
            actual(vocab::OWL_OBJECT_PROPERTY),
        ),
        (
            "datatype properties",
            counts.datatype_properties,
            actual(vocab::OWL_DATATYPE_PROPERTY),
        ),
        (
            "named individuals",
            counts.named_individuals,
            actual(vocab::OWL_NAMED_INDIVIDUAL),
        ),
    ];
    let expected_total: usize = checks.iter().map(|(_, _, actual)| actual).sum();

    for (what, published, actual) in checks {
        check_count(&mut report, what, published, actual);
    }
    check_count(&mut report, "total entities", counts.total, expected_total);

    let md_path = docs_dir.join(INDEX_MD_FILE);
    let line = format!("- **Total Entities:** {expected_total}");
    match std::fs::read_to_string(&md_path) {
        Ok(md) if md.contains(&line) => {
            report.push(CheckResult::pass(VALIDATOR, "index.md total matches the store"));
        }
        Ok(_) => report.push(CheckResult::fail(
            VALIDATOR,
            format!("index.md does not contain \"{line}\""),
        )),
        Err(_) => report.push(CheckResult::fail(
            VALIDATOR,
            format!("{} not found", md_path.display()),
        )),
    }

    Ok(report)
}

/// Distinct IRI and blank-node subjects per `rdf:type` object, counted
/// straight from the triples.
fn declared_subjects(store: &dyn TripleStore) -> BTreeMap<String, BTreeSet<String>> {
    let mut declared: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for triple in store.triples() {
        if triple.predicate != vocab::RDF_TYPE {
            continue;
        }
        if let Some(type_iri) = triple.object.as_iri() {
            declared
                .entry(type_iri.to_string())
                .or_default()
                .insert(triple.subject.to_string());
        }
    }
    declared
}

fn check_count(report: &mut ConformanceReport, what: &str, published: usize, actual: usize) {
    if published == actual {
        report.push(CheckResult::pass(
            VALIDATOR,
            format!("{what}: {actual} (matches store)"),
        ));
    } else {
        report.push(CheckResult::fail(
            VALIDATOR,
            format!("{what}: index says {published}, store declares {actual}"),
        ));
    }
}
