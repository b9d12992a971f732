//! Documentation coverage validator.
//!
//! Every entity declared as a class, object property, datatype property or
//! named individual that carries a label or a description must have a
//! section in `entities.md` or, for categorized output, in one of the module
//! documents under `modules/`.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;
use waterframe_docs::extractor::{extract_term, EntityKind};
use waterframe_docs::linker::local_name;
use waterframe_docs::modular::MODULES_SUBDIR;
use waterframe_docs::ENTITIES_FILE;
use waterframe_graph::{vocab, Term, TripleStore};

use crate::outline::Outline;
use crate::report::{CheckResult, ConformanceReport};

const VALIDATOR: &str = "docs/coverage";

/// Checks that the documents under `docs_dir` give a section to every
/// entity of `store` that has something to document.
///
/// # Errors
///
/// Returns an error if `entities.md` exists but it or a module document
/// cannot be read.
pub fn validate(store: &dyn TripleStore, docs_dir: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let path = docs_dir.join(ENTITIES_FILE);
    if !path.is_file() {
        report.push(CheckResult::fail(
            VALIDATOR,
            format!("{} not found, run waterframe-docs first", path.display()),
        ));
        return Ok(report);
    }
    let module_docs = WalkDir::new(docs_dir.join(MODULES_SUBDIR))
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "md").unwrap_or(false))
        .map(|e| e.into_path());

    let mut sections = BTreeSet::new();
    for doc in std::iter::once(path).chain(module_docs) {
        let content = std::fs::read_to_string(&doc)
            .with_context(|| format!("Failed to read {}", doc.display()))?;
        sections.extend(
            Outline::parse(&content)
                .anchored(2)
                .map(|(text, _)| text.to_string()),
        );
    }

    let mut expected = BTreeSet::new();
    for kind in [
        EntityKind::Class,
        EntityKind::ObjectProperty,
        EntityKind::DatatypeProperty,
        EntityKind::Individual,
    ] {
        let Some(type_iri) = kind.type_iri() else {
            continue;
        };
        let type_term = Term::iri(type_iri);
        expected.extend(
            store
                .subjects(vocab::RDF_TYPE, &type_term)
                .filter(Term::is_iri),
        );
    }

    let mut missing = Vec::new();
    let mut documented = 0usize;
    for subject in &expected {
        let Ok(record) = extract_term(store, subject) else {
            continue;
        };
        if record.is_undocumented() || record.local_name.is_empty() {
            continue;
        }
        documented += 1;
        if !sections.contains(&record.local_name) {
            missing.push(format!("{} ({})", local_name(&record.uri), record.uri));
        }
    }

    if missing.is_empty() {
        report.push(CheckResult::pass(
            VALIDATOR,
            format!("All {documented} documented entities have a section"),
        ));
    } else {
        report.push(CheckResult::fail_with_details(
            VALIDATOR,
            format!(
                "{} of {documented} documented entities have no section",
                missing.len()
            ),
            missing,
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use waterframe_graph::{parse_turtle, Graph};

    const SRC: &str = r#"
@prefix : <http://x.org/o#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
:Pump a owl:Class ; rdfs:label "Pump" .
:Valve a owl:Class ; rdfs:comment "Controls flow." .
:Bare a owl:Class .
"#;

    fn graph() -> Graph {
        match parse_turtle(SRC) {
            Ok(g) => g,
            Err(e) => panic!("fixture should parse: {e}"),
        }
    }

    fn check(entities: &str) -> ConformanceReport {
        check_with_module(entities, None)
    }

    fn check_with_module(entities: &str, module: Option<&str>) -> ConformanceReport {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        if let Err(e) = fs::write(dir.path().join(ENTITIES_FILE), entities) {
            panic!("write: {e}");
        }
        if let Some(module) = module {
            let nested = dir.path().join("modules/core");
            let written = fs::create_dir_all(&nested)
                .and_then(|()| fs::write(nested.join("valves.md"), module));
            if let Err(e) = written {
                panic!("write module: {e}");
            }
        }
        match validate(&graph(), dir.path()) {
            Ok(r) => r,
            Err(e) => panic!("validate: {e}"),
        }
    }

    #[test]
    fn undocumented_entities_are_not_required() {
        let report = check("## Pump {#pump}\n\n## Valve {#valve}\n");
        assert!(report.all_passed());
    }

    #[test]
    fn missing_sections_fail() {
        let report = check("## Pump {#pump}\n");
        assert!(!report.all_passed());
        assert_eq!(report.results[0].details, vec!["Valve (http://x.org/o#Valve)"]);
    }

    #[test]
    fn module_documents_count_as_sections() {
        let report = check_with_module("## Pump {#pump}\n", Some("## Valve {#valve}\n"));
        assert!(report.all_passed(), "{:?}", report.results);
    }

    #[test]
    fn missing_document_fails() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        match validate(&graph(), dir.path()) {
            Ok(r) => assert!(!r.all_passed()),
            Err(e) => panic!("validate: {e}"),
        }
    }
}
