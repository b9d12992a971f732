//! Documentation link validator.
//!
//! For every markdown file under the docs directory:
//!
//! - every `#anchor` link targets a heading anchor of the same file;
//! - no anchor is an encoded full URI (`http_...`);
//! - every entity heading's anchor equals `anchor_id(namespace + text)`,
//!   and every `#anchor` link agrees with its text the same way;
//! - relative file links point at files that exist;
//! - no `#anchor` link targets a section whose `**URI:**` lies outside the
//!   file's namespace.
//!
//! Duplicate heading anchors are reported as a warning: names differing only
//! by case or by `:`, `#` and `/` share an anchor. So are sections for
//! entities outside the namespace. Coverage still needs them when such an
//! entity is declared in the ontology, but nothing may link to them.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;
use waterframe_docs::linker::{anchor_id, Linker};
use waterframe_docs::namespace::OntologyNamespace;

use crate::outline::Outline;
use crate::report::{CheckResult, ConformanceReport};

const VALIDATOR: &str = "docs/links";

/// The namespace each markdown file was linked against.
///
/// Files are keyed by their path relative to the docs directory, with `/`
/// separators. Files without an entry use the main namespace.
#[derive(Debug, Clone)]
pub struct DocNamespaces {
    main: OntologyNamespace,
    files: BTreeMap<String, OntologyNamespace>,
}

impl DocNamespaces {
    /// Every file uses `main`.
    pub fn new(main: OntologyNamespace) -> Self {
        Self {
            main,
            files: BTreeMap::new(),
        }
    }

    /// Overrides the namespace of one file.
    pub fn with_file(mut self, file: impl Into<String>, namespace: OntologyNamespace) -> Self {
        self.files.insert(file.into(), namespace);
        self
    }

    /// The namespace `file` was linked against.
    pub fn for_file(&self, file: &str) -> &OntologyNamespace {
        self.files.get(file).unwrap_or(&self.main)
    }
}

/// Validates links and anchors of every markdown file under `docs_dir`.
///
/// # Errors
///
/// Returns an error if a markdown file cannot be read.
pub fn validate(docs_dir: &Path, namespaces: &DocNamespaces) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    if !docs_dir.is_dir() {
        report.push(CheckResult::fail(
            VALIDATOR,
            format!("{} not found, run waterframe-docs first", docs_dir.display()),
        ));
        return Ok(report);
    }

    let mut dangling = Vec::new();
    let mut uri_anchors = Vec::new();
    let mut inconsistent = Vec::new();
    let mut broken_files = Vec::new();
    let mut duplicates = Vec::new();
    let mut external_links = Vec::new();
    let mut external_sections = Vec::new();
    let mut files = 0usize;

    for entry in WalkDir::new(docs_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "md").unwrap_or(false))
    {
        let path = entry.path();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let label = path
            .strip_prefix(docs_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        files += 1;

        let outline = Outline::parse(&content);
        let namespace = namespaces.for_file(&label);
        let linker = Linker::new(&namespace.namespace, &namespace.base);

        let mut seen: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (text, id) in outline.anchored(2) {
            seen.entry(id).or_default().push(text);
            if looks_like_encoded_uri(id) {
                uri_anchors.push(format!("{label}: heading anchor #{id}"));
            }
            let expected = anchor_id(&format!("{}{}", namespace.namespace, text));
            if id != expected {
                inconsistent.push(format!(
                    "{label}: heading {text} has #{id}, expected #{expected}"
                ));
            }
        }
        for heading in outline.headings.iter().filter(|h| h.level == 2) {
            if let (Some(id), Some(uri)) = (&heading.id, &heading.uri) {
                if !linker.is_internal(uri) {
                    external_sections.push(format!("{label}: #{id} documents {uri}"));
                }
            }
        }
        for (id, texts) in &seen {
            if texts.len() > 1 {
                duplicates.push(format!("{label}: #{id} shared by {}", texts.join(", ")));
            }
        }
        let anchors: BTreeSet<&str> = seen.keys().copied().collect();

        for link in &outline.links {
            if let Some(fragment) = link.fragment() {
                if !anchors.contains(fragment) {
                    dangling.push(format!("{label}: [{}](#{fragment})", link.text));
                }
                if let Some(uri) = outline
                    .section_uri(fragment)
                    .filter(|uri| !linker.is_internal(uri))
                {
                    external_links.push(format!("{label}: [{}](#{fragment}) → {uri}", link.text));
                }
                if looks_like_encoded_uri(fragment) {
                    uri_anchors.push(format!("{label}: link #{fragment}"));
                }
                let expected = anchor_id(&format!("{}{}", namespace.namespace, link.text));
                if fragment != expected {
                    inconsistent.push(format!(
                        "{label}: [{}](#{fragment}), expected #{expected}",
                        link.text
                    ));
                }
            } else if is_relative_file_link(&link.dest) {
                let target = link.dest.split('#').next().unwrap_or(&link.dest);
                let resolved = path.parent().unwrap_or(docs_dir).join(target);
                if !resolved.is_file() {
                    broken_files.push(format!("{label}: broken link → {}", link.dest));
                }
            }
        }
    }

    if files == 0 {
        report.push(CheckResult::fail(
            VALIDATOR,
            format!("No markdown files found in {}", docs_dir.display()),
        ));
        return Ok(report);
    }

    push_findings(&mut report, dangling, "dangling anchor link(s)", "All anchor links resolve");
    push_findings(
        &mut report,
        uri_anchors,
        "anchor(s) derived from a full URI",
        "No anchors derived from full URIs",
    );
    push_findings(
        &mut report,
        inconsistent,
        "heading/link anchor mismatch(es)",
        "Heading and link anchors agree",
    );
    push_findings(
        &mut report,
        external_links,
        "link(s) to entities outside the namespace",
        "Anchor links stay inside the namespace",
    );
    push_findings(
        &mut report,
        broken_files,
        "broken file link(s)",
        "All relative file links resolve",
    );

    if duplicates.is_empty() {
        report.push(CheckResult::pass(VALIDATOR, "Heading anchors are unique"));
    } else {
        report.push(CheckResult::warn_with_details(
            VALIDATOR,
            format!("{} heading anchor(s) shared by several entities", duplicates.len()),
            duplicates,
        ));
    }

    if external_sections.is_empty() {
        report.push(CheckResult::pass(
            VALIDATOR,
            "Sections document entities inside the namespace",
        ));
    } else {
        report.push(CheckResult::warn_with_details(
            VALIDATOR,
            format!("{} section(s) for entities outside the namespace", external_sections.len()),
            external_sections,
        ));
    }

    Ok(report)
}

fn push_findings(report: &mut ConformanceReport, found: Vec<String>, what: &str, ok: &str) {
    if found.is_empty() {
        report.push(CheckResult::pass(VALIDATOR, ok));
    } else {
        report.push(CheckResult::fail_with_details(
            VALIDATOR,
            format!("{} {what}", found.len()),
            found,
        ));
    }
}

/// `http://x.org/o#A` encodes to `http___x.org_o_a` under the anchor rule.
fn looks_like_encoded_uri(anchor: &str) -> bool {
    ["http_", "https_", "urn_"]
        .iter()
        .any(|scheme| anchor.starts_with(scheme))
}

fn is_relative_file_link(dest: &str) -> bool {
    !(dest.is_empty()
        || dest.starts_with('#')
        || dest.starts_with('/')
        || dest.contains("://")
        || dest.starts_with("mailto:"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use waterframe_docs::namespace::NamespaceSource;

    fn ns() -> OntologyNamespace {
        OntologyNamespace::from_namespace("http://x.org/o#", NamespaceSource::DefaultPrefix)
    }

    fn check(files: &[(&str, &str)]) -> ConformanceReport {
        check_with(files, &DocNamespaces::new(ns()))
    }

    fn check_with(files: &[(&str, &str)], namespaces: &DocNamespaces) -> ConformanceReport {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    panic!("mkdir {name}: {e}");
                }
            }
            if let Err(e) = fs::write(&path, content) {
                panic!("write {name}: {e}");
            }
        }
        match validate(dir.path(), namespaces) {
            Ok(r) => r,
            Err(e) => panic!("validate: {e}"),
        }
    }

    fn failures(report: &ConformanceReport) -> Vec<String> {
        report
            .results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.message.clone())
            .collect()
    }

    #[test]
    fn consistent_document_passes() {
        let report = check(&[
            (
                "entities.md",
                "# E\n\n- [Pump](#pump)\n\n## Pump {#pump}\n\n**URI:** `http://x.org/o#Pump`\n\n\
                 See [index](index.md).\n",
            ),
            ("index.md", "# I\n"),
        ]);
        assert!(report.all_passed(), "{:?}", failures(&report));
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn dangling_links_fail() {
        let report = check(&[("entities.md", "## Pump {#pump}\n\n- [Valve](#valve)\n")]);
        assert_eq!(failures(&report), vec!["1 dangling anchor link(s)"]);
    }

    #[test]
    fn uri_derived_anchors_fail() {
        let report = check(&[(
            "entities.md",
            "## Pump {#http___x.org_o_pump}\n\n- [Pump](#http___x.org_o_pump)\n",
        )]);
        let failed = failures(&report);
        assert!(failed.contains(&"2 anchor(s) derived from a full URI".to_string()));
        assert!(failed.contains(&"2 heading/link anchor mismatch(es)".to_string()));
    }

    #[test]
    fn duplicate_anchors_warn() {
        let report = check(&[("entities.md", "## Pump {#pump}\n\n## pump {#pump}\n")]);
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn links_to_external_sections_fail() {
        let report = check(&[(
            "entities.md",
            "## Pump {#pump}\n\n**URI:** `http://x.org/o#Pump`\n\n\
             - [BFO_1](#bfo_1)\n\n\
             ## BFO_1 {#bfo_1}\n\n**URI:** `http://purl.obolibrary.org/obo/BFO_1`\n",
        )]);
        assert_eq!(failures(&report), vec!["1 link(s) to entities outside the namespace"]);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn unlinked_external_sections_only_warn() {
        let report = check(&[(
            "entities.md",
            "## BFO_1 {#bfo_1}\n\n**URI:** `http://purl.obolibrary.org/obo/BFO_1`\n\n\
             ### Superclasses\n\n- `Thing`\n",
        )]);
        assert!(report.all_passed(), "{:?}", failures(&report));
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn module_files_use_their_own_namespace() {
        let module =
            OntologyNamespace::from_namespace("http://y.org/m#", NamespaceSource::DefaultPrefix);
        let doc = "## Tank {#tank}\n\n**URI:** `http://y.org/m#Tank`\n\n- [Tank](#tank)\n";
        let files = [("modules/core.md", doc)];

        let report = check(&files);
        assert!(!report.all_passed());

        let namespaces = DocNamespaces::new(ns()).with_file("modules/core.md", module);
        let report = check_with(&files, &namespaces);
        assert!(report.all_passed(), "{:?}", failures(&report));
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn broken_file_links_fail() {
        let report = check(&[("index.md", "- [Entities](entities.md)\n")]);
        assert_eq!(failures(&report), vec!["1 broken file link(s)"]);
    }

    #[test]
    fn empty_directory_fails() {
        let report = check(&[]);
        assert!(!report.all_passed());
    }
}
