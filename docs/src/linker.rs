//! Resolves entity names to markdown anchors and in-document links.
//!
//! [`anchor_id`] is the only function that produces anchors. Section
//! headings and every link that targets a section both feed it the same
//! reconstructed IRI (`namespace + local_name`), which is what keeps the
//! document's internal links resolvable.

use std::collections::BTreeSet;

/// Extracts the local name from an IRI: the text after the last `#`, else
/// after the last `/`, else the whole string.
pub fn local_name(iri: &str) -> &str {
    if let Some((_, tail)) = iri.rsplit_once('#') {
        tail
    } else if let Some((_, tail)) = iri.rsplit_once('/') {
        tail
    } else {
        iri
    }
}

/// Builds a markdown anchor id from an IRI.
///
/// The local name has every `:`, `#` and `/` replaced by `_` and is then
/// lower-cased. Nothing else is escaped, so names differing only by case or
/// by other punctuation (e.g. a trailing `.`) may collide.
pub fn anchor_id(iri: &str) -> String {
    local_name(iri)
        .replace([':', '#', '/'], "_")
        .to_lowercase()
}

/// Produces links for one document, rooted at the ontology namespace.
#[derive(Debug, Clone)]
pub struct Linker {
    namespace: String,
    base: String,
    targets: Option<BTreeSet<String>>,
}

impl Linker {
    /// Creates a linker that links every name it is given.
    pub fn new(namespace: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            base: base.into(),
            targets: None,
        }
    }

    /// Restricts links to the sections of `entities` that lie inside the
    /// ontology. Names of other entities, and names without a section, are
    /// rendered as inline code instead.
    #[must_use]
    pub fn with_targets<'i>(mut self, entities: impl IntoIterator<Item = &'i str>) -> Self {
        let targets = entities
            .into_iter()
            .filter(|iri| self.is_internal(iri))
            .map(anchor_id)
            .collect();
        self.targets = Some(targets);
        self
    }

    /// Re-qualifies a short name with the ontology namespace.
    pub fn qualify(&self, short_name: &str) -> String {
        format!("{}{}", self.namespace, short_name)
    }

    /// The anchor of the section documenting `short_name`.
    pub fn anchor_for(&self, short_name: &str) -> String {
        anchor_id(&self.qualify(short_name))
    }

    /// Returns true if `value` lies inside the ontology (case-insensitive
    /// containment of the base IRI).
    pub fn is_internal(&self, value: &str) -> bool {
        !self.base.is_empty() && value.to_lowercase().contains(&self.base.to_lowercase())
    }

    /// Returns true if a link to `anchor` would resolve.
    pub fn resolves(&self, anchor: &str) -> bool {
        self.targets.as_ref().map_or(true, |t| t.contains(anchor))
    }

    /// Renders `[short_name](#anchor)`, or `` `short_name` `` when the
    /// anchor has no heading in the current document.
    pub fn link(&self, short_name: &str) -> String {
        let anchor = self.anchor_for(short_name);
        if self.resolves(&anchor) {
            format!("[{short_name}](#{anchor})")
        } else {
            format!("`{short_name}`")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://test.example.org/onto#";
    const BASE: &str = "http://test.example.org/onto";

    #[test]
    fn local_name_prefers_hash_then_slash() {
        assert_eq!(local_name("http://test.example.org/onto#TestClass"), "TestClass");
        assert_eq!(local_name("http://www.w3.org/2002/07/owl#Class"), "Class");
        assert_eq!(local_name("http://purl.obolibrary.org/obo/BFO_0000040"), "BFO_0000040");
        assert_eq!(local_name("urn:isbn:123"), "urn:isbn:123");
    }

    #[test]
    fn anchor_is_deterministic_and_lowercase() {
        let first = anchor_id("http://test.example.org/onto#TestClass");
        let second = anchor_id("http://test.example.org/onto#TestClass");
        assert_eq!(first, second);
        assert_eq!(first, "testclass");
    }

    #[test]
    fn anchor_replaces_only_colon_hash_and_slash() {
        assert_eq!(anchor_id("urn:waterframe:Pump.v2"), "urn_waterframe_pump.v2");
    }

    #[test]
    fn distinct_local_names_get_distinct_anchors() {
        assert_ne!(
            anchor_id("http://test.example.org/onto#TestClass"),
            anchor_id("http://test.example.org/onto#SubClass")
        );
    }

    #[test]
    fn case_and_replaced_punctuation_variants_collide() {
        // Known collision class: these pairs share an anchor.
        assert_eq!(anchor_id("http://x.org/o#Pump"), anchor_id("http://x.org/o#pump"));
        assert_eq!(anchor_id("urn:a:Pump"), anchor_id("urn_a_Pump"));
        // Dots are kept verbatim.
        assert_eq!(anchor_id("http://x.org/o#Pump."), "pump.");
        assert_ne!(anchor_id("http://x.org/o#Pump."), anchor_id("http://x.org/o#Pump"));
    }

    #[test]
    fn reconstructed_iri_matches_entity_anchor() {
        let linker = Linker::new(NS, BASE);
        assert_eq!(
            linker.anchor_for("TestClass"),
            anchor_id("http://test.example.org/onto#TestClass")
        );
    }

    #[test]
    fn links_degrade_to_code_without_a_target() {
        let linker = Linker::new(NS, BASE).with_targets([format!("{NS}TestClass").as_str()]);
        assert_eq!(linker.link("TestClass"), "[TestClass](#testclass)");
        assert_eq!(linker.link("BFO_0000040"), "`BFO_0000040`");
    }

    #[test]
    fn sections_outside_the_namespace_are_never_link_targets() {
        let linker = Linker::new(NS, BASE).with_targets([
            "http://purl.obolibrary.org/obo/BFO_0000040",
            "http://www.w3.org/2002/07/owl#Class",
        ]);
        assert!(!linker.resolves("bfo_0000040"));
        assert_eq!(linker.link("BFO_0000040"), "`BFO_0000040`");
        assert_eq!(linker.link("Class"), "`Class`");
    }

    #[test]
    fn internal_check_is_case_insensitive() {
        let linker = Linker::new(NS, BASE);
        assert!(linker.is_internal("HTTP://TEST.EXAMPLE.ORG/onto#Pump"));
        assert!(!linker.is_internal("http://www.w3.org/2002/07/owl#Thing"));
    }
}
