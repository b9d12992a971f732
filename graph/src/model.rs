//! Core RDF model types.
//!
//! Terms are kept as owned strings. Literals keep only their lexical form,
//! which is all the documentation pipeline ever displays.

use std::fmt;

/// A node in the graph: an IRI, a blank node, or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A full IRI (e.g., `"http://example.org/onto#Pump"`).
    Iri(String),
    /// A blank node identifier, without the `_:` prefix.
    BlankNode(String),
    /// The lexical form of a literal (language tag and datatype dropped).
    Literal(String),
}

impl Term {
    /// Builds an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Builds a literal term from its lexical form.
    pub fn literal(lexical: impl Into<String>) -> Self {
        Term::Literal(lexical.into())
    }

    /// Returns the IRI string when this term is an IRI.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true if this term is an IRI.
    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Returns true if this term is a literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Returns true if this term is a blank node.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Returns the raw string value: the IRI, the blank node id, or the
    /// lexical form.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(s) | Term::BlankNode(s) | Term::Literal(s) => s,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => f.write_str(iri),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal(lexical) => f.write_str(lexical),
        }
    }
}

/// An RDF statement. Predicates are always IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject: an IRI or a blank node.
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Object: any term.
    pub object: Term,
}

impl Triple {
    /// Builds a triple.
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// A namespace prefix declared in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixBinding {
    /// The prefix label; the default prefix (`@prefix : <...>`) is `""`.
    pub prefix: String,
    /// The namespace IRI bound to the prefix.
    pub iri: String,
}

impl PrefixBinding {
    /// Returns true for the default (empty) prefix.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_raw_values() {
        assert_eq!(Term::iri("http://x.org/a#B").to_string(), "http://x.org/a#B");
        assert_eq!(Term::literal("7.2").to_string(), "7.2");
        assert_eq!(Term::BlankNode("b0".into()).to_string(), "_:b0");
    }

    #[test]
    fn only_iris_expose_an_iri() {
        assert_eq!(Term::iri("http://x.org/a").as_iri(), Some("http://x.org/a"));
        assert_eq!(Term::literal("http://x.org/a").as_iri(), None);
        assert!(Term::BlankNode("n1".into()).is_blank());
    }
}
