//! Triple store trait and the [`Graph`] implementation over `sophia_inmem`.

use std::fmt;

use sophia_api::graph::{Graph as _, MutableGraph};
use sophia_api::term::matcher::TermMatcher;
use sophia_api::term::{BnodeId, FromTerm, IriRef, SimpleTerm, Term as RdfTerm, TermKind};
use sophia_api::triple::Triple as RdfTriple;
use sophia_inmem::graph::FastGraph;
use thiserror::Error;

use crate::model::{PrefixBinding, Term, Triple};

/// Read-only access to a set of triples.
///
/// Every lookup yields triples in the store's iteration order, which must be
/// stable across runs over the same input so generated documents are
/// reproducible.
pub trait TripleStore {
    /// Returns all triples matching the pattern; `None` is a wildcard.
    fn triples_matching<'a>(
        &'a self,
        subject: Option<&Term>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Box<dyn Iterator<Item = Triple> + 'a>;

    /// Returns the namespace prefixes declared by the source document.
    fn namespaces(&self) -> &[PrefixBinding];

    /// Returns the number of triples in the store.
    fn len(&self) -> usize;

    /// Returns true if the store holds no triples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every triple in iteration order.
    fn triples(&self) -> Box<dyn Iterator<Item = Triple> + '_> {
        self.triples_matching(None, None, None)
    }

    /// Returns the objects of `subject predicate ?o`.
    fn objects<'a>(
        &'a self,
        subject: &Term,
        predicate: &str,
    ) -> Box<dyn Iterator<Item = Term> + 'a> {
        Box::new(
            self.triples_matching(Some(subject), Some(predicate), None)
                .map(|t| t.object),
        )
    }

    /// Returns the subjects of `?s predicate object`.
    fn subjects<'a>(
        &'a self,
        predicate: &str,
        object: &Term,
    ) -> Box<dyn Iterator<Item = Term> + 'a> {
        Box::new(
            self.triples_matching(None, Some(predicate), Some(object))
                .map(|t| t.subject),
        )
    }

    /// Returns true if the exact triple is present.
    fn contains(&self, subject: &Term, predicate: &str, object: &Term) -> bool {
        self.triples_matching(Some(subject), Some(predicate), Some(object))
            .next()
            .is_some()
    }
}

/// Error raised when the underlying term index cannot take another term.
#[derive(Debug, Error)]
#[error("triple store is full: {0}")]
pub struct StoreFull(String);

/// An in-memory graph with set semantics.
///
/// Triples live in a `sophia_inmem` [`FastGraph`]. Its indexes order triples
/// by the position at which each term was first inserted, so iteration is
/// stable for a given input.
pub struct Graph {
    inner: FastGraph,
    len: usize,
    prefixes: Vec<PrefixBinding>,
    merges: usize,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("len", &self.len)
            .field("prefixes", &self.prefixes)
            .finish_non_exhaustive()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            inner: FastGraph::new(),
            len: 0,
            prefixes: Vec::new(),
            merges: 0,
        }
    }

    /// Inserts a triple. Returns false if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreFull`] if the term index is exhausted.
    pub fn insert(&mut self, triple: Triple) -> Result<bool, StoreFull> {
        self.insert_terms(
            to_simple(&triple.subject),
            IriRef::new_unchecked(triple.predicate.as_str()),
            to_simple(&triple.object),
        )
    }

    /// Inserts a triple straight from a parser.
    pub(crate) fn insert_terms<S, P, O>(&mut self, s: S, p: P, o: O) -> Result<bool, StoreFull>
    where
        S: RdfTerm,
        P: RdfTerm,
        O: RdfTerm,
    {
        let added = self
            .inner
            .insert(s, p, o)
            .map_err(|e| StoreFull(e.to_string()))?;
        if added {
            self.len += 1;
        }
        Ok(added)
    }

    /// Binds a namespace prefix. A later binding for the same prefix wins.
    pub fn bind_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        let prefix = prefix.into();
        let iri = iri.into();
        if let Some(existing) = self.prefixes.iter_mut().find(|b| b.prefix == prefix) {
            existing.iri = iri;
        } else {
            self.prefixes.push(PrefixBinding { prefix, iri });
        }
    }

    /// Absorbs every triple of `other`. Prefixes already bound here are kept.
    ///
    /// Blank node labels are only unique within one parse, so the blank
    /// nodes of `other` are relabelled before insertion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreFull`] if the term index is exhausted.
    pub fn merge(&mut self, other: Graph) -> Result<(), StoreFull> {
        self.merges += 1;
        let scope = self.merges;
        let relabel = |term: Term| match term {
            Term::BlankNode(id) => Term::BlankNode(format!("merge{scope}_{id}")),
            term => term,
        };

        for binding in &other.prefixes {
            if !self.prefixes.iter().any(|b| b.prefix == binding.prefix) {
                self.prefixes.push(binding.clone());
            }
        }
        for triple in other.triples() {
            self.insert(Triple {
                subject: relabel(triple.subject),
                predicate: triple.predicate,
                object: relabel(triple.object),
            })?;
        }
        Ok(())
    }
}

impl TripleStore for Graph {
    fn triples_matching<'a>(
        &'a self,
        subject: Option<&Term>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Box<dyn Iterator<Item = Triple> + 'a> {
        let predicate = predicate.map(|p| Term::Iri(p.to_string()));
        Box::new(
            self.inner
                .triples_matching(
                    Slot::new(subject),
                    Slot::new(predicate.as_ref()),
                    Slot::new(object),
                )
                .filter_map(Result::ok)
                .filter_map(|t| {
                    let predicate = match from_rdf(t.p())? {
                        Term::Iri(iri) => iri,
                        _ => return None,
                    };
                    Some(Triple::new(from_rdf(t.s())?, predicate, from_rdf(t.o())?))
                }),
        )
    }

    fn namespaces(&self) -> &[PrefixBinding] {
        &self.prefixes
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// One position of a triple pattern.
///
/// Literals are matched on their lexical form only, since [`Term`] does not
/// carry datatypes or language tags.
enum Slot {
    Any,
    Exact(SimpleTerm<'static>),
    Lexical(String),
}

impl Slot {
    fn new(term: Option<&Term>) -> Self {
        match term {
            None => Self::Any,
            Some(Term::Literal(lexical)) => Self::Lexical(lexical.clone()),
            Some(term) => Self::Exact(to_simple(term)),
        }
    }
}

impl TermMatcher for Slot {
    type Term = SimpleTerm<'static>;

    fn matches<T2: RdfTerm + ?Sized>(&self, term: &T2) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(mine) => RdfTerm::eq(mine, term.borrow_term()),
            Self::Lexical(lexical) => {
                term.kind() == TermKind::Literal
                    && term.lexical_form().is_some_and(|l| *l == **lexical)
            }
        }
    }

    fn constant(&self) -> Option<&Self::Term> {
        match self {
            Self::Exact(term) => Some(term),
            _ => None,
        }
    }
}

/// Converts a [`Term`] into a sophia term. Literals become `xsd:string`.
fn to_simple(term: &Term) -> SimpleTerm<'static> {
    match term {
        Term::Iri(iri) => SimpleTerm::from_term(IriRef::new_unchecked(iri.as_str())),
        Term::BlankNode(id) => SimpleTerm::from_term(BnodeId::new_unchecked(id.as_str())),
        Term::Literal(lexical) => SimpleTerm::from_term(lexical.as_str()),
    }
}

/// Converts a sophia term into a [`Term`]. Quoted triples and variables are
/// not supported and yield `None`.
fn from_rdf<T: RdfTerm>(term: T) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_owned())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Term::BlankNode(id.as_str().to_owned())),
        TermKind::Literal => term.lexical_form().map(|lex| Term::Literal((*lex).to_owned())),
        _ => None,
    }
}
