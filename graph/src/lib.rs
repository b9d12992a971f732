//! waterFRAME triple store.
//!
//! The `waterframe-graph` crate parses an ontology with `sophia_turtle`,
//! holds its triples in a `sophia_inmem` graph and exposes the lookups the
//! documentation generator needs: pattern matching on any combination of
//! positions, reverse lookup, and the namespace prefixes declared by the
//! source file.
//!
//! # Entry Point
//!
//! ```
//! use waterframe_graph::{parse_turtle, vocab, Term, TripleStore};
//!
//! let graph = parse_turtle(
//!     "@prefix : <http://example.org/onto#> .\n\
//!      @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      :Pump a owl:Class .",
//! )
//! .expect("valid Turtle");
//!
//! let pump = Term::iri("http://example.org/onto#Pump");
//! assert!(graph.contains(&pump, vocab::RDF_TYPE, &Term::iri(vocab::OWL_CLASS)));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod loader;
pub mod model;
pub mod store;
pub mod vocab;

pub use loader::{load_or_empty, load_turtle, parse_turtle, LoadError};
pub use model::{PrefixBinding, Term, Triple};
pub use store::{Graph, StoreFull, TripleStore};
