//! Turtle loading.
//!
//! Triples come from the `sophia_turtle` parser and go straight into the
//! store. Prefix bindings are read from the parser's own prefix map once the
//! whole document has been parsed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sophia_api::source::TripleSource;
use sophia_api::triple::Triple as RdfTriple;
use sophia_turtle::parser::turtle;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{Graph, TripleStore};

/// Errors raised while loading an ontology file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The ontology file does not exist.
    #[error("ontology file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The ontology file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Turtle source text that could not be parsed.
    #[error("Turtle syntax error: {0}")]
    Syntax(String),
    /// A Turtle file that could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The parser's message.
        message: String,
    },
}

/// Parses Turtle source text into a [`Graph`].
///
/// Prefixes are bound in prefix order, the default prefix (`""`) first. A
/// prefix declared twice keeps its last IRI.
///
/// # Errors
///
/// Returns [`LoadError::Syntax`] if the text is not valid Turtle.
pub fn parse_turtle(source: &str) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();
    let mut parser = turtle::parse_str(source);
    parser
        .try_for_each_triple(|t| graph.insert_terms(t.s(), t.p(), t.o()).map(|_| ()))
        .map_err(|e| LoadError::Syntax(e.to_string()))?;

    let prefixes: BTreeMap<&str, &str> = parser
        .0
        .prefixes()
        .iter()
        .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
        .collect();
    for (prefix, iri) in prefixes {
        graph.bind_prefix(prefix, iri);
    }
    Ok(graph)
}

/// Reads and parses a Turtle file.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file is missing, [`LoadError::Io`]
/// if it cannot be read, and [`LoadError::Parse`] if it is not valid Turtle.
pub fn load_turtle(path: &Path) -> Result<Graph, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_turtle(&source).map_err(|e| match e {
        LoadError::Syntax(message) => LoadError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;
    info!(path = %path.display(), triples = graph.len(), "loaded ontology");
    Ok(graph)
}

/// Loads a Turtle file, degrading to an empty graph on any failure.
///
/// A missing or malformed ontology is not fatal for documentation runs: the
/// failure is logged as a warning and generation continues with whatever
/// defaults apply to an empty store.
pub fn load_or_empty(path: &Path) -> Graph {
    match load_turtle(path) {
        Ok(graph) => graph,
        Err(e) => {
            warn!("{e}; continuing with an empty store");
            Graph::new()
        }
    }
}
