//! Format-agnostic RDF graph intermediate representation
//!
//! This crate provides the canonical types produced by parsers and consumed
//! by formatters, regardless of the concrete serialization format.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction is a formatter concern.
//!
//! 2. **Bag semantics by default** - The `Graph` type uses `Vec<Triple>` to
//!    preserve duplicates and emission order. Call `dedupe()` explicitly for
//!    set semantics.
//!
//! 3. **Event-driven construction** - Parsers emit through the [`TripleSink`]
//!    capability; the sink decides whether triples are collected in memory
//!    ([`CollectorSink`]) or streamed to a writer ([`WriterSink`]).
//!
//! # Example
//!
//! ```
//! use graph_ir::{Graph, Term};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//! graph.sort();
//! ```

mod graph;
mod namespaces;
mod sink;
mod term;
mod triple;

pub use graph::Graph;
pub use namespaces::{Namespaces, BASE_KEY};
pub use sink::{CollectorSink, TripleSink, WriterSink};
pub use term::{BlankId, Term};
pub use triple::Triple;
