//! TripleSink trait for event-driven graph construction
//!
//! Parsers emit triples through a sink without knowing the concrete sink
//! type. The sink can be:
//! - [`CollectorSink`]: collects triples into a `Graph`
//! - [`WriterSink`]: streams one triple per line to an `io::Write`

use crate::{Graph, Term, Triple};
use std::io;

/// Event-driven interface for RDF triple emission
///
/// The single required operation is [`emit`](TripleSink::emit); the directive
/// hooks default to no-ops for sinks that have no use for them.
pub trait TripleSink {
    /// Called when a base IRI is declared (`@base <...> .`)
    fn on_base(&mut self, base_iri: &str) {
        let _ = base_iri;
    }

    /// Called when a prefix is declared (`@prefix ex: <...> .`)
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        let _ = (prefix, namespace_iri);
    }

    /// Receive one triple, in document order
    fn emit(&mut self, s: Term, p: Term, o: Term) -> io::Result<()>;
}

/// A sink that collects triples into a [`Graph`]
///
/// Emission order is preserved. If the parse fails, the partially filled
/// graph is simply never returned to the caller.
#[derive(Debug, Default)]
pub struct CollectorSink {
    graph: Graph,
}

impl CollectorSink {
    /// Create a new collector sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building and return the graph
    ///
    /// Consumes the sink.
    pub fn finish(self) -> Graph {
        self.graph
    }

    /// Get the graph built so far (non-consuming)
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Get the graph built so far, mutably
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
}

impl TripleSink for CollectorSink {
    fn on_base(&mut self, base_iri: &str) {
        self.graph.set_base(base_iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.graph.add_prefix(prefix, namespace_iri);
    }

    fn emit(&mut self, s: Term, p: Term, o: Term) -> io::Result<()> {
        self.graph.add(Triple::new(s, p, o));
        Ok(())
    }
}

/// A sink that writes one whitespace-separated triple per line
///
/// Terms are serialized as: IRIs in `<>`, blank nodes as `_:label`, literals
/// quoted and escaped, with `rdf:type` in predicate position collapsed to
/// `a`. There is no buffering beyond the underlying writer, so on a failed
/// parse the output must be treated as truncated.
#[derive(Debug)]
pub struct WriterSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> WriterSink<W> {
    /// Create a sink over a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> TripleSink for WriterSink<W> {
    fn emit(&mut self, s: Term, p: Term, o: Term) -> io::Result<()> {
        if p.as_iri() == Some(graph_vocab::rdf::TYPE) {
            writeln!(self.writer, "{} a {} .", s, o)
        } else {
            writeln!(self.writer, "{} {} {} .", s, p, o)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_sink_basic() {
        let mut sink = CollectorSink::new();

        sink.emit(
            Term::iri("http://example.org/alice"),
            Term::iri("http://xmlns.com/foaf/0.1/name"),
            Term::string("Alice"),
        )
        .unwrap();

        let graph = sink.finish();
        assert_eq!(graph.len(), 1);

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/alice"));
        assert_eq!(triple.p.as_iri(), Some("http://xmlns.com/foaf/0.1/name"));
    }

    #[test]
    fn test_collector_sink_directives() {
        let mut sink = CollectorSink::new();

        sink.on_base("http://example.org/");
        sink.on_prefix("foaf", "http://xmlns.com/foaf/0.1/");

        let graph = sink.finish();
        assert_eq!(graph.namespaces.base(), Some("http://example.org/"));
        assert_eq!(
            graph.namespaces.get("foaf"),
            Some("http://xmlns.com/foaf/0.1/")
        );
    }

    #[test]
    fn test_writer_sink_lines() {
        let mut sink = WriterSink::new(Vec::new());

        sink.emit(
            Term::iri("http://a/s"),
            Term::iri("http://a/p"),
            Term::iri("http://a/o"),
        )
        .unwrap();
        sink.emit(
            Term::iri("http://a/s"),
            Term::iri("http://a/p2"),
            Term::string("line\ntwo"),
        )
        .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "<http://a/s> <http://a/p> <http://a/o> .\n\
             <http://a/s> <http://a/p2> \"line\\ntwo\" .\n"
        );
    }

    #[test]
    fn test_writer_sink_collapses_rdf_type() {
        let mut sink = WriterSink::new(Vec::new());

        sink.emit(
            Term::iri("http://a/s"),
            Term::iri(graph_vocab::rdf::TYPE),
            Term::iri("http://a/T"),
        )
        .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "<http://a/s> a <http://a/T> .\n");
    }
}
