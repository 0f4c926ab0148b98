//! Streaming Turtle (TTL) parser.
//!
//! This crate parses the Turtle RDF serialization with a pushdown state
//! machine driven one character at a time, emitting triples to a
//! `graph_ir::TripleSink` as they are read. The accumulated namespace
//! context (`@prefix` / `@base` bindings) is returned to the caller when the
//! parse completes.
//!
//! # Example
//!
//! ```
//! use graph_turtle::parse_str;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! let graph = parse_str(turtle).unwrap();
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.namespaces.get("ex"), Some("http://example.org/"));
//! ```
//!
//! For streaming output, pair the parser with a `WriterSink`:
//!
//! ```
//! use graph_ir::WriterSink;
//! use graph_turtle::parse;
//!
//! let mut sink = WriterSink::new(Vec::new());
//! parse("<http://a/s> <http://a/p> <http://a/o> .", &mut sink).unwrap();
//! let lines = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(lines, "<http://a/s> <http://a/p> <http://a/o> .\n");
//! ```

mod chars;
pub mod error;
mod iri;
mod parser;
mod reader;

pub use error::{Result, TurtleError};
pub use parser::Parser;
pub use reader::Source;

use graph_ir::{CollectorSink, Graph, Namespaces, TripleSink};

/// Parse a Turtle document, emitting to `sink`; returns the final namespace
/// context.
pub fn parse<S: TripleSink>(input: &str, sink: &mut S) -> Result<Namespaces> {
    Parser::new(Source::of_str(input), sink).run()
}

/// Like [`parse`], with a pre-seeded namespace context.
pub fn parse_with<S: TripleSink>(
    input: &str,
    sink: &mut S,
    namespaces: Namespaces,
) -> Result<Namespaces> {
    Parser::new(Source::of_str(input), sink)
        .with_namespaces(namespaces)
        .run()
}

/// Parse from an arbitrary character stream, emitting to `sink`.
pub fn parse_chars<I, S>(input: I, sink: &mut S) -> Result<Namespaces>
where
    I: IntoIterator<Item = char>,
    S: TripleSink,
{
    Parser::new(Source::new(input.into_iter()), sink).run()
}

/// Parse a Turtle document into an in-memory [`Graph`] (triples plus the
/// final namespace context).
pub fn parse_str(input: &str) -> Result<Graph> {
    parse_str_with(input, Namespaces::new())
}

/// Like [`parse_str`], with a pre-seeded namespace context.
pub fn parse_str_with(input: &str, namespaces: Namespaces) -> Result<Graph> {
    let mut sink = CollectorSink::new();
    let namespaces = Parser::new(Source::of_str(input), &mut sink)
        .with_namespaces(namespaces)
        .run()?;
    let mut graph = sink.finish();
    graph.namespaces = namespaces;
    Ok(graph)
}
