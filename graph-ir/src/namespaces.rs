//! Namespace context: prefix bindings and the base IRI
//!
//! The context is a single mapping from prefix name to namespace IRI, with
//! the base IRI stored under the distinguished [`BASE_KEY`] key. Prefix keys
//! may be empty (the default prefix). A `BTreeMap` keeps iteration order
//! deterministic.

use std::collections::BTreeMap;

/// The distinguished context key holding the current base IRI.
pub const BASE_KEY: &str = "@base";

/// A mutable prefix → namespace-IRI mapping, owned by one parse and returned
/// to the caller on completion. Callers may pre-seed it (e.g., with the
/// common `rdf`/`rdfs`/`xsd` bindings) before handing it to the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Namespaces {
    map: BTreeMap<String, String>,
}

impl Namespaces {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context pre-seeded with the `rdf`, `rdfs`, and `xsd` prefixes
    pub fn with_common() -> Self {
        let mut ns = Self::new();
        ns.bind("rdf", graph_vocab::ns::RDF);
        ns.bind("rdfs", graph_vocab::ns::RDFS);
        ns.bind("xsd", graph_vocab::ns::XSD);
        ns
    }

    /// Bind a prefix (possibly the empty default prefix) to a namespace IRI
    pub fn bind(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.map.insert(prefix.into(), iri.into());
    }

    /// Look up the namespace IRI bound to a prefix
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.map.get(prefix).map(String::as_str)
    }

    /// Resolve a prefixed name to a full IRI by concatenation.
    ///
    /// Returns `None` when the prefix is unbound.
    pub fn resolve(&self, prefix: &str, local: &str) -> Option<String> {
        self.map
            .get(prefix)
            .map(|namespace| format!("{namespace}{local}"))
    }

    /// Set the base IRI
    pub fn set_base(&mut self, iri: impl Into<String>) {
        self.map.insert(BASE_KEY.to_string(), iri.into());
    }

    /// Get the current base IRI, if a base has been bound
    pub fn base(&self) -> Option<&str> {
        self.get(BASE_KEY)
    }

    /// Number of entries (including `@base` when bound)
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over entries in deterministic (sorted) order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Namespaces {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
