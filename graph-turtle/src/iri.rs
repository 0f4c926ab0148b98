//! Relative IRI reference resolution (RFC 3986 §5)
//!
//! The parser leaves a reference untouched when it is absolute or when no
//! base has been bound; otherwise it resolves the reference against the
//! current base with [`resolve`].

/// Check whether a reference starts with a valid scheme (`alpha (alnum|+|-|.)* :`).
pub fn is_absolute(reference: &str) -> bool {
    match reference.find(':') {
        Some(pos) => {
            let scheme = &reference[..pos];
            let mut cs = scheme.chars();
            match cs.next() {
                Some(first) if first.is_ascii_alphabetic() => {
                    cs.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                }
                _ => false,
            }
        }
        None => false,
    }
}

/// Resolve a (possibly relative) reference against a base IRI.
pub fn resolve(reference: &str, base: &str) -> String {
    if is_absolute(reference) {
        return reference.to_string();
    }

    // The base's own fragment never survives resolution.
    let (base_core, _) = split_fragment(base);
    let (ref_core, fragment) = split_fragment(reference);

    let mut resolved = if ref_core.is_empty() {
        base_core.to_string()
    } else {
        merge(base_core, ref_core)
    };

    if let Some(fragment) = fragment {
        resolved.push('#');
        resolved.push_str(fragment);
    }
    resolved
}

fn merge(base: &str, reference: &str) -> String {
    let (scheme, base_authority, base_path, _) = components(base);

    if let Some(rest) = reference.strip_prefix("//") {
        // Network-path reference: adopt only the base scheme.
        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let (authority, path_query) = rest.split_at(authority_end);
        let (path, query) = split_query(path_query);
        return recompose(scheme, Some(authority), &remove_dot_segments(path), query);
    }

    let (ref_path, ref_query) = split_query(reference);

    if ref_path.is_empty() {
        // Query-only reference keeps the base path.
        return recompose(scheme, base_authority, base_path, ref_query);
    }

    if ref_path.starts_with('/') {
        return recompose(
            scheme,
            base_authority,
            &remove_dot_segments(ref_path),
            ref_query,
        );
    }

    // Relative path: merge with the base path's directory.
    let merged = if base_authority.is_some() && base_path.is_empty() {
        format!("/{ref_path}")
    } else {
        match base_path.rfind('/') {
            Some(pos) => format!("{}{}", &base_path[..=pos], ref_path),
            None => ref_path.to_string(),
        }
    };
    recompose(
        scheme,
        base_authority,
        &remove_dot_segments(&merged),
        ref_query,
    )
}

/// Split a base IRI (fragment already removed) into scheme, authority, path,
/// and query.
fn components(iri: &str) -> (&str, Option<&str>, &str, Option<&str>) {
    let (scheme, rest) = match iri.find(':') {
        Some(pos) => (&iri[..pos], &iri[pos + 1..]),
        None => ("", iri),
    };

    let (authority, path_query) = if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?']).unwrap_or(after.len());
        (Some(&after[..end]), &after[end..])
    } else {
        (None, rest)
    };

    let (path, query) = split_query(path_query);
    (scheme, authority, path, query)
}

fn split_query(s: &str) -> (&str, Option<&str>) {
    match s.find('?') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

fn split_fragment(s: &str) -> (&str, Option<&str>) {
    match s.find('#') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

fn recompose(scheme: &str, authority: Option<&str>, path: &str, query: Option<&str>) -> String {
    let mut out = String::with_capacity(
        scheme.len() + path.len() + authority.map_or(0, str::len) + query.map_or(0, str::len) + 4,
    );
    out.push_str(scheme);
    out.push(':');
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(authority);
    }
    out.push_str(path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    out
}

fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => {
                output.pop();
            }
            s => output.push(s),
        }
    }

    let result = output.join("/");
    if path.starts_with('/') && !result.starts_with('/') {
        format!("/{result}")
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.org/path/doc";

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://example.org/"));
        assert!(is_absolute("urn:uuid:1234"));
        assert!(is_absolute("a+b-c.d:rest"));
        assert!(!is_absolute("alice"));
        assert!(!is_absolute("/alice"));
        assert!(!is_absolute("://nothing"));
        assert!(!is_absolute("1http:x"));
    }

    #[test]
    fn test_absolute_passthrough() {
        assert_eq!(resolve("http://other.org/x", BASE), "http://other.org/x");
    }

    #[test]
    fn test_empty_reference_is_base() {
        assert_eq!(resolve("", BASE), "http://example.org/path/doc");
    }

    #[test]
    fn test_sibling_reference() {
        assert_eq!(resolve("alice", BASE), "http://example.org/path/alice");
    }

    #[test]
    fn test_parent_reference() {
        assert_eq!(
            resolve("../bob", "http://example.org/path/"),
            "http://example.org/bob"
        );
    }

    #[test]
    fn test_absolute_path_reference() {
        assert_eq!(
            resolve("/d/e", "http://example.org/a/b/c"),
            "http://example.org/d/e"
        );
    }

    #[test]
    fn test_network_path_reference() {
        assert_eq!(resolve("//other.org/x", BASE), "http://other.org/x");
    }

    #[test]
    fn test_fragment_only_reference() {
        assert_eq!(resolve("#me", BASE), "http://example.org/path/doc#me");
    }

    #[test]
    fn test_fragment_on_relative_reference() {
        assert_eq!(
            resolve("alice#me", BASE),
            "http://example.org/path/alice#me"
        );
    }

    #[test]
    fn test_base_fragment_dropped() {
        assert_eq!(
            resolve("alice", "http://example.org/doc#frag"),
            "http://example.org/alice"
        );
    }

    #[test]
    fn test_query_reference() {
        assert_eq!(resolve("?q=1", BASE), "http://example.org/path/doc?q=1");
    }

    #[test]
    fn test_dot_segments() {
        assert_eq!(
            resolve("./x/../y", "http://example.org/a/"),
            "http://example.org/a/y"
        );
    }
}
