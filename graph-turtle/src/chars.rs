//! Turtle character class predicates
//!
//! Based on the Turtle grammar character productions (PN_CHARS_BASE and
//! friends), plus the IRI exclusion set realized as a dense ASCII table.

/// Check if a character is in PN_CHARS_BASE.
///
/// ```text
/// PN_CHARS_BASE ::= [A-Z] | [a-z] | [#x00C0-#x00D6] | [#x00D8-#x00F6]
///                 | [#x00F8-#x02FF] | [#x0370-#x037D] | [#x037F-#x1FFF]
///                 | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF]
///                 | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD]
///                 | [#x10000-#xEFFFF]
/// ```
pub fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z' |
        'a'..='z' |
        '\u{00C0}'..='\u{00D6}' |
        '\u{00D8}'..='\u{00F6}' |
        '\u{00F8}'..='\u{02FF}' |
        '\u{0370}'..='\u{037D}' |
        '\u{037F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' |
        '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' |
        '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' |
        '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

/// Check if a character may appear in the local part of a prefixed name
/// (the base set extended with digits, `.`, `-`, `_`).
pub fn is_local_name_char(c: char) -> bool {
    is_pn_chars_base(c) || c.is_ascii_digit() || matches!(c, '.' | '-' | '_')
}

/// Check if a character is Turtle whitespace.
///
/// Space, tab, LF, FF, CR. Comments are stripped alongside whitespace by the
/// source cursor.
pub fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{000C}' | '\r')
}

/// Characters that may never appear unescaped inside an IRI reference:
/// code points `0x00..=0x20` plus `<", {, }, |, ^, `` ` ``.
///
/// `>` terminates the reference and `\` introduces an escape; both are
/// handled by the reader before this table is consulted. Code points above
/// 0x7F are all permitted.
const NON_IRI: [bool; 128] = build_non_iri();

const fn build_non_iri() -> [bool; 128] {
    let mut table = [false; 128];
    let mut i = 0;
    while i <= 0x20 {
        table[i] = true;
        i += 1;
    }
    table[b'<' as usize] = true;
    table[b'"' as usize] = true;
    table[b'{' as usize] = true;
    table[b'}' as usize] = true;
    table[b'|' as usize] = true;
    table[b'^' as usize] = true;
    table[b'`' as usize] = true;
    table
}

/// Check if a character is in the IRI exclusion set.
pub fn is_non_iri(c: char) -> bool {
    (c as u32) < 128 && NON_IRI[c as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pn_chars_base() {
        assert!(is_pn_chars_base('a'));
        assert!(is_pn_chars_base('Z'));
        assert!(is_pn_chars_base('é'));
        assert!(is_pn_chars_base('\u{1F600}')); // supplementary plane
        assert!(!is_pn_chars_base('0'));
        assert!(!is_pn_chars_base('-'));
        assert!(!is_pn_chars_base('_'));
        assert!(!is_pn_chars_base(':'));
    }

    #[test]
    fn test_local_name_char() {
        assert!(is_local_name_char('a'));
        assert!(is_local_name_char('7'));
        assert!(is_local_name_char('.'));
        assert!(is_local_name_char('-'));
        assert!(is_local_name_char('_'));
        assert!(!is_local_name_char(':'));
        assert!(!is_local_name_char(' '));
    }

    #[test]
    fn test_ws_includes_form_feed() {
        for c in [' ', '\t', '\n', '\r', '\u{000C}'] {
            assert!(is_ws(c), "{c:?} should be whitespace");
        }
        assert!(!is_ws('\u{00A0}'));
    }

    #[test]
    fn test_non_iri_set() {
        for c in ['\u{0000}', ' ', '\u{0010}', '<', '"', '{', '}', '|', '^', '`'] {
            assert!(is_non_iri(c), "{c:?} should be excluded");
        }
        for c in ['>', '\\', 'a', '/', '#', '?', 'é', '\u{1F600}'] {
            assert!(!is_non_iri(c), "{c:?} should be permitted");
        }
    }
}
