//! Error types for Turtle parsing

use thiserror::Error;

/// Error type for Turtle parsing operations
///
/// Every syntax-level variant carries the position (1-based line and column)
/// where the problem was detected; most also carry the parser state name and
/// a look-ahead snippet of at most 80 characters so the caller can locate
/// the problem without re-reading the input.
#[derive(Debug, Error)]
pub enum TurtleError {
    /// The character is not permitted in the current state
    #[error("unexpected character '{ch}' in {state} at line {line}, column {column}, before: {snippet:?}")]
    UnexpectedCharacter {
        /// Parser state when the character was seen
        state: &'static str,
        /// The offending character
        ch: char,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
        /// Up to 80 characters of remaining input
        snippet: String,
    },

    /// End of input in a non-terminal state
    #[error("unexpected end of input in {state} ({stack_depth} open frames) at line {line}, column {column}")]
    UnexpectedEof {
        /// Parser state at EOF
        state: &'static str,
        /// Number of frames still on the stack
        stack_depth: usize,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// Disallowed character, bad escape, or unresolvable reference in an IRI
    #[error("invalid IRI at line {line}, column {column}: {reason} (partial: {partial:?})")]
    InvalidIri {
        /// What went wrong
        reason: String,
        /// The IRI text accumulated before the failure
        partial: String,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// Malformed `\uXXXX` / `\UXXXXXXXX` escape
    #[error("invalid unicode escape '\\{encoding}' at line {line}, column {column}")]
    InvalidUnicodeEscape {
        /// The hex digits (or offending text) of the escape
        encoding: String,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// A prefixed name used a prefix with no binding in the context
    #[error("unknown prefix '{prefix}' at line {line}, column {column}")]
    UnknownPrefix {
        /// The unbound prefix
        prefix: String,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// Malformed `@base` / `@prefix` / `BASE` / `PREFIX`
    #[error("malformed directive '{name}' at line {line}, column {column}")]
    BadDirective {
        /// The directive keyword as read
        name: String,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// A directive was not ended with `.`
    #[error("missing '.' terminator at line {line}, column {column}")]
    MissingTerminator {
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
    },

    /// A condition the state machine believes impossible
    #[error("internal parser invariant violated: {detail}")]
    InternalInvariant {
        /// Description of the broken invariant
        detail: String,
    },

    /// I/O error from the sink or the underlying source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;
