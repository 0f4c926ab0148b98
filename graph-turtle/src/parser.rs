//! The streaming Turtle parser
//!
//! A pushdown state machine driven one character at a time. The driver loops
//! over characters, reads a token via the lexical readers below, mutates the
//! state and frame stack, possibly emits a triple, and continues until EOF is
//! seen at a statement boundary with an empty stack.
//!
//! Nested structures (`[ … ]` property lists and `( … )` collections) are
//! handled with explicit stack frames rather than recursion, so the stack
//! depth is the nesting depth.

use std::sync::Arc;

use graph_ir::{Namespaces, Term, TripleSink};
use graph_vocab::{rdf, xsd};
use rustc_hash::FxHashMap;

use crate::chars;
use crate::error::{Result, TurtleError};
use crate::iri;
use crate::reader::Source;

// =============================================================================
// States and frames
// =============================================================================

/// Parser states. `Eof` is implicit: it is reached by running out of input
/// in `NewStmt` with an empty stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// At a fresh statement boundary
    NewStmt,
    /// Subject pushed; expecting a predicate or the end of the block
    PredicateList,
    /// Predicate pushed; expecting an object or a continuation
    ObjectList,
    /// Exactly one object is required next
    Object,
    /// Inside `( … )`; expecting a list element or `)`
    Collection,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            State::NewStmt => "statement",
            State::PredicateList => "predicate list",
            State::ObjectList => "object list",
            State::Object => "object",
            State::Collection => "collection",
        }
    }
}

/// One frame per open structure. After a closing delimiter is consumed, the
/// frames restore enough context to continue exactly as before the opening
/// delimiter was seen.
#[derive(Debug)]
enum Frame {
    /// A subject whose predicates are being read. `anon` marks a `[` subject
    /// whose closing `]` is still outstanding.
    Subject { term: Term, anon: bool },
    /// A predicate awaiting objects, directly above its subject frame
    Predicate(Term),
    /// Entered `[` in object position; on `]`, return to `resume` (the
    /// blank-node object was emitted before the frame was pushed)
    Anon { resume: State },
    /// Inside `( … )`. `cell` is the list cell most recently given an
    /// `rdf:first`; `has_first` is false until the first element is read.
    Collection {
        cell: Term,
        has_first: bool,
        resume: State,
    },
}

/// Monotonic `_:bN` label generator. Distinct calls yield distinct labels
/// within one parse; two parses share no counters.
#[derive(Debug, Default)]
struct BlankNodeGen {
    next: u64,
}

impl BlankNodeGen {
    fn fresh(&mut self) -> Term {
        let term = Term::blank(format!("b{}", self.next));
        self.next += 1;
        term
    }
}

// =============================================================================
// Parser
// =============================================================================

/// The streaming Turtle parser.
///
/// Owns one character source, one namespace context, and one blank-node
/// counter, and borrows one sink from start to end of the parse.
pub struct Parser<'a, I: Iterator<Item = char>, S: TripleSink> {
    source: Source<I>,
    sink: &'a mut S,
    namespaces: Namespaces,
    blanks: BlankNodeGen,
    stack: Vec<Frame>,
    state: State,
    /// Cache of resolved prefixed names (`"prefix:local"` → expanded IRI).
    /// Cleared whenever a prefix is re-bound.
    resolved: FxHashMap<String, Arc<str>>,
    statements: u64,
    triples: u64,
}

impl<'a, I, S> Parser<'a, I, S>
where
    I: Iterator<Item = char>,
    S: TripleSink,
{
    /// Create a parser over a source, emitting to `sink`.
    pub fn new(source: Source<I>, sink: &'a mut S) -> Self {
        Self {
            source,
            sink,
            namespaces: Namespaces::new(),
            blanks: BlankNodeGen::default(),
            stack: Vec::new(),
            state: State::NewStmt,
            resolved: FxHashMap::default(),
            statements: 0,
            triples: 0,
        }
    }

    /// Pre-seed the namespace context. Entries are visible to the parser
    /// immediately.
    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Drive the parser to EOF and return the final namespace context.
    pub fn run(mut self) -> Result<Namespaces> {
        let span = tracing::info_span!(
            "turtle_parse",
            statement_count = tracing::field::Empty,
            triple_count = tracing::field::Empty,
        );
        let _g = span.enter();

        loop {
            self.source.skip_ws();
            let Some(ch) = self.source.peek() else {
                if self.state == State::NewStmt && self.stack.is_empty() {
                    break;
                }
                return Err(self.unexpected_eof());
            };
            match self.state {
                State::NewStmt => self.new_stmt(ch)?,
                State::PredicateList => self.predicate_list(ch)?,
                State::ObjectList => self.object_list(ch)?,
                State::Object => self.object(ch)?,
                State::Collection => self.collection(ch)?,
            }
        }

        span.record("statement_count", self.statements);
        span.record("triple_count", self.triples);
        Ok(self.namespaces)
    }

    // =========================================================================
    // Per-state dispatch
    // =========================================================================

    fn new_stmt(&mut self, ch: char) -> Result<()> {
        match ch {
            '@' => {
                self.source.advance();
                self.read_directive()
            }
            '<' => {
                self.source.advance();
                let subject = self.read_iri_term()?;
                self.push_subject(subject, false);
                Ok(())
            }
            '[' => {
                self.source.advance();
                let bn = self.blanks.fresh();
                self.push_subject(bn, true);
                Ok(())
            }
            '(' => {
                self.source.advance();
                let head = self.blanks.fresh();
                self.stack.push(Frame::Subject {
                    term: head.clone(),
                    anon: false,
                });
                self.stack.push(Frame::Collection {
                    cell: head,
                    has_first: false,
                    resume: State::PredicateList,
                });
                self.state = State::Collection;
                Ok(())
            }
            '_' => {
                self.source.advance();
                let bn = self.read_blank_node_label()?;
                self.push_subject(bn, false);
                Ok(())
            }
            c if chars::is_pn_chars_base(c) || c == ':' => {
                let word = self.read_bare_name();
                match self.source.peek() {
                    Some(':') => {
                        let iri = self.read_prefixed_iri(word)?;
                        self.push_subject(Term::Iri(iri), false);
                        Ok(())
                    }
                    Some(c2) if chars::is_ws(c2) && word.eq_ignore_ascii_case("prefix") => {
                        self.read_prefix_directive(false)
                    }
                    Some(c2) if chars::is_ws(c2) && word.eq_ignore_ascii_case("base") => {
                        self.read_base_directive(false)
                    }
                    Some(c2) => Err(self.unexpected_char(c2)),
                    None => Err(self.unexpected_eof()),
                }
            }
            c => Err(self.unexpected_char(c)),
        }
    }

    fn predicate_list(&mut self, ch: char) -> Result<()> {
        match ch {
            '.' => {
                self.source.advance();
                self.close_statement()
            }
            ';' => {
                // another predicate for the same subject
                self.source.advance();
                Ok(())
            }
            ']' => {
                self.source.advance();
                self.close_bracket()
            }
            '<' => {
                self.source.advance();
                let predicate = self.read_iri_term()?;
                self.push_predicate(predicate);
                Ok(())
            }
            // blank node in predicate position
            '[' => Err(self.unexpected_char('[')),
            c if chars::is_pn_chars_base(c) || c == ':' => {
                let word = self.read_bare_name();
                match self.source.peek() {
                    Some(':') => {
                        let iri = self.read_prefixed_iri(word)?;
                        self.push_predicate(Term::Iri(iri));
                        Ok(())
                    }
                    _ if word == "a" => {
                        self.push_predicate(Term::iri(rdf::TYPE));
                        Ok(())
                    }
                    Some(c2) => Err(self.unexpected_char(c2)),
                    None => Err(self.unexpected_eof()),
                }
            }
            c => Err(self.unexpected_char(c)),
        }
    }

    fn object_list(&mut self, ch: char) -> Result<()> {
        match ch {
            ',' => {
                self.source.advance();
                self.state = State::Object;
                Ok(())
            }
            ';' => {
                self.source.advance();
                self.pop_predicate()?;
                self.state = State::PredicateList;
                Ok(())
            }
            ']' => {
                self.source.advance();
                self.pop_predicate()?;
                self.close_bracket()
            }
            '.' => {
                self.source.advance();
                self.pop_predicate()?;
                self.close_statement()
            }
            c => {
                if Self::starts_term(c) {
                    self.state = State::Object;
                    Ok(())
                } else {
                    Err(self.unexpected_char(c))
                }
            }
        }
    }

    fn object(&mut self, ch: char) -> Result<()> {
        match ch {
            '[' => {
                self.source.advance();
                let bn = self.blanks.fresh();
                self.emit_object(bn.clone())?;
                self.stack.push(Frame::Anon {
                    resume: State::ObjectList,
                });
                self.stack.push(Frame::Subject {
                    term: bn,
                    anon: true,
                });
                self.state = State::PredicateList;
                Ok(())
            }
            '(' => {
                self.source.advance();
                let head = self.blanks.fresh();
                self.emit_object(head.clone())?;
                self.stack.push(Frame::Collection {
                    cell: head,
                    has_first: false,
                    resume: State::ObjectList,
                });
                self.state = State::Collection;
                Ok(())
            }
            c => {
                let term = self.read_simple_term(c)?;
                self.emit_object(term)?;
                self.state = State::ObjectList;
                Ok(())
            }
        }
    }

    fn collection(&mut self, ch: char) -> Result<()> {
        match ch {
            ')' => {
                self.source.advance();
                match self.stack.pop() {
                    Some(Frame::Collection {
                        cell,
                        has_first,
                        resume,
                    }) => {
                        if has_first {
                            self.emit(cell, Term::iri(rdf::REST), Term::iri(rdf::NIL))?;
                        }
                        self.state = resume;
                        Ok(())
                    }
                    _ => Err(self.internal("collection close without a collection frame")),
                }
            }
            '[' => {
                self.source.advance();
                let cell = self.next_collection_cell()?;
                let bn = self.blanks.fresh();
                self.emit(cell, Term::iri(rdf::FIRST), bn.clone())?;
                self.stack.push(Frame::Anon {
                    resume: State::Collection,
                });
                self.stack.push(Frame::Subject {
                    term: bn,
                    anon: true,
                });
                self.state = State::PredicateList;
                Ok(())
            }
            '(' => {
                self.source.advance();
                let cell = self.next_collection_cell()?;
                let inner = self.blanks.fresh();
                self.emit(cell, Term::iri(rdf::FIRST), inner.clone())?;
                self.stack.push(Frame::Collection {
                    cell: inner,
                    has_first: false,
                    resume: State::Collection,
                });
                Ok(())
            }
            c => {
                let valid = Self::starts_term(c) || (c == '.' && self.dot_starts_number());
                if !valid {
                    return Err(self.unexpected_char(c));
                }
                let cell = self.next_collection_cell()?;
                let element = self.read_simple_term(c)?;
                self.emit(cell, Term::iri(rdf::FIRST), element)?;
                Ok(())
            }
        }
    }

    // =========================================================================
    // Stack discipline
    // =========================================================================

    fn push_subject(&mut self, term: Term, anon: bool) {
        self.stack.push(Frame::Subject { term, anon });
        self.state = State::PredicateList;
    }

    fn push_predicate(&mut self, term: Term) {
        self.stack.push(Frame::Predicate(term));
        self.state = State::ObjectList;
    }

    fn pop_predicate(&mut self) -> Result<Term> {
        match self.stack.pop() {
            Some(Frame::Predicate(term)) => Ok(term),
            _ => Err(self.internal("expected a predicate frame")),
        }
    }

    /// Close a statement on `.`: the stack must hold exactly the subject.
    fn close_statement(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Subject { .. }) if self.stack.is_empty() => {
                self.state = State::NewStmt;
                self.statements += 1;
                Ok(())
            }
            // '.' inside a nested `[ ]` or `( )`
            Some(Frame::Subject { .. }) => Err(self.unexpected_char('.')),
            _ => Err(self.internal("statement close without a subject frame")),
        }
    }

    /// Close a `]`: pop the blank-node subject and resume the state stored on
    /// the stack, or, for a `[` that opened the statement subject, keep the
    /// subject and continue with its predicate list.
    fn close_bracket(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Subject { term, anon }) => {
                if matches!(self.stack.last(), Some(Frame::Anon { .. })) {
                    match self.stack.pop() {
                        Some(Frame::Anon { resume }) => {
                            self.state = resume;
                            Ok(())
                        }
                        _ => Err(self.internal("anon frame disappeared")),
                    }
                } else if anon && self.stack.is_empty() {
                    self.stack.push(Frame::Subject { term, anon: false });
                    self.state = State::PredicateList;
                    Ok(())
                } else {
                    Err(self.unexpected_char(']'))
                }
            }
            _ => Err(self.internal("bracket close without a subject frame")),
        }
    }

    /// The cell the next collection element belongs to. The first element
    /// reuses the pre-allocated head; later elements link a fresh cell via
    /// `rdf:rest` before their `rdf:first` is emitted.
    fn next_collection_cell(&mut self) -> Result<Term> {
        let (cell, has_first) = match self.stack.last() {
            Some(Frame::Collection {
                cell, has_first, ..
            }) => (cell.clone(), *has_first),
            _ => return Err(self.internal("collection element without a collection frame")),
        };

        if !has_first {
            if let Some(Frame::Collection { has_first, .. }) = self.stack.last_mut() {
                *has_first = true;
            }
            return Ok(cell);
        }

        let next = self.blanks.fresh();
        self.emit(cell, Term::iri(rdf::REST), next.clone())?;
        if let Some(Frame::Collection { cell, .. }) = self.stack.last_mut() {
            *cell = next.clone();
        }
        Ok(next)
    }

    // =========================================================================
    // Emission
    // =========================================================================

    fn emit(&mut self, s: Term, p: Term, o: Term) -> Result<()> {
        self.sink.emit(s, p, o)?;
        self.triples += 1;
        Ok(())
    }

    fn emit_object(&mut self, object: Term) -> Result<()> {
        let (subject, predicate) = self.subject_predicate()?;
        self.emit(subject, predicate, object)
    }

    /// The subject and predicate the current object belongs to: the top of
    /// the stack must be a predicate frame directly above its subject frame.
    fn subject_predicate(&self) -> Result<(Term, Term)> {
        let len = self.stack.len();
        if len >= 2 {
            if let (Some(Frame::Subject { term: s, .. }), Some(Frame::Predicate(p))) =
                (self.stack.get(len - 2), self.stack.get(len - 1))
            {
                return Ok((s.clone(), p.clone()));
            }
        }
        Err(TurtleError::InternalInvariant {
            detail: "object emission without subject and predicate frames".to_string(),
        })
    }

    // =========================================================================
    // Lexical readers
    // =========================================================================

    /// Characters that can start an object term. `.` and the structural
    /// delimiters are decided by the caller.
    fn starts_term(c: char) -> bool {
        matches!(c, '<' | '_' | '"' | '\'' | '[' | '(' | '+' | '-' | ':')
            || c.is_ascii_digit()
            || chars::is_pn_chars_base(c)
    }

    fn dot_starts_number(&mut self) -> bool {
        self.source.peek2().is_some_and(|c| c.is_ascii_digit())
    }

    /// Read a non-structural term: IRI reference, blank-node label, string
    /// literal (with optional suffix), numeric literal, boolean literal, or
    /// prefixed name.
    fn read_simple_term(&mut self, ch: char) -> Result<Term> {
        match ch {
            '<' => {
                self.source.advance();
                self.read_iri_term()
            }
            '_' => {
                self.source.advance();
                self.read_blank_node_label()
            }
            '"' | '\'' => {
                self.source.advance();
                let lexical = self.read_string_literal(ch)?;
                self.read_literal_suffix(lexical)
            }
            '+' | '-' => self.read_numeric(),
            '.' => {
                if self.dot_starts_number() {
                    self.read_numeric()
                } else {
                    Err(self.unexpected_char('.'))
                }
            }
            c if c.is_ascii_digit() => self.read_numeric(),
            c if chars::is_pn_chars_base(c) || c == ':' => {
                let word = self.read_bare_name();
                match self.source.peek() {
                    Some(':') => {
                        let iri = self.read_prefixed_iri(word)?;
                        Ok(Term::Iri(iri))
                    }
                    _ if word == "true" || word == "false" => Ok(Term::typed(word, xsd::BOOLEAN)),
                    Some(c2) => Err(self.unexpected_char(c2)),
                    None => Err(self.unexpected_eof()),
                }
            }
            c => Err(self.unexpected_char(c)),
        }
    }

    /// Read an IRI reference (after `<`), returning the resolved term.
    fn read_iri_term(&mut self) -> Result<Term> {
        let text = self.read_iri_ref_text()?;
        let resolved = self.resolve_reference(&text);
        Ok(Term::iri(resolved))
    }

    /// Accumulate an IRI reference until the unescaped `>`.
    fn read_iri_ref_text(&mut self) -> Result<String> {
        let mut buf = String::new();
        loop {
            match self.source.advance() {
                None => return Err(self.invalid_iri("unterminated IRI reference", buf)),
                Some('>') => break,
                Some('\\') => match self.source.advance() {
                    Some('u') => {
                        let c = self.read_unicode_escape(4)?;
                        buf.push(c);
                    }
                    Some('U') => {
                        let c = self.read_unicode_escape(8)?;
                        buf.push(c);
                    }
                    Some(c) => {
                        return Err(self.invalid_iri(format!("invalid escape '\\{c}'"), buf))
                    }
                    None => return Err(self.invalid_iri("unterminated IRI reference", buf)),
                },
                Some(c) if chars::is_non_iri(c) => {
                    return Err(self.invalid_iri(format!("disallowed character {c:?}"), buf))
                }
                Some(c) => buf.push(c),
            }
        }
        Ok(buf)
    }

    /// Resolve an IRI reference against the base. With no base bound,
    /// relative references pass through verbatim.
    fn resolve_reference(&self, reference: &str) -> String {
        match self.namespaces.base() {
            Some(base) if !iri::is_absolute(reference) => iri::resolve(reference, base),
            _ => reference.to_string(),
        }
    }

    /// Read a run of PN_CHARS_BASE characters (a prefix, keyword, or bare
    /// word). Stops without consuming the terminator.
    fn read_bare_name(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.source.peek() {
            if chars::is_pn_chars_base(c) {
                self.source.advance();
                word.push(c);
            } else {
                break;
            }
        }
        word
    }

    /// Read a local name (or blank-node name): the base set extended with
    /// digits, `.`, `-`, `_`. A `.` is only taken when another name character
    /// follows, so a trailing statement dot is left alone. May be empty.
    fn read_dotted_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.source.peek() {
            if c == '.' {
                if self.source.peek2().is_some_and(chars::is_local_name_char) {
                    self.source.advance();
                    name.push('.');
                    continue;
                }
                break;
            }
            if chars::is_local_name_char(c) {
                self.source.advance();
                name.push(c);
            } else {
                break;
            }
        }
        name
    }

    /// Resolve `prefix:local` (the `:` not yet consumed) through the cache.
    fn read_prefixed_iri(&mut self, prefix: String) -> Result<Arc<str>> {
        self.source.advance(); // ':'
        let local = self.read_dotted_name();

        let key = format!("{prefix}:{local}");
        if let Some(cached) = self.resolved.get(&key) {
            return Ok(cached.clone());
        }

        let Some(expanded) = self.namespaces.resolve(&prefix, &local) else {
            return Err(TurtleError::UnknownPrefix {
                prefix,
                line: self.source.line(),
                column: self.source.column(),
            });
        };
        let iri: Arc<str> = Arc::from(expanded.as_str());
        self.resolved.insert(key, iri.clone());
        Ok(iri)
    }

    /// Read a blank-node label (after `_`): expect `:`, then a name. Labels
    /// with the same text refer to the same node within one parse.
    fn read_blank_node_label(&mut self) -> Result<Term> {
        match self.source.peek() {
            Some(':') => {
                self.source.advance();
            }
            Some(c) => return Err(self.unexpected_char(c)),
            None => return Err(self.unexpected_eof()),
        }
        let label = self.read_dotted_name();
        if label.is_empty() {
            return Err(match self.source.peek() {
                Some(c) => self.unexpected_char(c),
                None => self.unexpected_eof(),
            });
        }
        Ok(Term::blank(label))
    }

    /// Accumulate a string literal until the matching unescaped quote
    /// (the opening quote is already consumed).
    fn read_string_literal(&mut self, quote: char) -> Result<String> {
        let mut buf = String::new();
        loop {
            let Some(c) = self.source.advance() else {
                return Err(self.unexpected_eof());
            };
            if c == quote {
                break;
            }
            if c != '\\' {
                buf.push(c);
                continue;
            }
            match self.source.advance() {
                Some('\\') => buf.push('\\'),
                Some('"') => buf.push('"'),
                Some('\'') => buf.push('\''),
                Some('n') => buf.push('\n'),
                Some('t') => buf.push('\t'),
                Some('r') => buf.push('\r'),
                Some('b') => buf.push('\u{0008}'),
                Some('f') => buf.push('\u{000C}'),
                Some('u') => {
                    let c = self.read_unicode_escape(4)?;
                    buf.push(c);
                }
                Some('U') => {
                    let c = self.read_unicode_escape(8)?;
                    buf.push(c);
                }
                Some(c) => return Err(self.unexpected_char(c)),
                None => return Err(self.unexpected_eof()),
            }
        }
        Ok(buf)
    }

    /// Attach an immediately following `@lang` or `^^datatype` suffix, if
    /// present, to a just-read string literal.
    fn read_literal_suffix(&mut self, lexical: String) -> Result<Term> {
        match self.source.peek() {
            Some('@') => {
                self.source.advance();
                let mut tag = String::new();
                while let Some(c) = self.source.peek() {
                    if c.is_ascii_alphanumeric() || c == '-' {
                        self.source.advance();
                        tag.push(c);
                    } else {
                        break;
                    }
                }
                if tag.is_empty() {
                    return Err(match self.source.peek() {
                        Some(c) => self.unexpected_char(c),
                        None => self.unexpected_eof(),
                    });
                }
                Ok(Term::lang_string(lexical, tag))
            }
            Some('^') => {
                self.source.advance();
                match self.source.peek() {
                    Some('^') => {
                        self.source.advance();
                    }
                    Some(c) => return Err(self.unexpected_char(c)),
                    None => return Err(self.unexpected_eof()),
                }
                let datatype = match self.source.peek() {
                    Some('<') => {
                        self.source.advance();
                        let text = self.read_iri_ref_text()?;
                        Arc::from(self.resolve_reference(&text).as_str())
                    }
                    Some(c) if chars::is_pn_chars_base(c) || c == ':' => {
                        let word = self.read_bare_name();
                        match self.source.peek() {
                            Some(':') => self.read_prefixed_iri(word)?,
                            Some(c2) => return Err(self.unexpected_char(c2)),
                            None => return Err(self.unexpected_eof()),
                        }
                    }
                    Some(c) => return Err(self.unexpected_char(c)),
                    None => return Err(self.unexpected_eof()),
                };
                Ok(Term::typed(lexical, datatype))
            }
            _ => Ok(Term::string(lexical)),
        }
    }

    /// Read `[+-]?\d+(\.\d+)?([eE][+-]?\d+)?` (or the `.\d+` form) and
    /// classify it as xsd:integer, xsd:decimal, or xsd:double. The lexical
    /// form is kept exactly as written.
    fn read_numeric(&mut self) -> Result<Term> {
        let mut buf = String::new();
        if let Some(c @ ('+' | '-')) = self.source.peek() {
            self.source.advance();
            buf.push(c);
        }

        let int_digits = self.copy_digits(&mut buf);
        let mut datatype = xsd::INTEGER;

        if self.source.peek() == Some('.') && self.dot_starts_number() {
            self.source.advance();
            buf.push('.');
            self.copy_digits(&mut buf);
            datatype = xsd::DECIMAL;
        } else if int_digits == 0 {
            return Err(match self.source.peek() {
                Some(c) => self.unexpected_char(c),
                None => self.unexpected_eof(),
            });
        }

        if let Some(e @ ('e' | 'E')) = self.source.peek() {
            self.source.advance();
            buf.push(e);
            if let Some(sign @ ('+' | '-')) = self.source.peek() {
                self.source.advance();
                buf.push(sign);
            }
            if self.copy_digits(&mut buf) == 0 {
                return Err(match self.source.peek() {
                    Some(c) => self.unexpected_char(c),
                    None => self.unexpected_eof(),
                });
            }
            datatype = xsd::DOUBLE;
        }

        Ok(Term::typed(buf, datatype))
    }

    fn copy_digits(&mut self, buf: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.source.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.source.advance();
            buf.push(c);
            count += 1;
        }
        count
    }

    /// Read `\uXXXX` / `\UXXXXXXXX` hex digits to a Unicode scalar. A high
    /// surrogate must be completed by a `\uXXXX` low surrogate.
    fn read_unicode_escape(&mut self, len: usize) -> Result<char> {
        let hex = self.read_hex_digits(len)?;
        let Ok(code) = u32::from_str_radix(&hex, 16) else {
            return Err(self.invalid_unicode(hex));
        };

        if len == 4 && (0xD800..=0xDBFF).contains(&code) {
            if self.source.advance() != Some('\\') || self.source.advance() != Some('u') {
                return Err(self.invalid_unicode(hex));
            }
            let low_hex = self.read_hex_digits(4)?;
            let Ok(low) = u32::from_str_radix(&low_hex, 16) else {
                return Err(self.invalid_unicode(low_hex));
            };
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.invalid_unicode(format!("{hex}\\u{low_hex}")));
            }
            let scalar = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(scalar)
                .ok_or_else(|| self.invalid_unicode(format!("{hex}\\u{low_hex}")));
        }

        char::from_u32(code).ok_or_else(|| self.invalid_unicode(hex))
    }

    fn read_hex_digits(&mut self, len: usize) -> Result<String> {
        let mut hex = String::with_capacity(len);
        for _ in 0..len {
            match self.source.advance() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    hex.push(c);
                    return Err(self.invalid_unicode(hex));
                }
                None => return Err(self.unexpected_eof()),
            }
        }
        Ok(hex)
    }

    // =========================================================================
    // Directives
    // =========================================================================

    /// Read a directive after `@`. Recognized keywords: `prefix`, `base`.
    fn read_directive(&mut self) -> Result<()> {
        let word = self.read_bare_name();
        match word.to_ascii_lowercase().as_str() {
            "prefix" => self.read_prefix_directive(true),
            "base" => self.read_base_directive(true),
            _ => Err(TurtleError::BadDirective {
                name: word,
                line: self.source.line(),
                column: self.source.column(),
            }),
        }
    }

    fn read_prefix_directive(&mut self, require_dot: bool) -> Result<()> {
        self.source.skip_ws();
        let prefix = self.read_bare_name();
        match self.source.peek() {
            Some(':') => {
                self.source.advance();
            }
            _ => return Err(self.bad_directive("prefix")),
        }

        self.source.skip_ws();
        match self.source.peek() {
            Some('<') => {
                self.source.advance();
            }
            _ => return Err(self.bad_directive("prefix")),
        }
        let text = self.read_iri_ref_text()?;
        let namespace = self.resolve_reference(&text);

        self.namespaces.bind(prefix.as_str(), namespace.as_str());
        self.resolved.clear();
        self.sink.on_prefix(&prefix, &namespace);
        tracing::debug!(prefix = %prefix, namespace = %namespace, "bound prefix");

        if require_dot {
            self.expect_dot()?;
        }
        self.statements += 1;
        Ok(())
    }

    fn read_base_directive(&mut self, require_dot: bool) -> Result<()> {
        self.source.skip_ws();
        match self.source.peek() {
            Some('<') => {
                self.source.advance();
            }
            _ => return Err(self.bad_directive("base")),
        }
        let base_iri = self.read_iri_ref_text()?;

        self.namespaces.set_base(base_iri.as_str());
        self.sink.on_base(&base_iri);
        tracing::debug!(base = %base_iri, "set base");

        if require_dot {
            self.expect_dot()?;
        }
        self.statements += 1;
        Ok(())
    }

    fn expect_dot(&mut self) -> Result<()> {
        self.source.skip_ws();
        match self.source.peek() {
            Some('.') => {
                self.source.advance();
                Ok(())
            }
            _ => Err(TurtleError::MissingTerminator {
                line: self.source.line(),
                column: self.source.column(),
            }),
        }
    }

    // =========================================================================
    // Error constructors
    // =========================================================================

    fn unexpected_char(&mut self, ch: char) -> TurtleError {
        TurtleError::UnexpectedCharacter {
            state: self.state.name(),
            ch,
            line: self.source.line(),
            column: self.source.column(),
            snippet: self.source.snippet(),
        }
    }

    fn unexpected_eof(&self) -> TurtleError {
        TurtleError::UnexpectedEof {
            state: self.state.name(),
            stack_depth: self.stack.len(),
            line: self.source.line(),
            column: self.source.column(),
        }
    }

    fn invalid_iri(&self, reason: impl Into<String>, partial: String) -> TurtleError {
        TurtleError::InvalidIri {
            reason: reason.into(),
            partial,
            line: self.source.line(),
            column: self.source.column(),
        }
    }

    fn invalid_unicode(&self, encoding: String) -> TurtleError {
        TurtleError::InvalidUnicodeEscape {
            encoding,
            line: self.source.line(),
            column: self.source.column(),
        }
    }

    fn bad_directive(&self, name: &str) -> TurtleError {
        TurtleError::BadDirective {
            name: name.to_string(),
            line: self.source.line(),
            column: self.source.column(),
        }
    }

    fn internal(&self, detail: &str) -> TurtleError {
        TurtleError::InternalInvariant {
            detail: detail.to_string(),
        }
    }
}
