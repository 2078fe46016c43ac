//! Lossless lexical pass over a statement.
//!
//! The scanner only splits the text into the spans the classifier needs to
//! place parameter markers: quoted literals, parentheses, a handful of clause
//! keywords and the `?` markers themselves. Everything else is an `Other`
//! span. Concatenating the spans in order reproduces the input exactly.
//!
//! String literals follow the Db2 for i convention: a doubled `''` inside a
//! literal is an escaped quote, backslash has no special meaning.

use crate::errors::{
    unclosed_paren_error, unmatched_close_paren_error, unterminated_comment_error,
    unterminated_literal_error,
};
use crate::IseriesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    On,
    Having,
    Group,
    Order,
    Values,
    Set,
    Case,
    When,
    Then,
    Else,
    End,
    Union,
    Intersect,
    Except,
    Like,
}

impl Keyword {
    fn lookup(word: &str) -> Option<Self> {
        const KEYWORDS: &[(&str, Keyword)] = &[
            ("SELECT", Keyword::Select),
            ("FROM", Keyword::From),
            ("WHERE", Keyword::Where),
            ("ON", Keyword::On),
            ("HAVING", Keyword::Having),
            ("GROUP", Keyword::Group),
            ("ORDER", Keyword::Order),
            ("VALUES", Keyword::Values),
            ("SET", Keyword::Set),
            ("CASE", Keyword::Case),
            ("WHEN", Keyword::When),
            ("THEN", Keyword::Then),
            ("ELSE", Keyword::Else),
            ("END", Keyword::End),
            ("UNION", Keyword::Union),
            ("INTERSECT", Keyword::Intersect),
            ("EXCEPT", Keyword::Except),
            ("LIKE", Keyword::Like),
        ];
        KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|(_, keyword)| *keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    QuotedLiteral,
    ParenOpen,
    ParenClose,
    Keyword(Keyword),
    Marker,
    Other,
}

/// Half-open byte range `start..end` of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
    /// Parenthesis depth of the level the span sits on. An opening paren
    /// reports the depth outside it, as does its matching closing paren.
    pub depth: usize,
}

impl Span {
    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.start..self.end]
    }

    pub fn is_whitespace(&self, sql: &str) -> bool {
        self.kind == SpanKind::Other && self.text(sql).bytes().all(|b| b.is_ascii_whitespace())
    }

    pub fn is_comment(&self, sql: &str) -> bool {
        self.kind == SpanKind::Other && {
            let text = self.text(sql);
            text.starts_with("--") || text.starts_with("/*")
        }
    }
}

pub fn scan(sql: &str) -> Result<Vec<Span>, IseriesError> {
    Scanner::new(sql).run()
}

struct Scanner<'a> {
    sql: &'a str,
    bytes: &'a [u8],
    pos: usize,
    open_parens: Vec<usize>,
    spans: Vec<Span>,
}

impl<'a> Scanner<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            sql,
            bytes: sql.as_bytes(),
            pos: 0,
            open_parens: Vec::new(),
            spans: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Span>, IseriesError> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let byte = self.bytes[start];
            let kind = match byte {
                b'\'' => {
                    self.consume_quoted(b'\'')?;
                    SpanKind::QuotedLiteral
                }
                b'"' => {
                    self.consume_quoted(b'"')?;
                    SpanKind::Other
                }
                b'-' if self.peek(1) == Some(b'-') => {
                    self.consume_line_comment();
                    SpanKind::Other
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    self.consume_block_comment()?;
                    SpanKind::Other
                }
                b'(' => {
                    self.pos += 1;
                    self.push(SpanKind::ParenOpen, start);
                    self.open_parens.push(start);
                    continue;
                }
                b')' => {
                    if self.open_parens.pop().is_none() {
                        return Err(unmatched_close_paren_error(start));
                    }
                    self.pos += 1;
                    SpanKind::ParenClose
                }
                b'?' => {
                    self.pos += 1;
                    SpanKind::Marker
                }
                _ if byte.is_ascii_whitespace() => {
                    self.consume_while(|b| b.is_ascii_whitespace());
                    SpanKind::Other
                }
                _ if is_word_byte(byte) => {
                    self.consume_while(is_word_byte);
                    match Keyword::lookup(&self.sql[start..self.pos]) {
                        Some(keyword) => SpanKind::Keyword(keyword),
                        None => SpanKind::Other,
                    }
                }
                _ if is_operator_byte(byte) => {
                    self.consume_while(is_operator_byte);
                    SpanKind::Other
                }
                _ => {
                    self.pos += 1;
                    SpanKind::Other
                }
            };
            self.push(kind, start);
        }

        if let Some(&unclosed) = self.open_parens.first() {
            return Err(unclosed_paren_error(unclosed, self.open_parens.len()));
        }
        Ok(self.spans)
    }

    fn push(&mut self, kind: SpanKind, start: usize) {
        self.spans.push(Span {
            kind,
            start,
            end: self.pos,
            depth: self.open_parens.len(),
        });
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn consume_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.pos < self.bytes.len() && predicate(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    /// Consumes a delimited literal starting at the opening delimiter. A doubled
    /// delimiter is an escaped character, not the end of the literal.
    fn consume_quoted(&mut self, delimiter: u8) -> Result<(), IseriesError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.bytes.get(self.pos) {
                None => return Err(unterminated_literal_error(start, char::from(delimiter))),
                Some(&byte) if byte == delimiter => {
                    if self.peek(1) == Some(delimiter) {
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn consume_line_comment(&mut self) {
        self.consume_while(|b| b != b'\n');
    }

    fn consume_block_comment(&mut self) -> Result<(), IseriesError> {
        let start = self.pos;
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.peek(1) == Some(b'/') {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(unterminated_comment_error(start))
    }
}

// Non-ASCII bytes count as word bytes so spans always end on char boundaries.
fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'$' | b'#' | b'@') || byte >= 0x80
}

fn is_operator_byte(byte: u8) -> bool {
    matches!(byte, b'<' | b'>' | b'=' | b'!' | b'^')
}
