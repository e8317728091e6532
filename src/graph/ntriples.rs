//! N-Triples line codec
//!
//! Reads graph snapshots for the offline stores. Blank nodes are not
//! supported: every subject and IRI object must be absolute.

use super::term::{Iri, Literal, Term, Triple};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NTriplesError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: blank nodes are not supported")]
    BlankNode { line: usize },
}

/// Parse a whole N-Triples document, preserving statement order.
pub fn parse_document(text: &str) -> Result<Vec<Triple>, NTriplesError> {
    let mut triples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(triple) = parse_line(line, idx + 1)? {
            triples.push(triple);
        }
    }
    Ok(triples)
}

/// Parse one line. Empty lines and comments yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Triple>, NTriplesError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut cursor = Cursor {
        chars: trimmed.chars().collect(),
        pos: 0,
        line: line_no,
    };

    let subject = cursor.iri()?;
    cursor.skip_ws();
    let predicate = cursor.iri()?;
    cursor.skip_ws();
    let object = cursor.object()?;
    cursor.skip_ws();
    if cursor.next() != Some('.') {
        return Err(cursor.error("expected '.' at end of statement"));
    }
    cursor.skip_ws();
    if let Some(c) = cursor.peek() {
        if c != '#' {
            return Err(cursor.error("unexpected content after '.'"));
        }
    }

    Ok(Some(Triple {
        subject,
        predicate,
        object,
    }))
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Cursor {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> NTriplesError {
        NTriplesError::Syntax {
            line: self.line,
            message: format!("{} (column {})", message, self.pos + 1),
        }
    }

    fn iri(&mut self) -> Result<Iri, NTriplesError> {
        match self.next() {
            Some('<') => {}
            Some('_') => return Err(NTriplesError::BlankNode { line: self.line }),
            _ => return Err(self.error("expected '<'")),
        }
        let mut iri = String::new();
        loop {
            match self.next() {
                Some('>') => return Ok(Iri::new(iri)),
                Some('\\') => iri.push(self.unicode_escape()?),
                Some(c) => iri.push(c),
                None => return Err(self.error("unterminated IRI")),
            }
        }
    }

    fn object(&mut self) -> Result<Term, NTriplesError> {
        match self.peek() {
            Some('<') => Ok(Term::Iri(self.iri()?)),
            Some('"') => Ok(Term::Literal(self.literal()?)),
            Some('_') => Err(NTriplesError::BlankNode { line: self.line }),
            _ => Err(self.error("expected IRI or literal")),
        }
    }

    fn literal(&mut self) -> Result<Literal, NTriplesError> {
        self.next();
        let mut lexical = String::new();
        loop {
            match self.next() {
                Some('"') => break,
                Some('\\') => match self.peek() {
                    Some('u') | Some('U') => lexical.push(self.unicode_escape()?),
                    Some(c) => {
                        self.pos += 1;
                        lexical.push(match c {
                            'n' => '\n',
                            'r' => '\r',
                            't' => '\t',
                            'b' => '\u{8}',
                            'f' => '\u{c}',
                            '"' => '"',
                            '\'' => '\'',
                            '\\' => '\\',
                            _ => return Err(self.error("invalid escape")),
                        });
                    }
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) => lexical.push(c),
                None => return Err(self.error("unterminated literal")),
            }
        }

        match self.peek() {
            Some('^') => {
                self.next();
                if self.next() != Some('^') {
                    return Err(self.error("expected '^^'"));
                }
                let datatype = self.iri()?;
                Ok(Literal::typed(lexical, datatype))
            }
            Some('@') => {
                self.next();
                let mut lang = String::new();
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '-' {
                        lang.push(c);
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                if lang.is_empty() {
                    return Err(self.error("empty language tag"));
                }
                Ok(Literal::lang(lexical, lang))
            }
            _ => Ok(Literal::plain(lexical)),
        }
    }

    /// `\uXXXX` / `\UXXXXXXXX`, cursor positioned after the backslash
    fn unicode_escape(&mut self) -> Result<char, NTriplesError> {
        let width = match self.next() {
            Some('u') => 4,
            Some('U') => 8,
            _ => return Err(self.error("invalid escape")),
        };
        let mut hex = String::with_capacity(width);
        for _ in 0..width {
            match self.next() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(self.error("invalid unicode escape")),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error("invalid code point"))
    }
}
