//! Text I/O for entity sets.
//!
//! The entity set format is whitespace-separated with a few line-oriented
//! fields (the magic line and set names), so parsing goes through a small
//! [`TextCursor`] that can switch between token and line reads.

pub mod entity_sets;

use std::str::FromStr;

use crate::mesh_error::MeshError;

/// First line of an entity set file.
pub const ENTITY_SETS_MAGIC: &str = "MFEM sets v1.0";

/// Token/line reader over an in-memory text.
pub(crate) struct TextCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Skip any whitespace, line breaks included.
    pub(crate) fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Skip whitespace and every line starting with `comment`.
    pub(crate) fn skip_comment_lines(&mut self, comment: char) {
        loop {
            self.skip_ws();
            if !self.rest().starts_with(comment) {
                break;
            }
            self.next_line();
        }
    }

    /// Remainder of the current line, without the line break or a trailing
    /// `\r`. `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let (line, advance) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Next whitespace-delimited token.
    pub(crate) fn next_token(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    /// Next token parsed as `T`; `what` names the field in errors.
    pub(crate) fn parse<T: FromStr>(&mut self, what: &str) -> Result<T, MeshError> {
        let tok = self
            .next_token()
            .ok_or_else(|| MeshError::EntitySetParse(format!("missing {what}")))?;
        tok.parse()
            .map_err(|_| MeshError::EntitySetParse(format!("invalid {what}: `{tok}`")))
    }

    /// Next token, which must equal `expected`.
    pub(crate) fn expect(&mut self, expected: &str) -> Result<(), MeshError> {
        match self.next_token() {
            Some(tok) if tok == expected => Ok(()),
            Some(tok) => Err(MeshError::EntitySetParse(format!(
                "expected `{expected}`, found `{tok}`"
            ))),
            None => Err(MeshError::EntitySetParse(format!("missing `{expected}`"))),
        }
    }
}
