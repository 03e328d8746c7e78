//! A single document row and its highlight classification.

use crate::error::EditError;

/// Per-byte classification used for display styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Highlight {
    /// Plain text.
    #[default]
    Normal,
    /// Line or block comment.
    Comment,
    /// Control-flow keyword.
    Keyword1,
    /// Type keyword.
    Keyword2,
    /// String or character literal.
    String,
    /// Numeric literal.
    Number,
    /// Occurrence of the active search query.
    Match,
    /// Preprocessor / shell directive line.
    Preproc,
}

/// One row of text.
///
/// `highlight` always has the same length as `text`; every mutator resets the classification
/// of the line to [`Highlight::Normal`] so it stays valid until the syntax engine runs again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: Vec<u8>,
    highlight: Vec<Highlight>,
    comment_open: bool,
}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line holding `text`.
    pub fn from_bytes(text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        let highlight = vec![Highlight::Normal; text.len()];
        Self {
            text,
            highlight,
            comment_open: false,
        }
    }

    /// Line text.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Highlight tags, parallel to [`text`](Self::text).
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` for an empty line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether a multiline comment is still open at the end of this line.
    pub fn comment_open(&self) -> bool {
        self.comment_open
    }

    /// Lossy UTF-8 view, mostly for tests and diagnostics.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }

    pub(crate) fn insert(&mut self, col: usize, byte: u8) -> Result<(), EditError> {
        if col > self.text.len() {
            return Err(EditError::OutOfRange { row: 0, col });
        }
        self.text.try_reserve(1)?;
        self.highlight.try_reserve(1)?;
        self.text.insert(col, byte);
        self.highlight.insert(col, Highlight::Normal);
        Ok(())
    }

    pub(crate) fn remove(&mut self, col: usize) -> Result<u8, EditError> {
        if col >= self.text.len() {
            return Err(EditError::OutOfRange { row: 0, col });
        }
        self.highlight.remove(col);
        Ok(self.text.remove(col))
    }

    pub(crate) fn append(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        self.text.try_reserve(bytes.len())?;
        self.highlight.try_reserve(bytes.len())?;
        self.text.extend_from_slice(bytes);
        self.highlight.resize(self.text.len(), Highlight::Normal);
        Ok(())
    }

    /// Split off `[col, len)` into a new line; `self` keeps `[0, col)`.
    ///
    /// The tail inherits `comment_open`: it now ends where this line used to, so the line
    /// below was classified against that state.
    pub(crate) fn split_off(&mut self, col: usize) -> Result<Line, EditError> {
        if col > self.text.len() {
            return Err(EditError::OutOfRange { row: 0, col });
        }
        let mut tail = Line::from_bytes(self.text.split_off(col));
        tail.comment_open = self.comment_open;
        self.highlight.truncate(col);
        Ok(tail)
    }

    pub(crate) fn into_text(self) -> Vec<u8> {
        self.text
    }

    pub(crate) fn set_classification(&mut self, highlight: Vec<Highlight>, comment_open: bool) {
        debug_assert_eq!(highlight.len(), self.text.len());
        self.highlight = highlight;
        self.comment_open = comment_open;
    }

    pub(crate) fn highlight_mut(&mut self) -> &mut [Highlight] {
        &mut self.highlight
    }
}
